//! Attendance service: save a day's batch and query history.
//!
//! DESIGN
//! ======
//! `record_attendance` validates the whole batch before touching storage: the
//! date, every status, and that no student appears twice. Only a fully valid
//! batch reaches `db::attendance::insert_batch`, which writes it in a single
//! transaction. A rejected batch therefore leaves no rows behind.
//!
//! Queries return empty vectors rather than errors when nothing matches,
//! including for student ids that do not exist.

use std::collections::HashSet;

use sqlx::SqlitePool;
use time::Date;
use time::macros::format_description;
use tracing::info;

use crate::db::{
    self, DbError,
    attendance::{AttendanceMark, AttendanceStatus, DailyAttendance, StudentAttendance},
};
use crate::services::{ErrorClass, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Invalid date {0:?}. Expected YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Invalid status {status:?} for student {student_id}. Expected Present or Absent.")]
    InvalidStatus { student_id: i64, status: String },
    #[error("Student {0} appears more than once in this attendance batch.")]
    DuplicateEntry(i64),
    #[error("Student {0} does not exist.")]
    UnknownStudent(i64),
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ErrorClass for AttendanceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDate(_) | Self::InvalidStatus { .. } | Self::DuplicateEntry(_) | Self::UnknownStudent(_) => {
                ErrorKind::Validation
            }
            Self::Database(_) => ErrorKind::Storage,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "E_ATTENDANCE_INVALID_DATE",
            Self::InvalidStatus { .. } => "E_ATTENDANCE_INVALID_STATUS",
            Self::DuplicateEntry(_) => "E_ATTENDANCE_DUPLICATE_ENTRY",
            Self::UnknownStudent(_) => "E_ATTENDANCE_UNKNOWN_STUDENT",
            Self::Database(_) => "E_DATABASE",
        }
    }
}

pub const SAVED_MESSAGE: &str = "Attendance saved successfully!";

/// One unvalidated entry as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub status: String,
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `InvalidDate` for anything else, including impossible dates and
/// signed or widened years.
pub fn parse_date(raw: &str) -> Result<Date, AttendanceError> {
    let trimmed = raw.trim();
    let invalid = || AttendanceError::InvalidDate(raw.to_owned());
    let day = Date::parse(trimmed, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())?;
    // The key must reproduce the input exactly or it will not sort as text.
    if db::attendance::date_key(day) != trimmed {
        return Err(invalid());
    }
    Ok(day)
}

/// Check every entry and convert to typed marks. The first bad entry rejects
/// the batch.
///
/// # Errors
///
/// `InvalidStatus` for a status other than `Present`/`Absent`, or
/// `DuplicateEntry` when a student id repeats.
pub fn validate_entries(entries: &[AttendanceEntry]) -> Result<Vec<AttendanceMark>, AttendanceError> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .iter()
        .map(|entry| {
            let status: AttendanceStatus = entry.status.trim().parse().map_err(|_| {
                AttendanceError::InvalidStatus { student_id: entry.student_id, status: entry.status.clone() }
            })?;
            if !seen.insert(entry.student_id) {
                return Err(AttendanceError::DuplicateEntry(entry.student_id));
            }
            Ok(AttendanceMark { student_id: entry.student_id, status })
        })
        .collect()
}

/// Save a day's attendance. All entries persist or none do.
/// Returns the number of records written.
///
/// # Errors
///
/// Validation errors for a bad date, status, duplicate or unknown student;
/// otherwise a database error.
pub async fn record_attendance(
    pool: &SqlitePool,
    date: &str,
    entries: &[AttendanceEntry],
) -> Result<usize, AttendanceError> {
    let day = parse_date(date)?;
    let marks = validate_entries(entries)?;

    let saved = match db::attendance::insert_batch(pool, day, &marks).await {
        Ok(saved) => saved,
        Err(DbError::UnknownStudent(id)) => return Err(AttendanceError::UnknownStudent(id)),
        Err(e) => return Err(e.into()),
    };

    info!(date = %db::attendance::date_key(day), count = saved, "attendance saved");
    Ok(saved)
}

/// Attendance for one date, ordered by student name.
///
/// # Errors
///
/// `InvalidDate` for a malformed date, or a database error.
pub async fn query_by_date(pool: &SqlitePool, date: &str) -> Result<Vec<DailyAttendance>, AttendanceError> {
    let day = parse_date(date)?;
    Ok(db::attendance::by_date(pool, day).await?)
}

/// One student's history, newest first. Unknown ids yield an empty list.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn query_by_student(pool: &SqlitePool, student_id: i64) -> Result<Vec<StudentAttendance>, AttendanceError> {
    Ok(db::attendance::by_student(pool, student_id).await?)
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
