//! `attendance` table queries.
//!
//! DESIGN
//! ======
//! A day's attendance is written in one transaction. Rows are keyed on
//! `(student_id, date)`, so re-saving a day updates each status in place
//! instead of stacking duplicates.
//!
//! ERROR HANDLING
//! ==============
//! Any failing insert rolls back the whole batch before the error is
//! returned. A foreign-key failure is reported as `DbError::UnknownStudent`
//! naming the offending id.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::Date;
use time::macros::format_description;
use tracing::warn;

use super::{DbError, is_foreign_key_violation};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized attendance status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for AttendanceStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

fn decode_status(raw: &str) -> Result<AttendanceStatus, DbError> {
    raw.parse().map_err(|e| DbError::Database(sqlx::Error::Decode(Box::new(e))))
}

/// One validated entry of a day's batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

/// Attendance for one day joined with the student's roster details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAttendance {
    pub student_id: i64,
    pub name: String,
    pub roll_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub status: AttendanceStatus,
}

/// One day of a single student's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentAttendance {
    pub date: String,
    pub status: AttendanceStatus,
    pub name: String,
    pub roll_number: String,
}

/// Storage key for a calendar date (`YYYY-MM-DD`). Sorts chronologically as text.
#[must_use]
pub fn date_key(date: Date) -> String {
    // The format has no components that can fail for a valid `Date`.
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

// =============================================================================
// WRITES
// =============================================================================

/// Save a day's attendance atomically. Returns the number of rows written.
///
/// # Errors
///
/// Returns `DbError::UnknownStudent` if any mark names a missing student, or a
/// database error if the transaction fails. In both cases nothing is persisted.
pub async fn insert_batch(pool: &SqlitePool, date: Date, marks: &[AttendanceMark]) -> Result<usize, DbError> {
    let day = date_key(date);
    let mut tx = pool.begin().await?;

    for mark in marks {
        let result = sqlx::query(
            r"INSERT INTO attendance (student_id, date, status)
              VALUES (?, ?, ?)
              ON CONFLICT (student_id, date) DO UPDATE SET status = excluded.status",
        )
        .bind(mark.student_id)
        .bind(&day)
        .bind(mark.status.as_str())
        .execute(tx.as_mut())
        .await;

        if let Err(e) = result {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, date = %day, "attendance rollback failed");
            }
            if is_foreign_key_violation(&e) {
                return Err(DbError::UnknownStudent(mark.student_id));
            }
            return Err(e.into());
        }
    }

    tx.commit().await?;
    Ok(marks.len())
}

// =============================================================================
// READS
// =============================================================================

/// Attendance recorded on `date`, ordered by student name.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn by_date(pool: &SqlitePool, date: Date) -> Result<Vec<DailyAttendance>, DbError> {
    let rows = sqlx::query_as::<_, (i64, String, String, String, String)>(
        r"SELECT s.id, s.name, s.roll_number, s.class, a.status
          FROM attendance a
          JOIN students s ON a.student_id = s.id
          WHERE a.date = ?
          ORDER BY s.name ASC, s.id ASC",
    )
    .bind(date_key(date))
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(student_id, name, roll_number, class_name, status)| {
            Ok(DailyAttendance { student_id, name, roll_number, class_name, status: decode_status(&status)? })
        })
        .collect()
}

/// Every recorded day for one student, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn by_student(pool: &SqlitePool, student_id: i64) -> Result<Vec<StudentAttendance>, DbError> {
    let rows = sqlx::query_as::<_, (String, String, String, String)>(
        r"SELECT a.date, a.status, s.name, s.roll_number
          FROM attendance a
          JOIN students s ON a.student_id = s.id
          WHERE a.student_id = ?
          ORDER BY a.date DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(date, status, name, roll_number)| {
            Ok(StudentAttendance { date, status: decode_status(&status)?, name, roll_number })
        })
        .collect()
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
