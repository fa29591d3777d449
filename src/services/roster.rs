//! Roster service: register and list students.

use sqlx::SqlitePool;
use tracing::info;

use crate::db::{self, DbError, students::Student};
use crate::services::{ErrorClass, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Name, roll number and class are required.")]
    MissingFields,
    #[error("A student with this roll number already exists.")]
    DuplicateRollNumber,
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ErrorClass for RosterError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFields => ErrorKind::Validation,
            Self::DuplicateRollNumber => ErrorKind::Conflict,
            Self::Database(_) => ErrorKind::Storage,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFields => "E_ROSTER_MISSING_FIELDS",
            Self::DuplicateRollNumber => "E_ROSTER_DUPLICATE_ROLL_NUMBER",
            Self::Database(_) => "E_DATABASE",
        }
    }
}

/// Confirmation shown after a successful `add_student`.
#[must_use]
pub fn added_message(student: &Student) -> String {
    format!("Student '{}' added successfully!", student.name)
}

/// Register a student. Fields are trimmed before storage.
///
/// # Errors
///
/// `MissingFields` when any field is blank, `DuplicateRollNumber` when the
/// roll number is in use, or a database error.
pub async fn add_student(
    pool: &SqlitePool,
    name: &str,
    roll_number: &str,
    class_name: &str,
) -> Result<Student, RosterError> {
    let (name, roll_number, class_name) = (name.trim(), roll_number.trim(), class_name.trim());
    if name.is_empty() || roll_number.is_empty() || class_name.is_empty() {
        return Err(RosterError::MissingFields);
    }

    match db::students::insert(pool, name, roll_number, class_name).await {
        Ok(student) => {
            info!(student_id = student.id, roll_number = %student.roll_number, "student added");
            Ok(student)
        }
        Err(DbError::RollNumberTaken(_)) => Err(RosterError::DuplicateRollNumber),
        Err(e) => Err(e.into()),
    }
}

/// All students, ordered by name.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>, RosterError> {
    Ok(db::students::list(pool).await?)
}

#[cfg(test)]
#[path = "roster_test.rs"]
mod tests;
