//! `students` table queries.

use serde::Serialize;
use sqlx::SqlitePool;

use super::{DbError, is_unique_violation};

/// Roster row. Serialized with the `class` key the browser UI expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
}

/// List every student ordered by name.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Student>, DbError> {
    let rows = sqlx::query_as::<_, (i64, String, String, String)>(
        "SELECT id, name, roll_number, class FROM students ORDER BY name ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, roll_number, class_name)| Student { id, name, roll_number, class_name })
        .collect())
}

/// Insert a student.
///
/// # Errors
///
/// Returns `DbError::RollNumberTaken` when the roll number is already used, or
/// a database error if the insert fails for another reason.
pub async fn insert(pool: &SqlitePool, name: &str, roll_number: &str, class_name: &str) -> Result<Student, DbError> {
    let result = sqlx::query("INSERT INTO students (name, roll_number, class) VALUES (?, ?, ?)")
        .bind(name)
        .bind(roll_number)
        .bind(class_name)
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(Student {
            id: done.last_insert_rowid(),
            name: name.to_owned(),
            roll_number: roll_number.to_owned(),
            class_name: class_name.to_owned(),
        }),
        Err(e) if is_unique_violation(&e) => Err(DbError::RollNumberTaken(roll_number.to_owned())),
        Err(e) => Err(e.into()),
    }
}
