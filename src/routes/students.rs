//! Roster routes.

use axum::extract::State;
use axum::response::{Json, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::routes::{failure, success_message, success_with};
use crate::services::roster;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddStudentBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
}

/// `GET /students`: every student, ordered by name.
pub async fn list_students(State(state): State<AppState>) -> Response {
    match roster::list_students(&state.pool).await {
        Ok(students) => success_with([("students", serde_json::to_value(students).unwrap_or(Value::Null))]),
        Err(e) => failure(&e, "Failed to fetch students."),
    }
}

/// `POST /add-student`: register a student.
pub async fn add_student(State(state): State<AppState>, Json(body): Json<AddStudentBody>) -> Response {
    match roster::add_student(&state.pool, &body.name, &body.roll_number, &body.class_name).await {
        Ok(student) => success_message(roster::added_message(&student)),
        Err(e) => failure(&e, "Failed to add student. Please try again."),
    }
}

#[cfg(test)]
#[path = "students_test.rs"]
mod tests;
