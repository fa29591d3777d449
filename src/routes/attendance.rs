//! Attendance routes: save a day and query by date or student.

use axum::extract::{Path, State};
use axum::response::{Json, Response};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::routes::{failure, success_message, success_with};
use crate::services::attendance::{self as attendance_svc, AttendanceEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveAttendanceBody {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub attendance: Vec<EntryBody>,
}

#[derive(Debug, Deserialize)]
pub struct EntryBody {
    #[serde(deserialize_with = "student_id_from_number_or_string")]
    pub student_id: i64,
    pub status: String,
}

/// The browser UI reads ids out of element names, so they arrive as strings.
fn student_id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("student_id is not an integer: {text:?}"))),
    }
}

/// `POST /save-attendance`: save one day's batch atomically.
pub async fn save_attendance(State(state): State<AppState>, Json(body): Json<SaveAttendanceBody>) -> Response {
    let entries: Vec<AttendanceEntry> = body
        .attendance
        .into_iter()
        .map(|e| AttendanceEntry { student_id: e.student_id, status: e.status })
        .collect();

    match attendance_svc::record_attendance(&state.pool, &body.date, &entries).await {
        Ok(_) => success_message(attendance_svc::SAVED_MESSAGE),
        Err(e) => failure(&e, "Error saving attendance."),
    }
}

/// `GET /attendance/by-date/{date}`: one day, ordered by student name.
pub async fn by_date(State(state): State<AppState>, Path(date): Path<String>) -> Response {
    match attendance_svc::query_by_date(&state.pool, &date).await {
        Ok(rows) => success_with([
            ("attendance", serde_json::to_value(rows).unwrap_or(Value::Null)),
            ("date", Value::String(date)),
        ]),
        Err(e) => failure(&e, "Failed to fetch attendance."),
    }
}

/// `GET /attendance/by-student/{student_id}`: history, newest first.
pub async fn by_student(State(state): State<AppState>, Path(student_id): Path<i64>) -> Response {
    match attendance_svc::query_by_student(&state.pool, student_id).await {
        Ok(rows) => success_with([("records", serde_json::to_value(rows).unwrap_or(Value::Null))]),
        Err(e) => failure(&e, "Failed to fetch attendance."),
    }
}

#[cfg(test)]
#[path = "attendance_test.rs"]
mod tests;
