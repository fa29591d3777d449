//! Router assembly and the JSON reply envelope.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON endpoints the browser UI calls and, when a
//! static directory is configured, serves the UI itself as the fallback.
//!
//! Once a request has been extracted, every endpoint answers with
//! `{"success": bool, "message"?: string, ...}`. Validation, conflict, and
//! credential failures are ordinary `200` replies with `success: false`;
//! storage failures are `500` with a generic message.
//!
//! Requests the extractors refuse (malformed JSON, a body missing a required
//! field, a non-numeric path id) never reach a handler and get axum's plain
//! text `4xx` rejection instead.

pub mod account;
pub mod attendance;
pub mod students;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::services::{ErrorClass, ErrorKind};
use crate::state::AppState;

/// Generic reply for storage failures that have no route-specific wording.
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again.";

/// JSON API routes.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/students", get(students::list_students))
        .route("/add-student", post(students::add_student))
        .route("/save-attendance", post(attendance::save_attendance))
        .route("/attendance/by-date/{date}", get(attendance::by_date))
        .route("/attendance/by-student/{student_id}", get(attendance::by_student))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// API routes plus, when `static_dir` is set, the browser UI as fallback.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = api_routes(state);
    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// REPLY ENVELOPE
// =============================================================================

/// `{"success": true, "message": ...}`.
pub(crate) fn success_message(message: impl Into<String>) -> Response {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert("message".into(), Value::String(message.into()));
    Json(Value::Object(body)).into_response()
}

/// `{"success": true, <key>: <value>, ...}` for query results.
pub(crate) fn success_with(fields: impl IntoIterator<Item = (&'static str, Value)>) -> Response {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    for (key, value) in fields {
        body.insert(key.into(), value);
    }
    Json(Value::Object(body)).into_response()
}

/// Render a service error. User-correctable errors echo their message;
/// storage errors are logged and replaced with `storage_message`.
pub(crate) fn failure(err: &(impl ErrorClass + ?Sized), storage_message: &str) -> Response {
    let (status, message) = match err.kind() {
        ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::NotFound => (StatusCode::OK, err.to_string()),
        ErrorKind::Storage => {
            error!(code = err.error_code(), error = %err, "request failed on storage");
            (StatusCode::INTERNAL_SERVER_ERROR, storage_message.to_owned())
        }
    };

    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(false));
    body.insert("message".into(), Value::String(message));
    (status, Json(Value::Object(body))).into_response()
}


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
