use axum::body::to_bytes;
use serde_json::json;

use super::test_support::get_json;
use super::*;
use crate::db::DbError;
use crate::services::account::AccountError;
use crate::services::roster::RosterError;
use crate::state::test_helpers::test_app_state;

async fn body_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// envelope helpers
// =============================================================================

#[tokio::test]
async fn success_message_shape() {
    let (status, body) = body_json(success_message("done")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "done"}));
}

#[tokio::test]
async fn success_with_adds_fields() {
    let (status, body) = body_json(success_with([("records", json!([1, 2])), ("date", json!("2024-01-01"))])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "records": [1, 2], "date": "2024-01-01"}));
}

#[tokio::test]
async fn failure_echoes_user_facing_errors() {
    let (status, body) = body_json(failure(&RosterError::DuplicateRollNumber, "unused")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "A student with this roll number already exists."}));

    let (status, body) = body_json(failure(&AccountError::InvalidCredentials, "unused")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Invalid username or password.");
}

#[tokio::test]
async fn failure_hides_storage_details() {
    let err = AccountError::Database(DbError::Database(sqlx::Error::PoolClosed));
    let (status, body) = body_json(failure(&err, SERVER_ERROR_MESSAGE)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "message": "Server error. Please try again."}));
}

// =============================================================================
// router
// =============================================================================

#[tokio::test]
async fn healthz_is_ok() {
    let state = test_app_state().await;
    let response = tower::ServiceExt::oneshot(
        app(state, None),
        axum::http::Request::get("/healthz").body(axum::body::Body::empty()).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_without_static_dir_is_not_found() {
    let state = test_app_state().await;
    let (status, _) = get_json(app(state, None), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn closed_pool_surfaces_generic_server_error() {
    let state = test_app_state().await;
    state.pool.close().await;

    let (status, body) = get_json(app(state, None), "/students").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "message": "Failed to fetch students."}));
}

#[tokio::test]
async fn static_dir_serves_index_as_fallback() {
    let dir = std::env::temp_dir().join(format!("rollcall-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Attendance</h1>").unwrap();

    let state = test_app_state().await;
    let response = tower::ServiceExt::oneshot(
        app(state, Some(dir.as_path())),
        axum::http::Request::get("/").body(axum::body::Body::empty()).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Attendance</h1>");

    let _ = std::fs::remove_dir_all(&dir);
}
