use axum::http::StatusCode;
use serde_json::json;

use crate::routes::app;
use crate::routes::test_support::post_json;
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn register_then_login() {
    let state = test_app_state().await;

    let (status, body) = post_json(
        app(state.clone(), None),
        "/register",
        &json!({"username": "alice", "password": "pw-1", "confirmPassword": "pw-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Registration successful! You can now login."}));

    let (status, body) =
        post_json(app(state, None), "/login", &json!({"username": "alice", "password": "pw-1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Login successful!"}));
}

#[tokio::test]
async fn register_mismatch_is_reported() {
    let state = test_app_state().await;
    let (status, body) = post_json(
        app(state, None),
        "/register",
        &json!({"username": "alice", "password": "a", "confirmPassword": "b"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "Passwords do not match."}));
}

#[tokio::test]
async fn register_duplicate_username_is_reported() {
    let state = test_app_state().await;
    let payload = json!({"username": "alice", "password": "a", "confirmPassword": "a"});
    post_json(app(state.clone(), None), "/register", &payload).await;

    let (status, body) = post_json(app(state, None), "/register", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Username already exists. Please choose another.");
}

#[tokio::test]
async fn register_missing_fields_is_a_validation_reply() {
    let state = test_app_state().await;
    let (status, body) = post_json(app(state, None), "/register", &json!({"username": "alice"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "Username and password are required."}));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let state = test_app_state().await;
    post_json(
        app(state.clone(), None),
        "/register",
        &json!({"username": "alice", "password": "right", "confirmPassword": "right"}),
    )
    .await;

    let (_, wrong_password) =
        post_json(app(state.clone(), None), "/login", &json!({"username": "alice", "password": "wrong"})).await;
    let (_, unknown_user) =
        post_json(app(state, None), "/login", &json!({"username": "bob", "password": "right"})).await;

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password, json!({"success": false, "message": "Invalid username or password."}));
}

#[tokio::test]
async fn malformed_json_is_rejected_by_extractor() {
    let state = test_app_state().await;
    let request = axum::http::Request::post("/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, _) = crate::routes::test_support::send(app(state, None), request).await;
    assert!(status.is_client_error());
}
