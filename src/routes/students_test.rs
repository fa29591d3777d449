use axum::http::StatusCode;
use serde_json::json;

use crate::routes::app;
use crate::routes::test_support::{get_json, post_json};
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn add_student_then_list() {
    let state = test_app_state().await;

    let (status, body) = post_json(
        app(state.clone(), None),
        "/add-student",
        &json!({"name": "Ann", "roll_number": "R1", "class": "5A"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Student 'Ann' added successfully!"}));

    let (status, body) = get_json(app(state, None), "/students").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let students = body["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["name"], "Ann");
    assert_eq!(students[0]["roll_number"], "R1");
    assert_eq!(students[0]["class"], "5A");
    assert!(students[0]["id"].is_i64());
}

#[tokio::test]
async fn duplicate_roll_number_is_reported() {
    let state = test_app_state().await;
    post_json(app(state.clone(), None), "/add-student", &json!({"name": "Ann", "roll_number": "R1", "class": "5A"})).await;

    let (status, body) = post_json(
        app(state.clone(), None),
        "/add-student",
        &json!({"name": "Bob", "roll_number": "R1", "class": "5B"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "A student with this roll number already exists."}));

    let (_, listed) = get_json(app(state, None), "/students").await;
    assert_eq!(listed["students"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_roster_lists_empty_array() {
    let state = test_app_state().await;
    let (status, body) = get_json(app(state, None), "/students").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "students": []}));
}

#[tokio::test]
async fn missing_class_is_a_validation_reply() {
    let state = test_app_state().await;
    let (status, body) =
        post_json(app(state, None), "/add-student", &json!({"name": "Ann", "roll_number": "R1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "Name, roll number and class are required."}));
}
