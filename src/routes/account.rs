//! Account routes: registration and login.

use axum::extract::State;
use axum::response::{Json, Response};
use serde::Deserialize;

use crate::routes::{SERVER_ERROR_MESSAGE, failure, success_message};
use crate::services::account as account_svc;
use crate::state::AppState;

/// Missing fields deserialize as empty strings so the service can answer
/// with its own validation message.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /register`: create a teacher account.
pub async fn register(State(state): State<AppState>, Json(body): Json<RegisterBody>) -> Response {
    match account_svc::register(&state.pool, state.passwords, &body.username, &body.password, &body.confirm_password)
        .await
    {
        Ok(_) => success_message(account_svc::REGISTERED_MESSAGE),
        Err(e) => failure(&e, SERVER_ERROR_MESSAGE),
    }
}

/// `POST /login`: check credentials. No session is issued.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Response {
    match account_svc::login(&state.pool, &body.username, &body.password).await {
        Ok(_) => success_message(account_svc::LOGGED_IN_MESSAGE),
        Err(e) => failure(&e, SERVER_ERROR_MESSAGE),
    }
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
