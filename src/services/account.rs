//! Account service: registration, login, and the default teacher seed.
//!
//! Login reports "no such user" and "wrong password" as the same
//! `InvalidCredentials` error. No session is created here.

use sqlx::SqlitePool;
use tracing::info;

use crate::db::{self, DbError, accounts::Account};
use crate::services::password::{self, PasswordPolicy};
use crate::services::{ErrorClass, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Username and password are required.")]
    MissingFields,
    #[error("Passwords do not match.")]
    Mismatch,
    #[error("Username already exists. Please choose another.")]
    UsernameTaken,
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ErrorClass for AccountError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFields | Self::Mismatch => ErrorKind::Validation,
            Self::UsernameTaken => ErrorKind::Conflict,
            Self::InvalidCredentials => ErrorKind::NotFound,
            Self::Hashing(_) | Self::Database(_) => ErrorKind::Storage,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFields => "E_ACCOUNT_MISSING_FIELDS",
            Self::Mismatch => "E_ACCOUNT_PASSWORD_MISMATCH",
            Self::UsernameTaken => "E_ACCOUNT_USERNAME_TAKEN",
            Self::InvalidCredentials => "E_ACCOUNT_INVALID_CREDENTIALS",
            Self::Hashing(_) => "E_ACCOUNT_HASHING",
            Self::Database(_) => "E_DATABASE",
        }
    }
}

pub const REGISTERED_MESSAGE: &str = "Registration successful! You can now login.";
pub const LOGGED_IN_MESSAGE: &str = "Login successful!";

/// Create an account after checking the confirmation and uniqueness.
///
/// # Errors
///
/// `MissingFields` for a blank username or empty password, `Mismatch` when the
/// confirmation differs, `UsernameTaken` for an existing username, `Hashing`
/// when the digest cannot be computed, or a database error.
pub async fn register(
    pool: &SqlitePool,
    policy: PasswordPolicy,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Account, AccountError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields);
    }
    if password != confirm_password {
        return Err(AccountError::Mismatch);
    }
    if db::accounts::find_by_username(pool, username).await?.is_some() {
        return Err(AccountError::UsernameTaken);
    }

    let digest = policy.hash(password)?;
    // A concurrent registration can still win the race; the unique index catches it.
    let account = match db::accounts::insert(pool, username, &digest).await {
        Ok(account) => account,
        Err(DbError::UsernameTaken(_)) => return Err(AccountError::UsernameTaken),
        Err(e) => return Err(e.into()),
    };

    info!(account_id = account.id, username = %account.username, "account registered");
    Ok(account)
}

/// Check a username/password pair.
///
/// # Errors
///
/// `InvalidCredentials` when the user is unknown or the password does not
/// verify, or a database error.
pub async fn login(pool: &SqlitePool, username: &str, password: &str) -> Result<Account, AccountError> {
    let Some(account) = db::accounts::find_by_username(pool, username.trim()).await? else {
        return Err(AccountError::InvalidCredentials);
    };
    if !password::verify(password, &account.password_digest) {
        return Err(AccountError::InvalidCredentials);
    }

    info!(account_id = account.id, "login succeeded");
    Ok(account)
}

/// Seed the default teacher account if it does not exist yet.
/// Returns `true` when the account was created by this call.
///
/// # Errors
///
/// Returns a hashing or database error if the digest, lookup or insert fails.
pub async fn ensure_default_account(
    pool: &SqlitePool,
    policy: PasswordPolicy,
    username: &str,
    password: &str,
) -> Result<bool, AccountError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields);
    }
    if db::accounts::find_by_username(pool, username).await?.is_some() {
        info!(%username, "default account already exists");
        return Ok(false);
    }

    let created = db::accounts::insert_if_absent(pool, username, &policy.hash(password)?).await?;
    if created {
        info!(%username, "default account created");
    }
    Ok(created)
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
