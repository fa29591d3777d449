//! `users` table queries.

use sqlx::SqlitePool;

use super::{DbError, is_unique_violation};

/// A teacher account. The digest never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_digest: String,
}

/// Look up an account by exact username.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<Account>, DbError> {
    let row = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, username, password_digest FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, username, password_digest)| Account { id, username, password_digest }))
}

/// Insert a new account.
///
/// # Errors
///
/// Returns `DbError::UsernameTaken` when the username already exists, or a
/// database error if the insert fails for another reason.
pub async fn insert(pool: &SqlitePool, username: &str, password_digest: &str) -> Result<Account, DbError> {
    let result = sqlx::query("INSERT INTO users (username, password_digest) VALUES (?, ?)")
        .bind(username)
        .bind(password_digest)
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(Account {
            id: done.last_insert_rowid(),
            username: username.to_owned(),
            password_digest: password_digest.to_owned(),
        }),
        Err(e) if is_unique_violation(&e) => Err(DbError::UsernameTaken(username.to_owned())),
        Err(e) => Err(e.into()),
    }
}

/// Insert an account unless the username is already present.
/// Returns `true` when a row was created.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn insert_if_absent(pool: &SqlitePool, username: &str, password_digest: &str) -> Result<bool, DbError> {
    let done = sqlx::query("INSERT OR IGNORE INTO users (username, password_digest) VALUES (?, ?)")
        .bind(username)
        .bind(password_digest)
        .execute(pool)
        .await?;
    Ok(done.rows_affected() > 0)
}
