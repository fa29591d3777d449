//! Persistence layer: pool setup, migrations, and per-table queries.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to open the shared SQLx pool and apply schema
//! migrations before accepting API traffic. Services receive the pool by
//! reference; nothing else in the crate touches SQL.
//!
//! ERROR HANDLING
//! ==============
//! Constraint violations that callers can act on (duplicate username, duplicate
//! roll number, unknown student) are lifted into their own `DbError` variants.
//! Everything else is wrapped as `DbError::Database`.

pub mod accounts;
pub mod attendance;
pub mod students;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("username already exists: {0}")]
    UsernameTaken(String),
    #[error("roll number already exists: {0}")]
    RollNumberTaken(String),
    #[error("student does not exist: {0}")]
    UnknownStudent(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Open the SQLite pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Apply embedded migrations. Safe to call repeatedly.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("src/db/migrations").run(pool).await?;
    Ok(())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
