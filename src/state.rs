//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the storage handle every service receives explicitly, plus the
//! hashing policy for new password digests. There is no per-request state.

use sqlx::SqlitePool;

use crate::services::password::PasswordPolicy;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; `SqlitePool` is an `Arc` internally.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub passwords: PasswordPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool, passwords: PasswordPolicy) -> Self {
        Self { pool, passwords }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
