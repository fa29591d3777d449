//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and business rules and call into `db` for
//! persistence, so route handlers can stay focused on protocol translation.
//! Every service function takes the storage handle as an argument and keeps
//! nothing between calls.
//!
//! ERROR HANDLING
//! ==============
//! Each service has its own error enum. `ErrorClass` sorts those variants into
//! the four kinds the HTTP layer cares about: user-correctable validation and
//! conflict failures are reported back verbatim, storage failures are logged
//! and replaced with a generic message.

pub mod account;
pub mod attendance;
pub mod password;
pub mod roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or inconsistent input.
    Validation,
    /// Uniqueness rule violated.
    Conflict,
    /// Lookup failed; also used for bad credentials.
    NotFound,
    /// Underlying persistence failure.
    Storage,
}

/// Classification shared by every service error. `Display` is the
/// user-facing message for every kind except `Storage`.
pub trait ErrorClass: std::fmt::Display {
    fn kind(&self) -> ErrorKind;

    /// Grepable code for logs.
    fn error_code(&self) -> &'static str;
}
