//! Runtime configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then builds an `AppConfig` once at
//! startup. Everything below reads through a lookup closure so tests can feed
//! values without touching the process environment.

use std::path::PathBuf;

use crate::services::password::{DEFAULT_COST, MAX_COST, MIN_COST};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://attendance.db";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_TEACHER_USERNAME: &str = "teacher";
pub const DEFAULT_TEACHER_PASSWORD: &str = "password123";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Credentials for the account seeded on first start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Directory served as the browser UI. `None` disables static serving.
    pub static_dir: Option<PathBuf>,
    /// `None` when `SEED_DEFAULT_ACCOUNT` is switched off.
    pub seed_account: Option<SeedAccount>,
    /// bcrypt cost for new password digests.
    pub hash_cost: u32,
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `DATABASE_URL`: default `sqlite://attendance.db`
    /// - `PORT`: default 3000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `STATIC_DIR`: unset disables static serving
    /// - `SEED_DEFAULT_ACCOUNT`: default on
    /// - `DEFAULT_TEACHER_USERNAME` / `DEFAULT_TEACHER_PASSWORD`
    /// - `PASSWORD_HASH_COST`: bcrypt cost, default 10, range 4..=31
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric or boolean variable does not parse or is
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric or boolean variable does not parse or is
    /// out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS)?;
        let hash_cost = parse_or("PASSWORD_HASH_COST", lookup("PASSWORD_HASH_COST"), DEFAULT_COST)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", value: "0".into() });
        }
        if !(MIN_COST..=MAX_COST).contains(&hash_cost) {
            return Err(ConfigError::Invalid { var: "PASSWORD_HASH_COST", value: hash_cost.to_string() });
        }

        let static_dir = lookup("STATIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let seed_enabled = match lookup("SEED_DEFAULT_ACCOUNT") {
            Some(raw) => {
                parse_bool(&raw).ok_or(ConfigError::Invalid { var: "SEED_DEFAULT_ACCOUNT", value: raw.clone() })?
            }
            None => true,
        };
        let seed_account = seed_enabled.then(|| SeedAccount {
            username: lookup("DEFAULT_TEACHER_USERNAME").unwrap_or_else(|| DEFAULT_TEACHER_USERNAME.to_owned()),
            password: lookup("DEFAULT_TEACHER_PASSWORD").unwrap_or_else(|| DEFAULT_TEACHER_PASSWORD.to_owned()),
        });

        Ok(Self { database_url, port, db_max_connections, static_dir, seed_account, hash_cost })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
