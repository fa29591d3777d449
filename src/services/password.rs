//! Password digests.
//!
//! DESIGN
//! ======
//! Digests are bcrypt strings (`$2b$<cost>$<salt+hash>`). The cost travels with
//! the digest, so raising `PASSWORD_HASH_COST` only affects new accounts.
//!
//! Verification never errors: a malformed digest simply fails to verify.

pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Hashing parameters for new digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub cost: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordPolicy {
    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns an error if the cost is outside bcrypt's range or the system
    /// random source fails.
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password, self.cost)
    }
}

/// Check a password against a stored digest.
#[must_use]
pub fn verify(password: &str, digest: &str) -> bool {
    bcrypt::verify(password, digest).unwrap_or(false)
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;
