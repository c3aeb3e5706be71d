//! Password hashing and verification.
//!
//! Passwords are hashed with bcrypt (salted, adaptive cost). The raw password
//! is only ever held in memory for the duration of a call.

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hash checked when the looked-up identity does not exist, so that an unknown
/// email costs one bcrypt verification just like a wrong password does.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("visadesk-timing-equalizer", DEFAULT_COST).ok());

/// Compute the dummy hash now rather than on the first unknown-email login.
/// Returns `false` if it could not be computed.
pub fn prepare_dummy_hash() -> bool {
    LazyLock::force(&DUMMY_HASH).is_some()
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Verify `password` against `stored` if present, otherwise against a dummy
/// hash. Returns `true` only when a stored hash exists and matches.
pub fn verify_password_or_dummy(password: &str, stored: Option<&str>) -> Result<bool, AppError> {
    match stored {
        Some(hash) => verify_password(password, hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify(password, dummy);
            }
            Ok(false)
        }
    }
}
