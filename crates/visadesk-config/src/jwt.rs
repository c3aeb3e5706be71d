//! Session token signing configuration.
//!
//! The signing secret is read once at process start and kept immutable in the
//! application state. Rotating `JWT_SECRET` and restarting invalidates every
//! token issued under the previous secret.

use std::env;

pub const DEFAULT_DEV_SECRET: &str = "visadesk-dev-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, access_token_expiry: i64) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry,
        }
    }

    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DEV_SECRET.to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v: &i64| *v > 0)
                .unwrap_or(3600), // 1 hour
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_DEV_SECRET
    }
}
