//! # VisaDesk Auth
//!
//! Session token issuance and verification.
//!
//! - [`claims`]: The identity claims carried by a session token
//! - [`jwt`]: HS256 signing and verification against the process-wide secret
//!
//! A token is valid when its signature checks out under the configured secret
//! and `now < exp`. There is no revocation list; tokens die by expiry or by
//! rotating the secret.
//!
//! # Example
//!
//! ```ignore
//! use visadesk_auth::{create_access_token, verify_token};
//! use visadesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user.id, &user.email, user.role, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user.id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, encode_claims, verify_token};
