//! # VisaDesk Core
//!
//! Core types, errors, and utilities for the VisaDesk API.
//!
//! - [`errors`]: Application error type with stable error kinds and HTTP conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde helpers (ISO-8601 dates)
//!
//! # Example
//!
//! ```ignore
//! use visadesk_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secret1")?;
//! assert!(verify_password("secret1", &hash)?);
//!
//! let error = AppError::not_found(anyhow::anyhow!("Application not found"));
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use password::{hash_password, prepare_dummy_hash, verify_password, verify_password_or_dummy};
