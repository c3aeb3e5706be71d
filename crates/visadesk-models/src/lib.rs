//! # VisaDesk Models
//!
//! Domain models and DTOs shared by the server, the storage layer and the CLI.
//!
//! - [`ids`]: Strongly-typed UUID identifiers
//! - [`value_types`]: Validated value types (`Email`)
//! - [`users`]: Identities, roles and identity views
//! - [`auth`]: Register/login requests and responses
//! - [`applications`]: Visa applications and their status

pub mod applications;
pub mod auth;
pub mod ids;
pub mod users;
pub mod value_types;

pub use ids::{ApplicationId, UserId};
pub use value_types::{Email, ValueTypeError};
