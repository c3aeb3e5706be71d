//! # VisaDesk Config
//!
//! Configuration types for the VisaDesk API, loaded from environment variables:
//!
//! - [`jwt`]: Session token signing secret and lifetime
//! - [`server`]: Listen address
//! - [`storage`]: Persistence backend and database pool
//! - [`lifecycle`]: Application status transition policy
//! - [`registration`]: Self-registration rules
//! - [`logging`]: Log level, format and file output
//!
//! # Example
//!
//! ```ignore
//! use visadesk_config::{JwtConfig, LifecycleConfig, StorageConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! let lifecycle_config = LifecycleConfig::from_env();
//! ```

pub mod jwt;
pub mod lifecycle;
pub mod logging;
pub mod registration;
pub mod server;
pub mod storage;

// Re-export commonly used types at crate root
pub use jwt::JwtConfig;
pub use lifecycle::{LifecycleConfig, TransitionPolicy};
pub use logging::{LogFormat, LoggingConfig};
pub use registration::RegistrationConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};
