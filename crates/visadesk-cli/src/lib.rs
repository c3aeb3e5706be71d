//! # VisaDesk CLI
//!
//! Operator tooling used by the `visadesk-cli` binary: admin bootstrap and
//! fake data for development databases.
//!
//! ```ignore
//! use visadesk_cli::seeder::{SeedConfig, seed};
//!
//! let summary = seed(&store, &store, SeedConfig::new(10, 3)).await?;
//! ```

pub mod seeder;
