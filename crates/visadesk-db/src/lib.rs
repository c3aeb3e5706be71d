//! # VisaDesk DB
//!
//! Persistence for identities and visa applications.
//!
//! - [`repository`]: The [`UserRepository`] and [`ApplicationRepository`] traits
//! - [`postgres`]: PostgreSQL implementation over a [`PgPool`]
//! - [`memory`]: In-process implementation for development and tests
//!
//! Every create and update is a single SQL statement (or a single write-lock
//! section in the memory store), so a partially applied write is never
//! observable.
//!
//! # Example
//!
//! ```ignore
//! use visadesk_config::StorageConfig;
//! use visadesk_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&StorageConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

pub mod memory;
pub mod postgres;
pub mod repository;

use anyhow::{Context, anyhow};
use sqlx::postgres::PgPoolOptions;
use visadesk_config::StorageConfig;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{ApplicationRepository, UserRepository};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connect a PostgreSQL pool using `DATABASE_URL` and
/// `DATABASE_MAX_CONNECTIONS` from the storage config.
pub async fn init_db_pool(config: &StorageConfig) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow!("DATABASE_URL must be set for the postgres storage backend"))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Apply the embedded migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
