use std::sync::Arc;

use anyhow::Context;
use visadesk_config::{JwtConfig, LifecycleConfig, RegistrationConfig, StorageBackend, StorageConfig};
use visadesk_core::prepare_dummy_hash;
use visadesk_db::{
    ApplicationRepository, MemoryStore, PgStore, UserRepository, init_db_pool, run_migrations,
};

/// Shared per-request state. Configs are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub jwt_config: JwtConfig,
    pub lifecycle_config: LifecycleConfig,
    pub registration_config: RegistrationConfig,
}

impl AppState {
    /// Build state over a single store that serves both collections.
    pub fn with_store<S>(
        store: S,
        jwt_config: JwtConfig,
        lifecycle_config: LifecycleConfig,
        registration_config: RegistrationConfig,
    ) -> Self
    where
        S: UserRepository + ApplicationRepository + 'static,
    {
        if !prepare_dummy_hash() {
            tracing::warn!("Could not precompute the login dummy hash");
        }

        let store = Arc::new(store);
        Self {
            users: store.clone(),
            applications: store,
            jwt_config,
            lifecycle_config,
            registration_config,
        }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory(jwt_config: JwtConfig, lifecycle_config: LifecycleConfig) -> Self {
        Self::with_store(
            MemoryStore::new(),
            jwt_config,
            lifecycle_config,
            RegistrationConfig::default(),
        )
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_env();
    let jwt_config = JwtConfig::from_env();
    let lifecycle_config = LifecycleConfig::from_env();
    let registration_config = RegistrationConfig::from_env();

    tracing::info!(
        backend = ?storage_config.backend,
        transition_policy = ?lifecycle_config.transition_policy,
        "Initializing application state"
    );

    let state = match storage_config.backend {
        StorageBackend::Postgres => {
            let pool = init_db_pool(&storage_config).await?;
            run_migrations(&pool)
                .await
                .context("Database is not ready")?;
            AppState::with_store(
                PgStore::new(pool),
                jwt_config,
                lifecycle_config,
                registration_config,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            AppState::with_store(
                MemoryStore::new(),
                jwt_config,
                lifecycle_config,
                registration_config,
            )
        }
    };

    Ok(state)
}
