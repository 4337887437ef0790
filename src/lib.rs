//! Ledger API
//!
//! Personal finance bookkeeping backend:
//! - Income and expense entries with ordered validation rules
//! - User registration and password authentication
//! - Per-user search and settled balance
//! - PostgreSQL or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::entry::{EntryService, PostgresEntryRepository};
use infrastructure::storage::{
    connect_pool, run_storage_migrations, PostgresStorageProbe, StorageConfig,
};
use infrastructure::user::{Argon2Hasher, PostgresUserRepository, UserService};

/// Build the application state for the configured storage backend
///
/// PostgreSQL schemas are migrated before the state is returned.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Argon2Hasher::with_cost(config.password.cost())?;

    match config.storage_config()? {
        StorageConfig::InMemory => {
            info!("Using in-memory storage");
            Ok(AppState::in_memory_with_hasher(hasher))
        }
        StorageConfig::Postgres(pg_config) => {
            let pool = connect_pool(&pg_config).await?;

            let applied = run_storage_migrations(&pool).await?;
            info!(applied, "Using PostgreSQL storage");

            let entries = Arc::new(PostgresEntryRepository::new(pool.clone()));
            let users = Arc::new(PostgresUserRepository::new(pool.clone()));

            Ok(AppState::new(
                Arc::new(EntryService::new(entries)),
                Arc::new(UserService::new(users, Arc::new(hasher))),
                Arc::new(PostgresStorageProbe::new(pool)),
            ))
        }
    }
}
