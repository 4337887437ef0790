//! Storage infrastructure - backend selection, pooling and migrations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{StorageConfig, StorageType};
pub use in_memory::InMemoryStorageProbe;
pub use migrations::{run_storage_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::{connect_pool, PostgresConfig, PostgresStorageProbe};
