//! Storage infrastructure - backend selection, pooling and migrations

pub mod migrations;
mod postgres;

use std::sync::Arc;

use tracing::info;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::domain::{CountryRepository, DomainError, UserRepository};
use crate::infrastructure::country::{InMemoryCountryRepository, PostgresCountryRepository};
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

pub use migrations::{revert_latest_migration, run_migrations, schema_migrations, Migration, PostgresMigrator};
pub use postgres::{connect, PostgresConfig};

/// Repositories for the configured backend
#[derive(Debug, Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub countries: Arc<dyn CountryRepository>,
}

impl Stores {
    /// In-memory stores seeded with the default countries
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            countries: Arc::new(InMemoryCountryRepository::default()),
        }
    }

    /// Open the configured backend; postgres is migrated before use
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DomainError> {
        info!(backend = ?config.backend, "Opening storage");

        match config.backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::Postgres => {
                let pool = connect(&PostgresConfig::from_database_config(config)?).await?;
                run_migrations(&pool).await?;

                Ok(Self {
                    users: Arc::new(PostgresUserRepository::new(pool.clone())),
                    countries: Arc::new(PostgresCountryRepository::new(pool)),
                })
            }
        }
    }
}
