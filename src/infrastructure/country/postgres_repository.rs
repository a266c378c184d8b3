//! PostgreSQL country repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::country::{Country, CountryId, CountryRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of CountryRepository
#[derive(Debug, Clone)]
pub struct PostgresCountryRepository {
    pool: PgPool,
}

impl PostgresCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PostgresCountryRepository {
    async fn list(&self) -> Result<Vec<Country>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM countries ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list countries: {}", e)))?;

        rows.iter()
            .map(|row| {
                let id: i64 = row
                    .try_get("id")
                    .map_err(|e| DomainError::storage(format!("Invalid country row: {}", e)))?;
                let name: String = row
                    .try_get("name")
                    .map_err(|e| DomainError::storage(format!("Invalid country row: {}", e)))?;

                Ok(Country::new(CountryId::new(id), name))
            })
            .collect()
    }

    async fn exists(&self, id: CountryId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM countries WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check country: {}", e)))
    }
}
