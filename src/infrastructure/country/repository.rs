//! In-memory country repository implementation

use async_trait::async_trait;

use crate::domain::country::{Country, CountryId, CountryRepository};
use crate::domain::DomainError;

/// Seed list shared by the in-memory backend and the countries migration
pub const DEFAULT_COUNTRIES: &[(i64, &str)] = &[
    (1, "Australia"),
    (2, "Brazil"),
    (3, "Canada"),
    (4, "France"),
    (5, "Germany"),
    (6, "India"),
    (7, "Japan"),
    (8, "Poland"),
    (9, "United Kingdom"),
    (10, "United States"),
];

pub fn default_countries() -> Vec<Country> {
    DEFAULT_COUNTRIES
        .iter()
        .map(|&(id, name)| Country::new(CountryId::new(id), name))
        .collect()
}

/// Fixed country list held in memory
#[derive(Debug, Clone)]
pub struct InMemoryCountryRepository {
    countries: Vec<Country>,
}

impl InMemoryCountryRepository {
    /// Create a repository with the given countries, sorted by name
    pub fn with_countries(mut countries: Vec<Country>) -> Self {
        countries.sort_by(|a, b| a.name().cmp(b.name()));
        Self { countries }
    }
}

impl Default for InMemoryCountryRepository {
    fn default() -> Self {
        Self::with_countries(default_countries())
    }
}

#[async_trait]
impl CountryRepository for InMemoryCountryRepository {
    async fn list(&self) -> Result<Vec<Country>, DomainError> {
        Ok(self.countries.clone())
    }

    async fn exists(&self, id: CountryId) -> Result<bool, DomainError> {
        Ok(self.countries.iter().any(|c| c.id() == id))
    }
}
