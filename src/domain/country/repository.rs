//! Country repository trait

use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use super::entity::{Country, CountryId};
use crate::domain::DomainError;

/// Read-only access to the country list
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync + Debug {
    /// All countries, ordered by name
    async fn list(&self) -> Result<Vec<Country>, DomainError>;

    /// Check whether a country id exists
    async fn exists(&self, id: CountryId) -> Result<bool, DomainError>;
}
