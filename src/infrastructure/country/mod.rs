//! Country infrastructure module

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresCountryRepository;
pub use repository::{default_countries, InMemoryCountryRepository, DEFAULT_COUNTRIES};
