//! Country domain

mod entity;
mod repository;

pub use entity::{Country, CountryId};
pub use repository::CountryRepository;

#[cfg(test)]
pub use repository::MockCountryRepository;
