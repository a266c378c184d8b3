//! Domain layer - Core entities, rules and repository traits

pub mod country;
pub mod error;
pub mod user;
pub mod validation;

pub use country::{Country, CountryId, CountryRepository};
pub use error::DomainError;
pub use user::{CurrentUser, NewUser, User, UserId, UserRepository};
pub use validation::{FieldErrors, FormParams, RuleSet, Validation};
