//! User infrastructure module
//!
//! Password hashing with Argon2, in-memory and PostgreSQL user repositories,
//! and the account service behind the sign-up and sign-in pages.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{
    AccountService, Registration, EMAIL_TAKEN, INCORRECT_COUNTRY, LOGIN_TAKEN, SIGN_UP_EXCLUDED,
    SIGN_UP_RULES,
};
