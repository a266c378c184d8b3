//! User domain
//!
//! Account entities and the repository trait used for registration and
//! sign-in.

mod entity;
mod repository;

pub use entity::{CurrentUser, NewUser, User, UserId};
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::MockUserRepository;
