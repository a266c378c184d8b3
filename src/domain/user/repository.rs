//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations enforce uniqueness of `login` and `email` on insert and
/// report a violation as [`DomainError::FieldConflict`] naming the field.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Find a user by exact login
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a user, assigning its id
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Check whether a login is taken
    async fn login_exists(&self, login: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_login(login).await?.is_some())
    }

    /// Check whether an email is taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
