//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct UserTable {
    users: Vec<User>,
    by_login: HashMap<String, usize>,
    by_email: HashMap<String, usize>,
}

/// In-memory implementation of UserRepository
///
/// A single lock covers the rows and both unique indexes, so the uniqueness
/// check and the insert are atomic.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.by_login.get(login).map(|&i| table.users[i].clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.by_email.get(email).map(|&i| table.users[i].clone()))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.by_login.contains_key(&user.login) {
            return Err(DomainError::field_conflict(
                "login",
                format!("Login '{}' already exists", user.login),
            ));
        }

        if table.by_email.contains_key(&user.email) {
            return Err(DomainError::field_conflict(
                "email",
                format!("Email '{}' already exists", user.email),
            ));
        }

        let index = table.users.len();
        let user = user.into_user(UserId::new(index as i64 + 1));

        table.by_login.insert(user.login().to_string(), index);
        table.by_email.insert(user.email().to_string(), index);
        table.users.push(user.clone());

        Ok(user)
    }
}
