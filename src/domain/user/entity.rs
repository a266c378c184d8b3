//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::country::CountryId;

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered site account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    login: String,
    email: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    country_id: CountryId,
    created_at: DateTime<Utc>,
}

impl User {
    /// Rebuild a user from stored columns
    pub fn new(
        id: UserId,
        login: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        country_id: CountryId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            login: login.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            country_id,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn country_id(&self) -> CountryId {
        self.country_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user that has passed sign-up checks but has no id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub country_id: CountryId,
}

impl NewUser {
    /// Assign the store id, stamping the creation time
    pub fn into_user(self, id: UserId) -> User {
        User::new(
            id,
            self.login,
            self.email,
            self.password_hash,
            self.country_id,
            Utc::now(),
        )
    }
}

/// Session copy of an authenticated user, without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub country_id: CountryId,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            email: user.email.clone(),
            country_id: user.country_id,
        }
    }
}
