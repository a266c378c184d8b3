//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::country::CountryId;
use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Unique constraint names created by the users migration
const LOGIN_CONSTRAINT: &str = "users_login_unique";
const EMAIL_CONSTRAINT: &str = "users_email_unique";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: Column, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!(
            r#"
            SELECT id, login, email, password_hash, country_id, created_at
            FROM users
            WHERE {} = $1
            "#,
            column.as_str()
        );

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to get user by {}: {}", column.as_str(), e))
            })?;

        row.as_ref().map(row_to_user).transpose()
    }
}

/// Columns users can be looked up by
#[derive(Debug, Clone, Copy)]
enum Column {
    Login,
    Email,
}

impl Column {
    fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Email => "email",
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        self.find_one(Column::Login, login).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one(Column::Email, email).await
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (login, email, password_hash, country_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, login, email, password_hash, country_id, created_at
            "#,
        )
        .bind(&user.login)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.country_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &user))?;

        row_to_user(&row)
    }

    async fn login_exists(&self, login: &str) -> Result<bool, DomainError> {
        exists(&self.pool, "SELECT EXISTS(SELECT 1 FROM users WHERE login = $1)", login).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        exists(&self.pool, "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)", email).await
    }
}

async fn exists(pool: &PgPool, sql: &str, value: &str) -> Result<bool, DomainError> {
    sqlx::query_scalar(sql)
        .bind(value)
        .fetch_one(pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check user existence: {}", e)))
}

fn map_insert_error(error: sqlx::Error, user: &NewUser) -> DomainError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            match db_error.constraint() {
                Some(LOGIN_CONSTRAINT) => {
                    return DomainError::field_conflict(
                        "login",
                        format!("Login '{}' already exists", user.login),
                    );
                }
                Some(EMAIL_CONSTRAINT) => {
                    return DomainError::field_conflict(
                        "email",
                        format!("Email '{}' already exists", user.email),
                    );
                }
                _ => {}
            }
        }

        if db_error.is_foreign_key_violation() {
            return DomainError::field_conflict(
                "country_id",
                format!("Country '{}' does not exist", user.country_id),
            );
        }
    }

    DomainError::storage(format!("Failed to create user: {}", error))
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid user row: {}", e));

    Ok(User::new(
        UserId::new(row.try_get("id").map_err(read)?),
        row.try_get::<String, _>("login").map_err(read)?,
        row.try_get::<String, _>("email").map_err(read)?,
        row.try_get::<String, _>("password_hash").map_err(read)?,
        CountryId::new(row.try_get("country_id").map_err(read)?),
        row.try_get("created_at").map_err(read)?,
    ))
}
