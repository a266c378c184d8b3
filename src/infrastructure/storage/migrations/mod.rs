//! Database migrations infrastructure

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;
use crate::infrastructure::country::DEFAULT_COUNTRIES;

/// Applies versioned schema changes, tracked in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))
    }

    /// Apply a migration unless it is already recorded. Returns whether it ran.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let failed = |e: sqlx::Error| {
            DomainError::storage(format!("Failed to run migration {}: {}", migration.version, e))
        };

        let mut tx = self.pool.begin().await.map_err(failed)?;

        sqlx::raw_sql(&migration.up)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;

        tx.commit().await.map_err(failed)?;

        info!(version = migration.version, description = %migration.description, "Applied migration");
        Ok(true)
    }

    /// Revert a migration if it is recorded. Returns whether it ran.
    pub async fn revert_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let failed = |e: sqlx::Error| {
            DomainError::storage(format!(
                "Failed to revert migration {}: {}",
                migration.version, e
            ))
        };

        let mut tx = self.pool.begin().await.map_err(failed)?;

        sqlx::raw_sql(&migration.down)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(failed)?;

        tx.commit().await.map_err(failed)?;

        info!(version = migration.version, description = %migration.description, "Reverted migration");
        Ok(true)
    }

    /// Latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version, ascending
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
    /// SQL to run when reverting the migration
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Schema for countries and users
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create countries table",
            r#"
            CREATE TABLE IF NOT EXISTS countries (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL
            );
            "#,
            r#"
            DROP TABLE IF EXISTS countries;
            "#,
        ),
        Migration::new(
            2,
            "Seed countries",
            seed_countries_sql(),
            "DELETE FROM countries;",
        ),
        Migration::new(
            3,
            "Create users table",
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                login TEXT NOT NULL,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                country_id BIGINT NOT NULL REFERENCES countries(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT users_login_unique UNIQUE (login),
                CONSTRAINT users_email_unique UNIQUE (email)
            );
            "#,
            r#"
            DROP TABLE IF EXISTS users;
            "#,
        ),
    ]
}

fn seed_countries_sql() -> String {
    let values = DEFAULT_COUNTRIES
        .iter()
        .map(|(id, name)| format!("({}, '{}')", id, name.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(",\n                ");

    format!(
        r#"
            INSERT INTO countries (id, name) VALUES
                {}
            ON CONFLICT (id) DO NOTHING;
            SELECT setval(pg_get_serial_sequence('countries', 'id'), (SELECT MAX(id) FROM countries));
        "#,
        values
    )
}

/// Apply every pending schema migration in order
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in schema_migrations() {
        if migrator.run_migration(&migration).await? {
            applied += 1;
        }
    }

    info!(applied, version = ?migrator.current_version().await?, "Schema is up to date");
    Ok(())
}

/// Revert the most recently applied migration, if any
pub async fn revert_latest_migration(pool: &PgPool) -> Result<Option<i64>, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    let Some(version) = migrator.current_version().await? else {
        return Ok(None);
    };

    let migration = schema_migrations()
        .into_iter()
        .find(|m| m.version == version)
        .ok_or_else(|| DomainError::storage(format!("Unknown applied migration {}", version)))?;

    migrator.revert_migration(&migration).await?;
    Ok(Some(version))
}
