//! Migrate command - manages the PostgreSQL schema

use clap::Args;
use tracing::info;

use crate::config::StorageBackend;
use crate::infrastructure::storage::{connect, revert_latest_migration, run_migrations, PostgresConfig};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Roll back the most recently applied migration instead
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    if config.database.backend != StorageBackend::Postgres {
        anyhow::bail!("migrations need database.backend = \"postgres\"");
    }

    let pool = connect(&PostgresConfig::from_database_config(&config.database)?).await?;

    if args.revert {
        match revert_latest_migration(&pool).await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        run_migrations(&pool).await?;
    }

    pool.close().await;

    Ok(())
}
