//! Command-line entry points
//!
//! - `serve`: run the site
//! - `migrate`: apply (or revert) PostgreSQL schema migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Gatehouse - sign-up, sign-in and sessions for a small server-rendered site
#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web server
    Serve,

    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
}

/// Read `.env`, load and check configuration, then start logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["gatehouse", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["gatehouse", "migrate", "--revert"]).unwrap();

        match cli.command {
            Command::Migrate(args) => assert!(args.revert),
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(Cli::try_parse_from(["gatehouse", "ui"]).is_err());
    }
}
