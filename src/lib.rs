//! Gatehouse
//!
//! A small server-rendered site with account sign-up, sign-in and sign-out:
//! - Rule-based form validation with per-field messages
//! - Argon2 password hashing
//! - Cookie sessions holding the signed-in account
//! - In-memory or PostgreSQL storage

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod web;

pub use config::AppConfig;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use infrastructure::storage::Stores;
use infrastructure::user::{AccountService, Argon2Hasher};
use web::{AppState, Site};

/// Create the application state over already opened stores
pub fn create_app_state(config: &AppConfig, stores: Stores) -> anyhow::Result<AppState> {
    let accounts = AccountService::new(stores.users, stores.countries, Arc::new(Argon2Hasher::new()))?;
    let site = Site::new(&config.server.base_url);

    info!(base_url = %site.base_url(), "Application state ready");

    Ok(AppState::new(accounts, site))
}

/// Open the configured storage and build the application state
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let stores = Stores::open(&config.database).await?;
    create_app_state(config, stores)
}

/// Build the full application router from configuration
pub async fn create_app(config: &AppConfig) -> anyhow::Result<Router> {
    let state = create_app_state_with_config(config).await?;
    Ok(web::create_router(state, &config.session))
}
