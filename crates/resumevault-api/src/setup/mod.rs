//! Application setup and initialization
//!
//! All startup logic lives here, extracted from main.rs for better
//! organization and testability.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use resumevault_core::Config;
use resumevault_storage::create_storage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration before touching any dependency
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production());

    tracing::info!(
        environment = config.environment(),
        storage_backend = ?config.storage_backend(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let state = Arc::new(AppState::new(pool, storage, config.clone()));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
