//! Main entry point for the authentication backend.
//!
//! This file initializes tracing, loads configuration, opens the database
//! pool and serves the Axum router until a shutdown signal arrives.

mod api;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use anyhow::{Context, Result};
use config::Config;
use database::Database;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {:#}", e);
        e
    })?;

    let db = Database::new(&config).await.map_err(|e| {
        error!("Failed to initialize database: {:#}", e);
        e
    })?;

    let app = api::build_router(db.pool().clone(), config.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting auth server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
