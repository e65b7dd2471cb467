//! seating-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use seating_gateway::app_state::{AppState, build_app};
use seating_gateway::config::GatewayConfig;
use seating_gateway::persistence::{PostgresStore, restore_into, spawn_persister};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting seating-gateway");

    // Build domain and service layers
    let app_state = AppState::from_config(&config);

    // Optional persistence
    if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .context("connecting to PostgreSQL")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("running migrations")?;

        let store = Arc::new(PostgresStore::new(pool));
        restore_into(&app_state.chart_service, &*store).await?;
        spawn_persister(
            store,
            Arc::clone(&app_state.chart_service),
            config.event_log_enabled,
        );
        tracing::info!(event_log = config.event_log_enabled, "persistence enabled");
    } else {
        tracing::info!("persistence disabled; charts live in memory only");
    }

    // Build router
    let app = build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
