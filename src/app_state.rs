//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::GatewayConfig;
use crate::domain::{ChartRegistry, EventBus};
use crate::service::ChartService;
use crate::ws::handler::ws_handler;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Chart service for all editing logic.
    pub chart_service: Arc<ChartService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds an empty registry, event bus and service from `config`.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let event_bus = EventBus::new(config.event_bus_capacity);
        let chart_service = Arc::new(ChartService::new(
            Arc::new(ChartRegistry::new()),
            event_bus.clone(),
            config.editor,
        ));
        Self {
            chart_service,
            event_bus,
        }
    }
}

/// Assembles the full HTTP application: REST API, OpenAPI docs, `/ws`,
/// request tracing and permissive CORS.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
