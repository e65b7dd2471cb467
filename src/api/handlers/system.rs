//! System endpoints: health check and table form options.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::{CategoryOption, ShapeOption, TableOptionsResponse};
use crate::app_state::AppState;
use crate::domain::table::{MAX_SEATS, MIN_SEATS};
use crate::domain::{TableCategory, TableShape};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    charts: usize,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, open chart count and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let charts = state.chart_service.registry().len().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            charts,
        }),
    )
}

/// `GET /config/table-options` — Shapes, categories and seat limits.
#[utoipa::path(
    get,
    path = "/config/table-options",
    tag = "System",
    summary = "Table form options",
    description = "Returns every table shape with its default seat count, every category with its label and colour, and the seat range.",
    responses(
        (status = 200, description = "Table option catalog", body = TableOptionsResponse),
    )
)]
pub async fn table_options_handler() -> impl IntoResponse {
    let shapes = TableShape::ALL
        .iter()
        .map(|&shape| ShapeOption {
            shape,
            default_seats: shape.default_seats(),
        })
        .collect();
    let categories = TableCategory::ALL
        .iter()
        .map(|&category| CategoryOption {
            category,
            label: category.label(),
            color: category.color(),
        })
        .collect();
    (
        StatusCode::OK,
        Json(TableOptionsResponse {
            shapes,
            categories,
            min_seats: MIN_SEATS,
            max_seats: MAX_SEATS,
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/table-options", get(table_options_handler))
}
