//! Undo and redo handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::HistoryResponse;
use crate::app_state::AppState;
use crate::domain::ChartId;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /charts/{id}/undo` — Step back one edit.
///
/// # Errors
///
/// Returns [`GatewayError::ChartNotFound`] if the chart does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/charts/{id}/undo",
    tag = "History",
    summary = "Undo",
    description = "Restores the state before the last committed edit. A no-op at the oldest entry.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    responses(
        (status = 200, description = "History flags after the step", body = HistoryResponse),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn undo(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<impl IntoResponse, GatewayError> {
    let status = state.chart_service.undo(chart_id).await?;
    Ok(Json(HistoryResponse::from(status)))
}

/// `POST /charts/{id}/redo` — Re-apply one undone edit.
///
/// # Errors
///
/// Returns [`GatewayError::ChartNotFound`] if the chart does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/charts/{id}/redo",
    tag = "History",
    summary = "Redo",
    description = "Re-applies the last undone edit. A no-op at the newest entry.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    responses(
        (status = 200, description = "History flags after the step", body = HistoryResponse),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn redo(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<impl IntoResponse, GatewayError> {
    let status = state.chart_service.redo(chart_id).await?;
    Ok(Json(HistoryResponse::from(status)))
}

/// History routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/charts/{id}/undo", post(undo))
        .route("/charts/{id}/redo", post(redo))
}
