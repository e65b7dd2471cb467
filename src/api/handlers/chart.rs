//! Chart handlers: create, list, get, delete, canvas, speeches.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    ChartListResponse, ChartStateResponse, CreateChartRequest, PaginationParams,
    SetCanvasRequest, SetSpeechesRequest, SetSpeechesResponse,
};
use crate::app_state::AppState;
use crate::domain::{ChartId, ChartSummary, Size};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /charts` — Create a seating chart.
///
/// # Errors
///
/// Returns [`GatewayError`] if the chart cannot be registered.
#[utoipa::path(
    post,
    path = "/api/v1/charts",
    tag = "Charts",
    summary = "Create a seating chart",
    description = "Creates a chart, optionally importing tables, guests and speeches. The imported state becomes the history baseline.",
    request_body = CreateChartRequest,
    responses(
        (status = 201, description = "Chart created", body = ChartSummary),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_chart(
    State(state): State<AppState>,
    Json(req): Json<CreateChartRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let summary = state.chart_service.create_chart(req.into()).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// `GET /charts` — List charts with pagination.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/charts",
    tag = "Charts",
    summary = "List charts",
    description = "Returns a paginated list of open charts, newest first.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated chart list", body = ChartListResponse),
    )
)]
pub async fn list_charts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let summaries = state.chart_service.list_charts().await;
    let (data, pagination) = params.paginate(summaries);
    Ok(Json(ChartListResponse { data, pagination }))
}

/// `GET /charts/{id}` — Full chart state.
///
/// # Errors
///
/// Returns [`GatewayError::ChartNotFound`] if the chart does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/charts/{id}",
    tag = "Charts",
    summary = "Get chart state",
    description = "Returns tables, guests, speeches, per-table summaries and history flags.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    responses(
        (status = 200, description = "Chart state", body = ChartStateResponse),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<impl IntoResponse, GatewayError> {
    let response = state
        .chart_service
        .read(chart_id, |entry| ChartStateResponse::from(entry))
        .await?;
    Ok(Json(response))
}

/// `DELETE /charts/{id}` — Remove a chart.
///
/// # Errors
///
/// Returns [`GatewayError::ChartNotFound`] if the chart does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/charts/{id}",
    tag = "Charts",
    summary = "Delete a chart",
    description = "Removes a chart and emits a ChartRemoved event.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    responses(
        (status = 204, description = "Chart deleted"),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn delete_chart(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
) -> Result<impl IntoResponse, GatewayError> {
    state.chart_service.remove_chart(chart_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /charts/{id}/canvas` — Report the canvas size.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for non-positive sizes.
#[utoipa::path(
    put,
    path = "/api/v1/charts/{id}/canvas",
    tag = "Charts",
    summary = "Set canvas size",
    description = "Records the measured canvas size used to keep dragged tables in bounds.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    request_body = SetCanvasRequest,
    responses(
        (status = 200, description = "Canvas stored", body = Size),
        (status = 400, description = "Invalid size", body = ErrorResponse),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn set_canvas(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    Json(req): Json<SetCanvasRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let canvas = state
        .chart_service
        .set_canvas(chart_id, Size::new(req.width, req.height))
        .await?;
    Ok(Json(canvas))
}

/// `PUT /charts/{id}/speeches` — Replace the speech programme.
///
/// # Errors
///
/// Returns [`GatewayError::ChartNotFound`] if the chart does not exist.
#[utoipa::path(
    put,
    path = "/api/v1/charts/{id}/speeches",
    tag = "Charts",
    summary = "Replace speeches",
    description = "Replaces the read-only speech programme used for per-table speaker badges.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    request_body = SetSpeechesRequest,
    responses(
        (status = 200, description = "Speeches stored", body = SetSpeechesResponse),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn set_speeches(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    Json(req): Json<SetSpeechesRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let count = state
        .chart_service
        .set_speeches(chart_id, req.speeches)
        .await?;
    Ok(Json(SetSpeechesResponse { count }))
}

/// Chart management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/charts", post(create_chart).get(list_charts))
        .route("/charts/{id}", get(get_chart).delete(delete_chart))
        .route("/charts/{id}/canvas", put(set_canvas))
        .route("/charts/{id}/speeches", put(set_speeches))
}
