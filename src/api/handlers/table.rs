//! Table handlers: add, edit, delete with confirmation, measured layout.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{patch, post, put};
use axum::{Json, Router};

use crate::api::dto::{AddTableRequest, DeleteTableParams, TableLayoutRequest, UpdateTableRequest};
use crate::app_state::AppState;
use crate::domain::{ChartId, Rect, SeatingError, Size, Table, TableId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /charts/{id}/tables` — Add a table.
///
/// # Errors
///
/// Returns [`GatewayError::ChartNotFound`] if the chart does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/charts/{id}/tables",
    tag = "Tables",
    summary = "Add a table",
    description = "Adds a table named `Table {n+1}` with the shape's default seats, stacked below the existing tables.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    request_body = AddTableRequest,
    responses(
        (status = 201, description = "Table added", body = Table),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn add_table(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    Json(req): Json<AddTableRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let table = state.chart_service.add_table(chart_id, req.shape).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// `PATCH /charts/{id}/tables/{table_id}` — Save the table edit form.
///
/// # Errors
///
/// Returns a not-found error for unknown charts or tables.
#[utoipa::path(
    patch,
    path = "/api/v1/charts/{id}/tables/{table_id}",
    tag = "Tables",
    summary = "Edit a table",
    description = "Updates name, seats, shape, category and markers. Seats are clamped to 1–30; reducing seats never unseats guests.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
        ("table_id" = uuid::Uuid, Path, description = "Table UUID"),
    ),
    request_body = UpdateTableRequest,
    responses(
        (status = 200, description = "Table updated", body = Table),
        (status = 404, description = "Chart or table not found", body = ErrorResponse),
    )
)]
pub async fn update_table(
    State(state): State<AppState>,
    Path((chart_id, table_id)): Path<(ChartId, TableId)>,
    Json(req): Json<UpdateTableRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let current = state
        .chart_service
        .read(chart_id, |entry| entry.editor.table(table_id).cloned())
        .await?
        .ok_or(SeatingError::TableNotFound(table_id))?;
    let draft = req.into_draft(&current);
    let table = state
        .chart_service
        .update_table(chart_id, table_id, &draft)
        .await?;
    Ok(Json(table))
}

/// `DELETE /charts/{id}/tables/{table_id}` — Delete a table.
///
/// # Errors
///
/// Returns `409 Conflict` with the confirmation prompt in `details` unless
/// `confirm=true`.
#[utoipa::path(
    delete,
    path = "/api/v1/charts/{id}/tables/{table_id}",
    tag = "Tables",
    summary = "Delete a table",
    description = "Deletes a table and unassigns everyone seated at it. Without `confirm=true` nothing changes and the confirmation prompt is returned.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
        ("table_id" = uuid::Uuid, Path, description = "Table UUID"),
        DeleteTableParams,
    ),
    responses(
        (status = 204, description = "Table deleted"),
        (status = 404, description = "Chart or table not found", body = ErrorResponse),
        (status = 409, description = "Confirmation required", body = ErrorResponse),
    )
)]
pub async fn delete_table(
    State(state): State<AppState>,
    Path((chart_id, table_id)): Path<(ChartId, TableId)>,
    Query(params): Query<DeleteTableParams>,
) -> Result<impl IntoResponse, GatewayError> {
    state
        .chart_service
        .delete_table(chart_id, table_id, params.confirm)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /charts/{id}/tables/{table_id}/layout` — Record a measured size.
///
/// # Errors
///
/// Returns a not-found error for unknown charts or tables.
#[utoipa::path(
    put,
    path = "/api/v1/charts/{id}/tables/{table_id}/layout",
    tag = "Tables",
    summary = "Record table layout",
    description = "Stores the rendered size of a table for guest drop hit-testing.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
        ("table_id" = uuid::Uuid, Path, description = "Table UUID"),
    ),
    request_body = TableLayoutRequest,
    responses(
        (status = 200, description = "Measured rectangle", body = Rect),
        (status = 400, description = "Invalid size", body = ErrorResponse),
        (status = 404, description = "Chart or table not found", body = ErrorResponse),
    )
)]
pub async fn set_layout(
    State(state): State<AppState>,
    Path((chart_id, table_id)): Path<(ChartId, TableId)>,
    Json(req): Json<TableLayoutRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    if !(req.width.is_finite() && req.height.is_finite()) || req.width < 0.0 || req.height < 0.0 {
        return Err(GatewayError::InvalidRequest(
            "layout width and height must be non-negative".to_string(),
        ));
    }
    let rect = state
        .chart_service
        .measure_table(chart_id, table_id, Size::new(req.width, req.height))
        .await?;
    Ok(Json(rect))
}

/// Table routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/charts/{id}/tables", post(add_table))
        .route(
            "/charts/{id}/tables/{table_id}",
            patch(update_table).delete(delete_table),
        )
        .route("/charts/{id}/tables/{table_id}/layout", put(set_layout))
}
