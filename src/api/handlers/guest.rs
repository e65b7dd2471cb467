//! Guest handlers: add, unassigned search, assign, unassign.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{AddGuestRequest, AssignGuestRequest, GuestListResponse, UnassignedQuery};
use crate::app_state::AppState;
use crate::domain::{ChartId, Guest, GuestId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /charts/{id}/guests` — Add a guest.
///
/// # Errors
///
/// Returns `400` when the name is blank.
#[utoipa::path(
    post,
    path = "/api/v1/charts/{id}/guests",
    tag = "Guests",
    summary = "Add a guest",
    description = "Adds an unassigned guest. The name is trimmed and must not be empty.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
    ),
    request_body = AddGuestRequest,
    responses(
        (status = 201, description = "Guest added", body = Guest),
        (status = 400, description = "Guest name is required", body = ErrorResponse),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn add_guest(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    Json(req): Json<AddGuestRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let guest = state.chart_service.add_guest(chart_id, &req.name).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

/// `GET /charts/{id}/guests/unassigned` — Search unassigned guests.
///
/// # Errors
///
/// Returns [`GatewayError::ChartNotFound`] if the chart does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/charts/{id}/guests/unassigned",
    tag = "Guests",
    summary = "List unassigned guests",
    description = "Returns guests without a table whose name contains `q`, case-insensitively.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
        UnassignedQuery,
    ),
    responses(
        (status = 200, description = "Matching guests", body = GuestListResponse),
        (status = 404, description = "Chart not found", body = ErrorResponse),
    )
)]
pub async fn unassigned_guests(
    State(state): State<AppState>,
    Path(chart_id): Path<ChartId>,
    Query(query): Query<UnassignedQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let data = state
        .chart_service
        .unassigned_guests(chart_id, query.q.as_deref().unwrap_or_default())
        .await?;
    let total = data.len();
    Ok(Json(GuestListResponse { data, total }))
}

/// `POST /charts/{id}/guests/{guest_id}/assign` — Seat a guest.
///
/// # Errors
///
/// Returns `422` when the table has no free seat.
#[utoipa::path(
    post,
    path = "/api/v1/charts/{id}/guests/{guest_id}/assign",
    tag = "Guests",
    summary = "Assign a guest to a table",
    description = "Seats the guest if the table has a free seat. A full table rejects the request and the guest keeps its current seat.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
        ("guest_id" = uuid::Uuid, Path, description = "Guest UUID"),
    ),
    request_body = AssignGuestRequest,
    responses(
        (status = 200, description = "Guest seated", body = Guest),
        (status = 404, description = "Chart, guest or table not found", body = ErrorResponse),
        (status = 422, description = "Table is full", body = ErrorResponse),
    )
)]
pub async fn assign_guest(
    State(state): State<AppState>,
    Path((chart_id, guest_id)): Path<(ChartId, GuestId)>,
    Json(req): Json<AssignGuestRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let guest = state
        .chart_service
        .assign(chart_id, guest_id, req.table_id)
        .await?;
    Ok(Json(guest))
}

/// `POST /charts/{id}/guests/{guest_id}/unassign` — Unseat a guest.
///
/// # Errors
///
/// Returns a not-found error for unknown charts or guests.
#[utoipa::path(
    post,
    path = "/api/v1/charts/{id}/guests/{guest_id}/unassign",
    tag = "Guests",
    summary = "Unassign a guest",
    description = "Clears the guest's table.",
    params(
        ("id" = uuid::Uuid, Path, description = "Chart UUID"),
        ("guest_id" = uuid::Uuid, Path, description = "Guest UUID"),
    ),
    responses(
        (status = 200, description = "Guest unseated", body = Guest),
        (status = 404, description = "Chart or guest not found", body = ErrorResponse),
    )
)]
pub async fn unassign_guest(
    State(state): State<AppState>,
    Path((chart_id, guest_id)): Path<(ChartId, GuestId)>,
) -> Result<impl IntoResponse, GatewayError> {
    let guest = state.chart_service.unassign(chart_id, guest_id).await?;
    Ok(Json(guest))
}

/// Guest routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/charts/{id}/guests", post(add_guest))
        .route("/charts/{id}/guests/unassigned", get(unassigned_guests))
        .route("/charts/{id}/guests/{guest_id}/assign", post(assign_guest))
        .route(
            "/charts/{id}/guests/{guest_id}/unassign",
            post(unassign_guest),
        )
}
