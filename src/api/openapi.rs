//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto;
use crate::api::handlers;
use crate::domain;
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI 3 description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "seating-gateway",
        description = "Seating-chart editor: tables, guests, seat assignment and undo history."
    ),
    paths(
        handlers::chart::create_chart,
        handlers::chart::list_charts,
        handlers::chart::get_chart,
        handlers::chart::delete_chart,
        handlers::chart::set_canvas,
        handlers::chart::set_speeches,
        handlers::table::add_table,
        handlers::table::update_table,
        handlers::table::delete_table,
        handlers::table::set_layout,
        handlers::guest::add_guest,
        handlers::guest::unassigned_guests,
        handlers::guest::assign_guest,
        handlers::guest::unassign_guest,
        handlers::history::undo,
        handlers::history::redo,
        handlers::system::health_handler,
        handlers::system::table_options_handler,
    ),
    components(schemas(
        domain::Table,
        domain::TableShape,
        domain::TableCategory,
        domain::Guest,
        domain::Speech,
        domain::SpeechStatus,
        domain::Point,
        domain::Size,
        domain::Rect,
        domain::ChartSummary,
        domain::TableSummary,
        dto::CreateChartRequest,
        dto::ChartListResponse,
        dto::ChartStateResponse,
        dto::HistoryDto,
        dto::HistoryResponse,
        dto::SetCanvasRequest,
        dto::SetSpeechesRequest,
        dto::SetSpeechesResponse,
        dto::AddTableRequest,
        dto::UpdateTableRequest,
        dto::SeatsInput,
        dto::TableLayoutRequest,
        dto::TableOptionsResponse,
        dto::ShapeOption,
        dto::CategoryOption,
        dto::AddGuestRequest,
        dto::AssignGuestRequest,
        dto::GuestListResponse,
        dto::PaginationMeta,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Charts", description = "Chart lifecycle and full state"),
        (name = "Tables", description = "Table layout and edit form"),
        (name = "Guests", description = "Guest list and seat assignment"),
        (name = "History", description = "Undo and redo"),
        (name = "System", description = "Health and form options"),
    )
)]
pub struct ApiDoc;
