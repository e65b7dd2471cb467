//! Chart-level DTOs: create, list, full state, canvas, speeches, history.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{
    ChartEntry, ChartSummary, Guest, Size, Speech, Table, TableSummary,
};
use crate::service::{HistoryStatus, NewChart};

/// Request body for `POST /charts`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateChartRequest {
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional canvas size reported by the client.
    #[serde(default)]
    pub canvas: Option<Size>,
    /// Tables to import.
    #[serde(default)]
    pub tables: Vec<Table>,
    /// Guests to import.
    #[serde(default)]
    pub guests: Vec<Guest>,
    /// Speech programme.
    #[serde(default)]
    pub speeches: Vec<Speech>,
}

impl From<CreateChartRequest> for NewChart {
    fn from(req: CreateChartRequest) -> Self {
        Self {
            name: req.name,
            canvas: req.canvas,
            tables: req.tables,
            guests: req.guests,
            speeches: req.speeches,
        }
    }
}

/// Paginated list response for `GET /charts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChartListResponse {
    /// Charts on this page.
    pub data: Vec<ChartSummary>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Undo/redo availability.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct HistoryDto {
    /// Undo would change the chart.
    pub can_undo: bool,
    /// Redo would change the chart.
    pub can_redo: bool,
    /// Cursor position.
    pub index: usize,
    /// Retained entries.
    pub len: usize,
}

/// Full chart state for `GET /charts/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChartStateResponse {
    /// Chart metadata.
    pub chart: ChartSummary,
    /// Canvas size used for drag clamping.
    pub canvas: Size,
    /// Tables in display order.
    pub tables: Vec<Table>,
    /// Guests in list order.
    pub guests: Vec<Guest>,
    /// Speech programme.
    pub speeches: Vec<Speech>,
    /// Per-table occupancy and speaker summaries.
    pub summaries: Vec<TableSummary>,
    /// History flags.
    pub history: HistoryDto,
    /// A drag gesture is in progress.
    pub drag_active: bool,
}

impl From<&ChartEntry> for ChartStateResponse {
    fn from(entry: &ChartEntry) -> Self {
        let editor = &entry.editor;
        Self {
            chart: ChartSummary::from(entry),
            canvas: editor.canvas(),
            tables: editor.tables().to_vec(),
            guests: editor.guests().to_vec(),
            speeches: editor.speeches().to_vec(),
            summaries: editor.table_summaries(),
            history: HistoryDto {
                can_undo: editor.can_undo(),
                can_redo: editor.can_redo(),
                index: editor.history_index(),
                len: editor.history_len(),
            },
            drag_active: *editor.drag_state() != crate::domain::DragState::Idle,
        }
    }
}

/// Request body for `PUT /charts/{id}/canvas`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetCanvasRequest {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
}

/// Request body for `PUT /charts/{id}/speeches`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetSpeechesRequest {
    /// Replacement programme.
    pub speeches: Vec<Speech>,
}

/// Response body for `PUT /charts/{id}/speeches`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SetSpeechesResponse {
    /// Number of speeches stored.
    pub count: usize,
}

/// Response body for undo and redo.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// The step replaced the table array.
    pub tables_changed: bool,
    /// The step replaced the guest array.
    pub guests_changed: bool,
    /// Undo is available.
    pub can_undo: bool,
    /// Redo is available.
    pub can_redo: bool,
}

impl From<HistoryStatus> for HistoryResponse {
    fn from(status: HistoryStatus) -> Self {
        Self {
            tables_changed: status.changes.tables,
            guests_changed: status.changes.guests,
            can_undo: status.can_undo,
            can_redo: status.can_redo,
        }
    }
}
