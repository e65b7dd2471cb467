//! Table DTOs: add, edit form, delete confirmation, measured layout.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::table::{clamp_seats, parse_seats};
use crate::domain::{Table, TableCategory, TableDraft, TableShape};

/// Request body for `POST /charts/{id}/tables`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddTableRequest {
    /// Shape of the new table; defaults to round.
    #[serde(default)]
    pub shape: TableShape,
}

/// Seat count as typed into the edit form: a number or raw text.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SeatsInput {
    /// Numeric input.
    Number(i64),
    /// Text input; unparseable text becomes one seat.
    Text(String),
}

impl SeatsInput {
    /// Seat count clamped to the allowed range.
    #[must_use]
    pub fn resolve(&self) -> u32 {
        match self {
            Self::Number(n) => clamp_seats(*n),
            Self::Text(s) => parse_seats(s),
        }
    }
}

/// Request body for `PATCH /charts/{id}/tables/{table_id}`. Missing fields
/// keep their current value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTableRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New seat count.
    #[serde(default)]
    pub seats: Option<SeatsInput>,
    /// New shape.
    #[serde(default)]
    pub shape: Option<TableShape>,
    /// Locked marker.
    #[serde(default)]
    pub locked: Option<bool>,
    /// Reserved marker.
    #[serde(default)]
    pub reserved: Option<bool>,
    /// New category.
    #[serde(default)]
    pub category: Option<TableCategory>,
}

impl UpdateTableRequest {
    /// Merges the request over the table's current values.
    #[must_use]
    pub fn into_draft(self, current: &Table) -> TableDraft {
        let base = TableDraft::from(current);
        TableDraft {
            name: self.name.unwrap_or(base.name),
            seats: self
                .seats
                .map_or(base.seats, |s| i32::try_from(s.resolve()).unwrap_or(i32::MAX)),
            shape: self.shape.unwrap_or(base.shape),
            locked: self.locked.unwrap_or(base.locked),
            reserved: self.reserved.unwrap_or(base.reserved),
            category: self.category.unwrap_or(base.category),
        }
    }
}

/// Query string for `DELETE /charts/{id}/tables/{table_id}`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteTableParams {
    /// Must be `true` to actually delete; otherwise the confirmation
    /// prompt is returned with `409 Conflict`.
    #[serde(default)]
    pub confirm: bool,
}

/// Request body for `PUT /charts/{id}/tables/{table_id}/layout`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TableLayoutRequest {
    /// Measured width in pixels.
    pub width: f64,
    /// Measured height in pixels.
    pub height: f64,
}

/// One entry of `GET /config/table-options`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShapeOption {
    /// Shape value.
    pub shape: TableShape,
    /// Seats a new table of this shape gets.
    pub default_seats: u32,
}

/// One category entry of `GET /config/table-options`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryOption {
    /// Category value.
    pub category: TableCategory,
    /// Display label.
    pub label: &'static str,
    /// Accent colour.
    pub color: &'static str,
}

/// Response body for `GET /config/table-options`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TableOptionsResponse {
    /// Available shapes.
    pub shapes: Vec<ShapeOption>,
    /// Available categories.
    pub categories: Vec<CategoryOption>,
    /// Smallest allowed seat count.
    pub min_seats: u32,
    /// Largest allowed seat count.
    pub max_seats: u32,
}
