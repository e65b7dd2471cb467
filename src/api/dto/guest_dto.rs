//! Guest DTOs: add, assign, unassigned search.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Guest, TableId};

/// Request body for `POST /charts/{id}/guests`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddGuestRequest {
    /// Guest name; surrounding whitespace is trimmed.
    pub name: String,
}

/// Request body for `POST /charts/{id}/guests/{guest_id}/assign`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignGuestRequest {
    /// Target table.
    pub table_id: TableId,
}

/// Query string for `GET /charts/{id}/guests/unassigned`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnassignedQuery {
    /// Case-insensitive name filter.
    #[serde(default)]
    pub q: Option<String>,
}

/// Response body for `GET /charts/{id}/guests/unassigned`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GuestListResponse {
    /// Matching guests in list order.
    pub data: Vec<Guest>,
    /// Number of matches.
    pub total: usize,
}
