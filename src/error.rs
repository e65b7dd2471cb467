//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ChartId, SeatingError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "This table only has 4 seats",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details, e.g. a confirmation prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                   |
/// |-----------|-------------------|-------------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request               |
/// | 2000–2999 | State/Not Found   | 404 Not Found / 409 Conflict  |
/// | 3000–3999 | Server            | 500 Internal Server Error     |
/// | 4000–4999 | Seating rules     | 422 Unprocessable Entity      |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Chart with the given ID is not open.
    #[error("chart not found: {0}")]
    ChartNotFound(ChartId),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Rejection from the seating editor.
    #[error(transparent)]
    Seating(#[from] SeatingError),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Seating(SeatingError::GuestNameRequired) => 1002,
            Self::Seating(SeatingError::DuplicateTable(_)) => 1003,
            Self::Seating(SeatingError::DuplicateGuest(_)) => 1004,
            Self::ChartNotFound(_) => 2001,
            Self::Seating(SeatingError::TableNotFound(_)) => 2002,
            Self::Seating(SeatingError::GuestNotFound(_)) => 2003,
            Self::Seating(SeatingError::ConfirmationRequired { .. }) => 2004,
            Self::Seating(SeatingError::DragInProgress) => 2005,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::Seating(SeatingError::TableFull { .. }) => 4001,
            Self::Seating(SeatingError::TableLocked(_)) => 4002,
            Self::Seating(SeatingError::GuestAlreadySeated(_)) => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::Seating(
                SeatingError::GuestNameRequired
                | SeatingError::DuplicateTable(_)
                | SeatingError::DuplicateGuest(_),
            ) => StatusCode::BAD_REQUEST,
            Self::ChartNotFound(_)
            | Self::Seating(SeatingError::TableNotFound(_) | SeatingError::GuestNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Seating(
                SeatingError::ConfirmationRequired { .. } | SeatingError::DragInProgress,
            ) => StatusCode::CONFLICT,
            Self::Seating(
                SeatingError::TableFull { .. }
                | SeatingError::TableLocked(_)
                | SeatingError::GuestAlreadySeated(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Structured body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        let details = match self {
            Self::Seating(SeatingError::ConfirmationRequired { message }) => Some(message.clone()),
            _ => None,
        };
        ErrorBody {
            code: self.error_code(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_body(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableId;

    #[test]
    fn table_full_maps_to_unprocessable() {
        let err = GatewayError::from(SeatingError::TableFull {
            table_id: TableId::new(),
            seats: 4,
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), 4001);
        assert_eq!(err.to_string(), "This table only has 4 seats");
    }

    #[test]
    fn confirmation_prompt_lands_in_details() {
        let err = GatewayError::from(SeatingError::ConfirmationRequired {
            message: "Remove this table?".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let body = err.to_body();
        assert_eq!(body.details.as_deref(), Some("Remove this table?"));
    }

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(
            GatewayError::ChartNotFound(ChartId::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::from(SeatingError::TableNotFound(TableId::new())).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn duplicate_import_ids_are_validation_errors() {
        let err = GatewayError::from(SeatingError::DuplicateTable(TableId::new()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1003);
    }

    #[test]
    fn blank_guest_name_is_a_validation_error() {
        let err = GatewayError::from(SeatingError::GuestNameRequired);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Guest name is required");
    }
}
