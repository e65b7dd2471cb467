//! Errors raised by the seating-chart editor.
//!
//! These are user-facing validation failures only. Every editor operation is
//! synchronous and in-memory, so nothing here is retryable and no variant
//! carries an I/O cause.

use super::{GuestId, TableId};

/// Rejections produced by [`super::SeatingEditor`] operations.
///
/// A rejected operation never changes chart state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatingError {
    /// No table with the given id exists on the chart.
    #[error("table not found: {0}")]
    TableNotFound(TableId),

    /// No guest with the given id exists on the chart.
    #[error("guest not found: {0}")]
    GuestNotFound(GuestId),

    /// The target table has no free seat left.
    #[error("This table only has {seats} seats")]
    TableFull {
        /// Table that rejected the assignment.
        table_id: TableId,
        /// Seat count of the table.
        seats: u32,
    },

    /// Locked tables cannot be dragged.
    #[error("table {0} is locked")]
    TableLocked(TableId),

    /// Only unassigned guests can be picked up for a drag.
    #[error("guest {0} is already seated")]
    GuestAlreadySeated(GuestId),

    /// Guest names must contain at least one non-whitespace character.
    #[error("Guest name is required")]
    GuestNameRequired,

    /// Destructive operation attempted without explicit confirmation.
    #[error("confirmation required: {message}")]
    ConfirmationRequired {
        /// Prompt to show the user before retrying with confirmation.
        message: String,
    },

    /// Imported state lists the same table id twice.
    #[error("duplicate table id: {0}")]
    DuplicateTable(TableId),

    /// Imported state lists the same guest id twice.
    #[error("duplicate guest id: {0}")]
    DuplicateGuest(GuestId),

    /// A drag gesture is already active; only one pointer is tracked.
    #[error("a drag gesture is already in progress")]
    DragInProgress,
}
