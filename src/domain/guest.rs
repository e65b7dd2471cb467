//! Guests and their optional table assignment.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{GuestId, SeatingError, TableId};

/// An invitee, optionally seated at one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Guest {
    /// Unique guest id.
    pub id: GuestId,
    /// Display name.
    pub name: String,
    /// Table the guest is seated at; `None` means unassigned.
    #[serde(default)]
    pub table_id: Option<TableId>,
}

impl Guest {
    /// Creates an unassigned guest from a form value.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::GuestNameRequired`] if the trimmed name is
    /// empty.
    pub fn new(name: &str) -> Result<Self, SeatingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SeatingError::GuestNameRequired);
        }
        Ok(Self {
            id: GuestId::new(),
            name: name.to_string(),
            table_id: None,
        })
    }

    /// Returns `true` if the guest has no table.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.table_id.is_none()
    }

    /// Returns `true` if the guest is seated at `table_id`.
    #[must_use]
    pub fn is_seated_at(&self, table_id: TableId) -> bool {
        self.table_id == Some(table_id)
    }
}
