//! Chart entry combining the seating editor with server-side metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::ChartId;
use super::editor::{EditorSettings, SeatingEditor};

/// Aggregate wrapping a [`SeatingEditor`] with gateway metadata.
///
/// Each chart in the registry is stored as a `ChartEntry`. The `editor`
/// field holds the live seating state while the remaining fields track
/// operational metadata.
#[derive(Debug)]
pub struct ChartEntry {
    /// Unique chart identifier (immutable after creation).
    pub chart_id: ChartId,

    /// The live editor. Updated on every committed edit.
    pub editor: SeatingEditor,

    /// Display name, e.g. the couple's names.
    pub name: String,

    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last committed mutation.
    pub last_modified_at: DateTime<Utc>,

    /// Number of committed mutations, including undo and redo.
    pub revision: u64,
}

impl ChartEntry {
    /// Creates an empty chart.
    #[must_use]
    pub fn new(chart_id: ChartId, name: String, settings: EditorSettings) -> Self {
        let now = Utc::now();
        Self {
            chart_id,
            editor: SeatingEditor::new(settings),
            name,
            created_at: now,
            last_modified_at: now,
            revision: 0,
        }
    }

    /// Bumps the revision and modification time after a committed edit.
    pub fn touch(&mut self) {
        self.revision = self.revision.saturating_add(1);
        self.last_modified_at = Utc::now();
    }
}

/// Lightweight summary of a chart for list endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChartSummary {
    /// Chart identifier.
    pub chart_id: ChartId,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub last_modified_at: DateTime<Utc>,
    /// Number of tables.
    pub table_count: usize,
    /// Number of guests.
    pub guest_count: usize,
    /// Number of guests with a table.
    pub seated_count: usize,
    /// Committed mutation counter.
    pub revision: u64,
}

impl From<&ChartEntry> for ChartSummary {
    fn from(entry: &ChartEntry) -> Self {
        let guests = entry.editor.guests();
        Self {
            chart_id: entry.chart_id,
            name: entry.name.clone(),
            created_at: entry.created_at,
            last_modified_at: entry.last_modified_at,
            table_count: entry.editor.tables().len(),
            guest_count: guests.len(),
            seated_count: guests.iter().filter(|g| !g.is_unassigned()).count(),
            revision: entry.revision,
        }
    }
}
