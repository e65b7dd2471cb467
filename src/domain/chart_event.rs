//! Domain events reflecting chart state mutations.
//!
//! Every committed change emits a [`ChartEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers and
//! drive the persistence task.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::drag::{DragOutcome, DragUpdate};
use super::{ChartId, Guest, Speech, Table};

/// Direction of a history step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryDirection {
    /// Stepped back.
    Undo,
    /// Stepped forward.
    Redo,
}

/// Domain event emitted after every state mutation.
///
/// Array events carry the full replacement array, matching the editor's
/// whole-array update model.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ChartEvent {
    /// A chart was created or restored.
    ChartCreated {
        /// Chart identifier.
        chart_id: ChartId,
        /// Display name.
        name: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A chart was removed.
    ChartRemoved {
        /// Chart identifier.
        chart_id: ChartId,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The table array was replaced.
    TablesChanged {
        /// Chart identifier.
        chart_id: ChartId,
        /// Full table array after the change.
        tables: Vec<Table>,
        /// Change timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The guest array was replaced.
    GuestsChanged {
        /// Chart identifier.
        chart_id: ChartId,
        /// Full guest array after the change.
        guests: Vec<Guest>,
        /// Change timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The speech programme was replaced.
    SpeechesChanged {
        /// Chart identifier.
        chart_id: ChartId,
        /// Full speech list after the change.
        speeches: Vec<Speech>,
        /// Change timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Undo or redo moved the history cursor.
    HistoryMoved {
        /// Chart identifier.
        chart_id: ChartId,
        /// Step direction.
        direction: HistoryDirection,
        /// Undo is available after the step.
        can_undo: bool,
        /// Redo is available after the step.
        can_redo: bool,
        /// Step timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Transient drag feedback. Never persisted.
    DragPreview {
        /// Chart identifier.
        chart_id: ChartId,
        /// What the pointer move changed.
        update: DragUpdate,
        /// Sample timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A drag gesture finished. `outcome` is `None` when it was cancelled.
    /// Never persisted.
    DragEnded {
        /// Chart identifier.
        chart_id: ChartId,
        /// What the release asked to commit.
        outcome: Option<DragOutcome>,
        /// End timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl ChartEvent {
    /// Returns the chart ID associated with this event.
    #[must_use]
    pub fn chart_id(&self) -> ChartId {
        match self {
            Self::ChartCreated { chart_id, .. }
            | Self::ChartRemoved { chart_id, .. }
            | Self::TablesChanged { chart_id, .. }
            | Self::GuestsChanged { chart_id, .. }
            | Self::SpeechesChanged { chart_id, .. }
            | Self::HistoryMoved { chart_id, .. }
            | Self::DragPreview { chart_id, .. }
            | Self::DragEnded { chart_id, .. } => *chart_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ChartCreated { .. } => "chart_created",
            Self::ChartRemoved { .. } => "chart_removed",
            Self::TablesChanged { .. } => "tables_changed",
            Self::GuestsChanged { .. } => "guests_changed",
            Self::SpeechesChanged { .. } => "speeches_changed",
            Self::HistoryMoved { .. } => "history_moved",
            Self::DragPreview { .. } => "drag_preview",
            Self::DragEnded { .. } => "drag_ended",
        }
    }

    /// Returns `true` for events that change durable state.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        !matches!(self, Self::DragPreview { .. } | Self::DragEnded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableShape;

    #[test]
    fn tables_changed_serializes_with_tag() {
        let event = ChartEvent::TablesChanged {
            chart_id: ChartId::new(),
            tables: vec![Table::new_default(TableShape::Round, 0)],
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"tables_changed\""));
        assert!(json.contains("Table 1"));
    }

    #[test]
    fn drag_preview_is_not_durable() {
        let event = ChartEvent::DragPreview {
            chart_id: ChartId::new(),
            update: DragUpdate::Unchanged,
            timestamp: Utc::now(),
        };
        assert!(!event.is_durable());
        assert_eq!(event.event_type_str(), "drag_preview");
    }

    #[test]
    fn chart_id_accessor() {
        let id = ChartId::new();
        let event = ChartEvent::ChartRemoved {
            chart_id: id,
            timestamp: Utc::now(),
        };
        assert_eq!(event.chart_id(), id);
        assert!(event.is_durable());
    }
}
