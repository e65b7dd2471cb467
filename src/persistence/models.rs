//! Database models for events and snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ChartEntry, ChartId};
use crate::error::GatewayError;
use crate::service::RestoredChart;

/// A stored event row from the `chart_events` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Chart that generated the event.
    pub chart_id: Uuid,
    /// Event type discriminator (e.g. `"tables_changed"`).
    pub event_type: String,
    /// JSONB payload with the serialized event.
    pub payload: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Latest committed state of one chart, as written to `chart_snapshots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    /// Chart that was snapshotted.
    pub chart_id: ChartId,
    /// Display name.
    pub name: String,
    /// Revision counter at snapshot time.
    pub revision: u64,
    /// Chart creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Table array as JSONB.
    pub tables_json: serde_json::Value,
    /// Guest array as JSONB.
    pub guests_json: serde_json::Value,
    /// Speech list as JSONB.
    pub speeches_json: serde_json::Value,
    /// Snapshot timestamp.
    pub snapshot_at: DateTime<Utc>,
}

impl ChartSnapshot {
    /// Captures the committed state of a chart.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if serialization fails.
    pub fn capture(entry: &ChartEntry) -> Result<Self, GatewayError> {
        let to_json = |value: Result<serde_json::Value, serde_json::Error>| {
            value.map_err(|e| GatewayError::Internal(format!("snapshot encode: {e}")))
        };
        Ok(Self {
            chart_id: entry.chart_id,
            name: entry.name.clone(),
            revision: entry.revision,
            created_at: entry.created_at,
            tables_json: to_json(serde_json::to_value(entry.editor.tables()))?,
            guests_json: to_json(serde_json::to_value(entry.editor.guests()))?,
            speeches_json: to_json(serde_json::to_value(entry.editor.speeches()))?,
            snapshot_at: Utc::now(),
        })
    }

    /// Decodes the JSON columns back into a chart ready to be restored.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if a column does not hold
    /// a valid array.
    pub fn into_restored(self) -> Result<RestoredChart, GatewayError> {
        let chart_id = self.chart_id;
        let decode = |column: &str, e: serde_json::Error| {
            GatewayError::PersistenceError(format!("chart {chart_id}: bad {column}: {e}"))
        };
        Ok(RestoredChart {
            chart_id,
            name: self.name,
            created_at: self.created_at,
            revision: self.revision,
            tables: serde_json::from_value(self.tables_json).map_err(|e| decode("tables", e))?,
            guests: serde_json::from_value(self.guests_json).map_err(|e| decode("guests", e))?,
            speeches: serde_json::from_value(self.speeches_json)
                .map_err(|e| decode("speeches", e))?,
        })
    }
}
