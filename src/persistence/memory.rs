//! In-process chart store.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::models::{ChartSnapshot, StoredEvent};
use super::store::ChartStore;
use crate::domain::ChartId;
use crate::error::GatewayError;

/// [`ChartStore`] kept in memory. Holds only the latest snapshot per chart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: RwLock<HashMap<ChartId, ChartSnapshot>>,
    events: RwLock<Vec<StoredEvent>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the latest snapshot of a chart, if any.
    pub async fn snapshot(&self, chart_id: ChartId) -> Option<ChartSnapshot> {
        self.snapshots.read().await.get(&chart_id).cloned()
    }

    /// Returns the logged events of a chart in append order.
    pub async fn events(&self, chart_id: ChartId) -> Vec<StoredEvent> {
        let chart_uuid = *chart_id.as_uuid();
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.chart_id == chart_uuid)
            .cloned()
            .collect()
    }
}

impl ChartStore for MemoryStore {
    async fn save_snapshot(&self, snapshot: &ChartSnapshot) -> Result<(), GatewayError> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.chart_id, snapshot.clone());
        Ok(())
    }

    async fn delete_chart(&self, chart_id: ChartId) -> Result<(), GatewayError> {
        self.snapshots.write().await.remove(&chart_id);
        Ok(())
    }

    async fn append_event(
        &self,
        chart_id: ChartId,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<(), GatewayError> {
        let mut events = self.events.write().await;
        let id = i64::try_from(events.len()).unwrap_or(i64::MAX).saturating_add(1);
        events.push(StoredEvent {
            id,
            chart_id: *chart_id.as_uuid(),
            event_type: event_type.to_string(),
            payload: payload.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn load_latest_snapshots(&self) -> Result<Vec<ChartSnapshot>, GatewayError> {
        Ok(self.snapshots.read().await.values().cloned().collect())
    }
}
