//! Concurrent chart storage with per-chart locking.
//!
//! [`ChartRegistry`] stores all open charts in a `HashMap` where each entry
//! is individually protected by a [`tokio::sync::RwLock`]. Edits to one
//! chart are serialized; different charts never block each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::ChartId;
use super::chart_entry::{ChartEntry, ChartSummary};
use crate::error::GatewayError;

/// Central store for all open seating charts.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: RwLock<HashMap<ChartId, Arc<RwLock<ChartEntry>>>>,
}

impl ChartRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a chart.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if a chart with the same id
    /// already exists.
    pub async fn insert(&self, entry: ChartEntry) -> Result<ChartId, GatewayError> {
        let chart_id = entry.chart_id;
        let mut map = self.charts.write().await;
        if map.contains_key(&chart_id) {
            return Err(GatewayError::InvalidRequest(format!(
                "chart {chart_id} already exists"
            )));
        }
        map.insert(chart_id, Arc::new(RwLock::new(entry)));
        Ok(chart_id)
    }

    /// Returns the chart entry behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown ids.
    pub async fn get(&self, chart_id: ChartId) -> Result<Arc<RwLock<ChartEntry>>, GatewayError> {
        let map = self.charts.read().await;
        map.get(&chart_id)
            .cloned()
            .ok_or(GatewayError::ChartNotFound(chart_id))
    }

    /// Removes a chart. Handles still held elsewhere stay usable but are no
    /// longer reachable through the registry.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown ids.
    pub async fn remove(&self, chart_id: ChartId) -> Result<(), GatewayError> {
        let mut map = self.charts.write().await;
        map.remove(&chart_id)
            .map(|_| ())
            .ok_or(GatewayError::ChartNotFound(chart_id))
    }

    /// Summaries of every chart, newest first.
    pub async fn list(&self) -> Vec<ChartSummary> {
        let map = self.charts.read().await;
        let mut summaries = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            let entry = entry_lock.read().await;
            summaries.push(ChartSummary::from(&*entry));
        }
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries
    }

    /// Number of charts.
    pub async fn len(&self) -> usize {
        self.charts.read().await.len()
    }

    /// Returns `true` if no charts are open.
    pub async fn is_empty(&self) -> bool {
        self.charts.read().await.is_empty()
    }
}
