//! Storage abstraction for chart snapshots and events.

use std::future::Future;

use super::models::ChartSnapshot;
use crate::domain::ChartId;
use crate::error::GatewayError;

/// Durable storage for chart state.
///
/// Implementations must be shareable across tasks; the persister holds one
/// behind an `Arc` for the lifetime of the server.
pub trait ChartStore: Send + Sync + 'static {
    /// Records the latest committed state of a chart.
    fn save_snapshot(
        &self,
        snapshot: &ChartSnapshot,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Forgets a removed chart so it is not restored on the next start.
    fn delete_chart(&self, chart_id: ChartId)
    -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Appends one serialized event to the event log.
    fn append_event(
        &self,
        chart_id: ChartId,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Returns the latest snapshot of every stored chart.
    fn load_latest_snapshots(
        &self,
    ) -> impl Future<Output = Result<Vec<ChartSnapshot>, GatewayError>> + Send;
}
