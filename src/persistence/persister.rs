//! Background task that mirrors committed chart state into a [`ChartStore`].

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::models::ChartSnapshot;
use super::store::ChartStore;
use crate::domain::ChartEvent;
use crate::error::GatewayError;
use crate::service::ChartService;

/// Subscribes to the event bus and spawns the persister.
///
/// The receiver is created before the task starts, so every event
/// published after this call returns is seen. The task ends when the bus
/// closes.
pub fn spawn_persister<S: ChartStore>(
    store: Arc<S>,
    service: Arc<ChartService>,
    event_log_enabled: bool,
) -> JoinHandle<()> {
    let event_rx = service.event_bus().subscribe();
    tokio::spawn(run_persister(store, service, event_rx, event_log_enabled))
}

async fn run_persister<S: ChartStore>(
    store: Arc<S>,
    service: Arc<ChartService>,
    mut event_rx: broadcast::Receiver<ChartEvent>,
    event_log_enabled: bool,
) {
    loop {
        match event_rx.recv().await {
            Ok(event) => {
                if let Err(err) = persist_event(&*store, &service, &event, event_log_enabled).await
                {
                    tracing::warn!(
                        chart_id = %event.chart_id(),
                        event_type = event.event_type_str(),
                        error = %err,
                        "failed to persist chart event"
                    );
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(lagged = n, "persister lagged behind event bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    tracing::debug!("persister stopped");
}

/// Writes one event to the store. Drag feedback is skipped.
async fn persist_event<S: ChartStore>(
    store: &S,
    service: &ChartService,
    event: &ChartEvent,
    event_log_enabled: bool,
) -> Result<(), GatewayError> {
    if !event.is_durable() {
        return Ok(());
    }
    let chart_id = event.chart_id();

    if event_log_enabled {
        let payload =
            serde_json::to_value(event).map_err(|e| GatewayError::Internal(e.to_string()))?;
        store
            .append_event(chart_id, event.event_type_str(), &payload)
            .await?;
    }

    match event {
        ChartEvent::ChartRemoved { .. } => store.delete_chart(chart_id).await,
        // The array events of the same step carry the new state.
        ChartEvent::HistoryMoved { .. } => Ok(()),
        _ => match service.read(chart_id, ChartSnapshot::capture).await {
            Ok(snapshot) => store.save_snapshot(&snapshot?).await,
            // Removed before we caught up; the removal event follows.
            Err(GatewayError::ChartNotFound(_)) => Ok(()),
            Err(err) => Err(err),
        },
    }
}

/// Loads the latest snapshots from `store` into the service's registry.
///
/// Snapshots that fail to decode or collide with an open chart are logged
/// and skipped. Returns the number of charts restored.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] if the snapshots cannot be
/// read at all.
pub async fn restore_into<S: ChartStore>(
    service: &ChartService,
    store: &S,
) -> Result<usize, GatewayError> {
    let snapshots = store.load_latest_snapshots().await?;
    let mut restored = 0;
    for snapshot in snapshots {
        let chart_id = snapshot.chart_id;
        let result = match snapshot.into_restored() {
            Ok(chart) => service.restore_chart(chart).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(_) => restored += 1,
            Err(err) => tracing::warn!(%chart_id, error = %err, "skipping stored chart"),
        }
    }
    tracing::info!(restored, "charts restored from store");
    Ok(restored)
}
