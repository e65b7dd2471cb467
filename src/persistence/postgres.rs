//! PostgreSQL implementation of the persistence layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::ChartSnapshot;
use super::store::ChartStore;
use crate::domain::ChartId;
use crate::error::GatewayError;

/// Row shape of `chart_snapshots` as read back by [`PostgresStore`].
type SnapshotRow = (
    Uuid,
    String,
    i64,
    DateTime<Utc>,
    serde_json::Value,
    serde_json::Value,
    serde_json::Value,
    DateTime<Utc>,
);

/// PostgreSQL-backed chart store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ChartStore for PostgresStore {
    async fn save_snapshot(&self, snapshot: &ChartSnapshot) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO chart_snapshots \
             (chart_id, name, revision, created_at, tables_json, guests_json, speeches_json, snapshot_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(*snapshot.chart_id.as_uuid())
        .bind(&snapshot.name)
        .bind(i64::try_from(snapshot.revision).unwrap_or(i64::MAX))
        .bind(snapshot.created_at)
        .bind(&snapshot.tables_json)
        .bind(&snapshot.guests_json)
        .bind(&snapshot.speeches_json)
        .bind(snapshot.snapshot_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_chart(&self, chart_id: ChartId) -> Result<(), GatewayError> {
        sqlx::query("DELETE FROM chart_snapshots WHERE chart_id = $1")
            .bind(*chart_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn append_event(
        &self,
        chart_id: ChartId,
        event_type: &str,
        payload: &serde_json::Value,
    ) -> Result<(), GatewayError> {
        sqlx::query("INSERT INTO chart_events (chart_id, event_type, payload) VALUES ($1, $2, $3)")
            .bind(*chart_id.as_uuid())
            .bind(event_type)
            .bind(payload)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn load_latest_snapshots(&self) -> Result<Vec<ChartSnapshot>, GatewayError> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            "SELECT DISTINCT ON (chart_id) chart_id, name, revision, created_at, \
             tables_json, guests_json, speeches_json, snapshot_at \
             FROM chart_snapshots ORDER BY chart_id, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    chart_id,
                    name,
                    revision,
                    created_at,
                    tables_json,
                    guests_json,
                    speeches_json,
                    snapshot_at,
                )| ChartSnapshot {
                    chart_id: ChartId::from_uuid(chart_id),
                    name,
                    revision: u64::try_from(revision).unwrap_or(0),
                    created_at,
                    tables_json,
                    guests_json,
                    speeches_json,
                    snapshot_at,
                },
            )
            .collect())
    }
}
