//! Chart service: orchestrates editor operations and emits events.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    ChangeSet, ChartEntry, ChartEvent, ChartId, ChartRegistry, ChartSummary, DragOutcome,
    DragState, DragUpdate, EditorSettings, EventBus, GestureSample, Guest, GuestId,
    HistoryDirection, Rect, SeatingEditor, SeatingError, Size, Speech, Table, TableDraft, TableId,
    TableShape,
};
use crate::error::GatewayError;

/// Initial content for a new chart.
#[derive(Debug, Clone, Default)]
pub struct NewChart {
    /// Display name; defaults to `"Seating chart"`.
    pub name: Option<String>,
    /// Canvas size; defaults to the configured canvas.
    pub canvas: Option<Size>,
    /// Tables to start with.
    pub tables: Vec<Table>,
    /// Guests to start with.
    pub guests: Vec<Guest>,
    /// Speech programme.
    pub speeches: Vec<Speech>,
}

/// A chart recovered from durable storage.
#[derive(Debug, Clone)]
pub struct RestoredChart {
    /// Original chart id.
    pub chart_id: ChartId,
    /// Display name.
    pub name: String,
    /// Original creation time.
    pub created_at: DateTime<Utc>,
    /// Revision at the time of the snapshot.
    pub revision: u64,
    /// Tables.
    pub tables: Vec<Table>,
    /// Guests.
    pub guests: Vec<Guest>,
    /// Speeches.
    pub speeches: Vec<Speech>,
}

/// History flags after an undo or redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStatus {
    /// Arrays replaced by the step.
    pub changes: ChangeSet,
    /// Undo is available.
    pub can_undo: bool,
    /// Redo is available.
    pub can_redo: bool,
}

/// Orchestration layer for every chart operation.
///
/// Owns the [`ChartRegistry`] for state and the [`EventBus`] for event
/// emission. Mutations follow one pattern: acquire the chart lock, run the
/// editor operation, bump metadata, publish events, release.
#[derive(Debug, Clone)]
pub struct ChartService {
    registry: Arc<ChartRegistry>,
    event_bus: EventBus,
    settings: EditorSettings,
}

impl ChartService {
    /// Creates a new `ChartService`.
    #[must_use]
    pub fn new(
        registry: Arc<ChartRegistry>,
        event_bus: EventBus,
        settings: EditorSettings,
    ) -> Self {
        Self {
            registry,
            event_bus,
            settings,
        }
    }

    /// Returns the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the inner [`ChartRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<ChartRegistry> {
        &self.registry
    }

    /// Editor tunables applied to new charts.
    #[must_use]
    pub const fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Creates a chart and publishes [`ChartEvent::ChartCreated`].
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::DuplicateTable`] or
    /// [`SeatingError::DuplicateGuest`] for imported state that repeats an
    /// id.
    pub async fn create_chart(&self, new: NewChart) -> Result<ChartSummary, GatewayError> {
        let chart_id = ChartId::new();
        let name = new
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Seating chart".to_string());

        let mut entry = ChartEntry::new(chart_id, name.clone(), self.settings);
        entry.editor.load(new.tables, new.guests)?;
        entry.editor.set_speeches(new.speeches);
        if let Some(canvas) = new.canvas {
            entry.editor.set_canvas(canvas);
        }
        let summary = ChartSummary::from(&entry);
        let tables = entry.editor.tables().to_vec();
        let guests = entry.editor.guests().to_vec();
        let speeches = entry.editor.speeches().to_vec();
        self.registry.insert(entry).await?;

        let now = Utc::now();
        let _ = self.event_bus.publish(ChartEvent::ChartCreated {
            chart_id,
            name,
            timestamp: now,
        });
        let _ = self.event_bus.publish(ChartEvent::TablesChanged {
            chart_id,
            tables,
            timestamp: now,
        });
        let _ = self.event_bus.publish(ChartEvent::GuestsChanged {
            chart_id,
            guests,
            timestamp: now,
        });
        if !speeches.is_empty() {
            let _ = self.event_bus.publish(ChartEvent::SpeechesChanged {
                chart_id,
                speeches,
                timestamp: now,
            });
        }

        tracing::info!(%chart_id, "chart created");
        Ok(summary)
    }

    /// Re-inserts a chart recovered from storage without publishing events.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if a chart with the same id is open or the
    /// stored state repeats an id.
    pub async fn restore_chart(&self, restored: RestoredChart) -> Result<ChartId, GatewayError> {
        let mut entry = ChartEntry::new(restored.chart_id, restored.name, self.settings);
        entry.created_at = restored.created_at;
        entry.revision = restored.revision;
        entry.editor.load(restored.tables, restored.guests)?;
        entry.editor.set_speeches(restored.speeches);
        let chart_id = self.registry.insert(entry).await?;
        tracing::debug!(%chart_id, "chart restored");
        Ok(chart_id)
    }

    /// Removes a chart.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown ids.
    pub async fn remove_chart(&self, chart_id: ChartId) -> Result<(), GatewayError> {
        self.registry.remove(chart_id).await?;
        let _ = self.event_bus.publish(ChartEvent::ChartRemoved {
            chart_id,
            timestamp: Utc::now(),
        });
        tracing::info!(%chart_id, "chart removed");
        Ok(())
    }

    /// Summaries of every open chart, newest first.
    pub async fn list_charts(&self) -> Vec<ChartSummary> {
        self.registry.list().await
    }

    /// Runs `f` against a chart under its read lock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown ids.
    pub async fn read<R>(
        &self,
        chart_id: ChartId,
        f: impl FnOnce(&ChartEntry) -> R,
    ) -> Result<R, GatewayError> {
        let entry_lock = self.registry.get(chart_id).await?;
        let entry = entry_lock.read().await;
        Ok(f(&entry))
    }

    /// Adds a table of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown charts.
    pub async fn add_table(
        &self,
        chart_id: ChartId,
        shape: TableShape,
    ) -> Result<Table, GatewayError> {
        let table = self
            .edit(chart_id, |editor| Ok((editor.add_table(shape), ChangeSet::TABLES)))
            .await?;
        tracing::info!(%chart_id, table_id = %table.id, shape = shape.as_str(), "table added");
        Ok(table)
    }

    /// Saves the table edit form.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown charts or tables.
    pub async fn update_table(
        &self,
        chart_id: ChartId,
        table_id: TableId,
        draft: &TableDraft,
    ) -> Result<Table, GatewayError> {
        self.edit(chart_id, |editor| {
            editor
                .update_table(table_id, draft)
                .map(|t| (t, ChangeSet::TABLES))
        })
        .await
    }

    /// Confirmation prompt for deleting a table.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown charts or tables.
    pub async fn delete_prompt(
        &self,
        chart_id: ChartId,
        table_id: TableId,
    ) -> Result<String, GatewayError> {
        self.read(chart_id, |entry| entry.editor.delete_prompt(table_id))
            .await?
            .map_err(GatewayError::from)
    }

    /// Deletes a table, unseating its guests.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Seating`] wrapping
    /// [`SeatingError::ConfirmationRequired`] unless `confirmed`.
    pub async fn delete_table(
        &self,
        chart_id: ChartId,
        table_id: TableId,
        confirmed: bool,
    ) -> Result<(), GatewayError> {
        self.edit(chart_id, |editor| {
            editor
                .delete_table(table_id, confirmed)
                .map(|()| ((), ChangeSet::BOTH))
        })
        .await?;
        tracing::info!(%chart_id, %table_id, "table deleted");
        Ok(())
    }

    /// Adds an unassigned guest.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::GuestNameRequired`] for blank names.
    pub async fn add_guest(&self, chart_id: ChartId, name: &str) -> Result<Guest, GatewayError> {
        self.edit(chart_id, |editor| {
            editor.add_guest(name).map(|g| (g, ChangeSet::GUESTS))
        })
        .await
    }

    /// Seats a guest.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableFull`] when no seat is free.
    pub async fn assign(
        &self,
        chart_id: ChartId,
        guest_id: GuestId,
        table_id: TableId,
    ) -> Result<Guest, GatewayError> {
        let guest = self
            .edit(chart_id, |editor| {
                editor.assign(guest_id, table_id)?;
                seated_guest(editor, guest_id).map(|g| (g, ChangeSet::GUESTS))
            })
            .await?;
        tracing::info!(%chart_id, %guest_id, %table_id, "guest assigned");
        Ok(guest)
    }

    /// Unseats a guest.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown charts or guests.
    pub async fn unassign(
        &self,
        chart_id: ChartId,
        guest_id: GuestId,
    ) -> Result<Guest, GatewayError> {
        self.edit(chart_id, |editor| {
            editor.unassign(guest_id)?;
            seated_guest(editor, guest_id).map(|g| (g, ChangeSet::GUESTS))
        })
        .await
    }

    /// Steps back one history entry.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown charts.
    pub async fn undo(&self, chart_id: ChartId) -> Result<HistoryStatus, GatewayError> {
        self.step(chart_id, HistoryDirection::Undo).await
    }

    /// Steps forward one history entry.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown charts.
    pub async fn redo(&self, chart_id: ChartId) -> Result<HistoryStatus, GatewayError> {
        self.step(chart_id, HistoryDirection::Redo).await
    }

    /// Records the client's canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for non-positive sizes.
    pub async fn set_canvas(&self, chart_id: ChartId, canvas: Size) -> Result<Size, GatewayError> {
        if !(canvas.width.is_finite() && canvas.height.is_finite())
            || canvas.width <= 0.0
            || canvas.height <= 0.0
        {
            return Err(GatewayError::InvalidRequest(
                "canvas width and height must be positive".to_string(),
            ));
        }
        self.edit(chart_id, |editor| {
            editor.set_canvas(canvas);
            Ok((editor.canvas(), ChangeSet::NONE))
        })
        .await
    }

    /// Replaces the speech programme.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown charts.
    pub async fn set_speeches(
        &self,
        chart_id: ChartId,
        speeches: Vec<Speech>,
    ) -> Result<usize, GatewayError> {
        let entry_lock = self.registry.get(chart_id).await?;
        let mut entry = entry_lock.write().await;
        entry.editor.set_speeches(speeches);
        entry.touch();
        let speeches = entry.editor.speeches().to_vec();
        let count = speeches.len();
        let _ = self.event_bus.publish(ChartEvent::SpeechesChanged {
            chart_id,
            speeches,
            timestamp: Utc::now(),
        });
        drop(entry);
        tracing::info!(%chart_id, count, "speeches replaced");
        Ok(count)
    }

    /// Records a measured table layout for hit-testing.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown charts or tables.
    pub async fn measure_table(
        &self,
        chart_id: ChartId,
        table_id: TableId,
        size: Size,
    ) -> Result<Rect, GatewayError> {
        self.edit(chart_id, |editor| {
            editor
                .measure_table(table_id, size)
                .map(|rect| (rect, ChangeSet::NONE))
        })
        .await
    }

    /// Starts dragging a table.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableLocked`] for locked tables or
    /// [`SeatingError::DragInProgress`] while another gesture is active.
    pub async fn press_table(
        &self,
        chart_id: ChartId,
        table_id: TableId,
    ) -> Result<DragState, GatewayError> {
        self.edit(chart_id, |editor| {
            editor.press_table(table_id)?;
            Ok((editor.drag_state().clone(), ChangeSet::NONE))
        })
        .await
    }

    /// Picks up an unassigned guest.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::GuestAlreadySeated`] for seated guests or
    /// [`SeatingError::DragInProgress`] while another gesture is active.
    pub async fn long_press_guest(
        &self,
        chart_id: ChartId,
        guest_id: GuestId,
    ) -> Result<DragState, GatewayError> {
        self.edit(chart_id, |editor| {
            editor.long_press_guest(guest_id)?;
            Ok((editor.drag_state().clone(), ChangeSet::NONE))
        })
        .await
    }

    /// Feeds a pointer sample. Visible changes are broadcast as
    /// [`ChartEvent::DragPreview`]; nothing is committed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown charts.
    pub async fn pointer_move(
        &self,
        chart_id: ChartId,
        sample: GestureSample,
    ) -> Result<DragUpdate, GatewayError> {
        let entry_lock = self.registry.get(chart_id).await?;
        let mut entry = entry_lock.write().await;
        let update = entry.editor.pointer_move(sample);
        if update != DragUpdate::Unchanged {
            let _ = self.event_bus.publish(ChartEvent::DragPreview {
                chart_id,
                update,
                timestamp: Utc::now(),
            });
        }
        Ok(update)
    }

    /// Ends the active gesture and commits its result.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableFull`] when a guest is dropped on a full
    /// table; the guest stays unassigned and the gesture is over.
    pub async fn release(&self, chart_id: ChartId) -> Result<DragOutcome, GatewayError> {
        let entry_lock = self.registry.get(chart_id).await?;
        let mut entry = entry_lock.write().await;
        let result = entry.editor.release();

        let outcome = match &result {
            Ok((outcome, _)) => Some(*outcome),
            Err(_) => None,
        };
        if let Ok((_, changes)) = &result {
            self.commit(&mut entry, *changes);
        }
        let _ = self.event_bus.publish(ChartEvent::DragEnded {
            chart_id,
            outcome,
            timestamp: Utc::now(),
        });
        drop(entry);

        match result {
            Ok((outcome, _)) => {
                tracing::debug!(%chart_id, ?outcome, "drag released");
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(%chart_id, error = %e, "drop rejected");
                Err(e.into())
            }
        }
    }

    /// Discards the active gesture. Returns `true` if one was active.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown charts.
    pub async fn cancel_drag(&self, chart_id: ChartId) -> Result<bool, GatewayError> {
        let entry_lock = self.registry.get(chart_id).await?;
        let mut entry = entry_lock.write().await;
        let cancelled = entry.editor.cancel_drag();
        if cancelled {
            let _ = self.event_bus.publish(ChartEvent::DragEnded {
                chart_id,
                outcome: None,
                timestamp: Utc::now(),
            });
        }
        Ok(cancelled)
    }

    /// Unassigned guests matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ChartNotFound`] for unknown charts.
    pub async fn unassigned_guests(
        &self,
        chart_id: ChartId,
        query: &str,
    ) -> Result<Vec<Guest>, GatewayError> {
        self.read(chart_id, |entry| entry.editor.unassigned_guests(query))
            .await
    }

    async fn step(
        &self,
        chart_id: ChartId,
        direction: HistoryDirection,
    ) -> Result<HistoryStatus, GatewayError> {
        let entry_lock = self.registry.get(chart_id).await?;
        let mut entry = entry_lock.write().await;
        let was_dragging = entry.editor.is_dragging();
        let changes = match direction {
            HistoryDirection::Undo => entry.editor.undo(),
            HistoryDirection::Redo => entry.editor.redo(),
        };
        let status = HistoryStatus {
            changes,
            can_undo: entry.editor.can_undo(),
            can_redo: entry.editor.can_redo(),
        };
        if was_dragging && !entry.editor.is_dragging() {
            let _ = self.event_bus.publish(ChartEvent::DragEnded {
                chart_id,
                outcome: None,
                timestamp: Utc::now(),
            });
        }
        if !changes.is_empty() {
            self.commit(&mut entry, changes);
            let _ = self.event_bus.publish(ChartEvent::HistoryMoved {
                chart_id,
                direction,
                can_undo: status.can_undo,
                can_redo: status.can_redo,
                timestamp: Utc::now(),
            });
        }
        drop(entry);

        tracing::debug!(%chart_id, ?direction, ?changes, "history step");
        Ok(status)
    }

    /// Runs an editor operation under the chart's write lock and publishes
    /// the arrays it replaced.
    async fn edit<T>(
        &self,
        chart_id: ChartId,
        op: impl FnOnce(&mut SeatingEditor) -> Result<(T, ChangeSet), SeatingError>,
    ) -> Result<T, GatewayError> {
        let entry_lock = self.registry.get(chart_id).await?;
        let mut entry = entry_lock.write().await;
        let (value, changes) = op(&mut entry.editor)?;
        self.commit(&mut entry, changes);
        Ok(value)
    }

    /// Publishes under the chart lock so subscribers see arrays in commit
    /// order.
    fn commit(&self, entry: &mut ChartEntry, changes: ChangeSet) {
        if changes.is_empty() {
            return;
        }
        entry.touch();
        let chart_id = entry.chart_id;
        let timestamp = Utc::now();
        if changes.tables {
            let _ = self.event_bus.publish(ChartEvent::TablesChanged {
                chart_id,
                tables: entry.editor.tables().to_vec(),
                timestamp,
            });
        }
        if changes.guests {
            let _ = self.event_bus.publish(ChartEvent::GuestsChanged {
                chart_id,
                guests: entry.editor.guests().to_vec(),
                timestamp,
            });
        }
    }
}

fn seated_guest(editor: &SeatingEditor, guest_id: GuestId) -> Result<Guest, SeatingError> {
    editor
        .guest(guest_id)
        .cloned()
        .ok_or(SeatingError::GuestNotFound(guest_id))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Point;

    fn make_service() -> ChartService {
        ChartService::new(
            Arc::new(ChartRegistry::new()),
            EventBus::new(1000),
            EditorSettings::default(),
        )
    }

    async fn make_chart(service: &ChartService) -> ChartId {
        let Ok(summary) = service.create_chart(NewChart::default()).await else {
            panic!("chart creation failed");
        };
        summary.chart_id
    }

    #[tokio::test]
    async fn create_chart_uses_default_name() {
        let service = make_service();
        let Ok(summary) = service
            .create_chart(NewChart {
                name: Some("   ".to_string()),
                ..NewChart::default()
            })
            .await
        else {
            panic!("chart creation failed");
        };
        assert_eq!(summary.name, "Seating chart");
        assert_eq!(service.list_charts().await.len(), 1);
    }

    #[tokio::test]
    async fn create_chart_emits_event() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();
        let chart_id = make_chart(&service).await;

        let Ok(ChartEvent::ChartCreated { chart_id: id, .. }) = rx.recv().await else {
            panic!("expected chart_created");
        };
        assert_eq!(id, chart_id);
    }

    #[tokio::test]
    async fn add_table_publishes_full_table_array() {
        let service = make_service();
        let chart_id = make_chart(&service).await;
        let _ = service.add_table(chart_id, TableShape::Round).await;

        let mut rx = service.event_bus().subscribe();
        let Ok(table) = service.add_table(chart_id, TableShape::Square).await else {
            panic!("add table failed");
        };
        assert_eq!(table.name, "Table 2");
        assert_eq!(table.position, Point::new(50.0, 150.0));

        let Ok(ChartEvent::TablesChanged { tables, .. }) = rx.recv().await else {
            panic!("expected tables_changed");
        };
        assert_eq!(tables.len(), 2);
    }

    #[tokio::test]
    async fn rejected_assignment_publishes_nothing() {
        let service = make_service();
        let chart_id = make_chart(&service).await;
        let Ok(table) = service.add_table(chart_id, TableShape::Square).await else {
            panic!("add table failed");
        };
        for n in 0..4 {
            let Ok(guest) = service.add_guest(chart_id, &format!("G{n}")).await else {
                panic!("add guest failed");
            };
            assert!(service.assign(chart_id, guest.id, table.id).await.is_ok());
        }
        let Ok(fifth) = service.add_guest(chart_id, "G5").await else {
            panic!("add guest failed");
        };

        let mut rx = service.event_bus().subscribe();
        let result = service.assign(chart_id, fifth.id, table.id).await;
        assert!(matches!(
            result,
            Err(GatewayError::Seating(SeatingError::TableFull { seats: 4, .. }))
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn delete_without_confirmation_keeps_table() {
        let service = make_service();
        let chart_id = make_chart(&service).await;
        let Ok(table) = service.add_table(chart_id, TableShape::Round).await else {
            panic!("add table failed");
        };

        let result = service.delete_table(chart_id, table.id, false).await;
        assert!(matches!(
            result,
            Err(GatewayError::Seating(SeatingError::ConfirmationRequired { .. }))
        ));
        assert!(service.delete_table(chart_id, table.id, true).await.is_ok());
        let Ok(count) = service
            .read(chart_id, |entry| entry.editor.tables().len())
            .await
        else {
            panic!("read failed");
        };
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn undo_publishes_history_moved() {
        let service = make_service();
        let chart_id = make_chart(&service).await;
        let _ = service.add_table(chart_id, TableShape::Round).await;

        let mut rx = service.event_bus().subscribe();
        let Ok(status) = service.undo(chart_id).await else {
            panic!("undo failed");
        };
        assert!(!status.can_undo);
        assert!(status.can_redo);
        assert_eq!(status.changes, ChangeSet::TABLES);

        let Ok(ChartEvent::TablesChanged { tables, .. }) = rx.recv().await else {
            panic!("expected tables_changed");
        };
        assert!(tables.is_empty());
        let Ok(ChartEvent::HistoryMoved { direction, .. }) = rx.recv().await else {
            panic!("expected history_moved");
        };
        assert_eq!(direction, HistoryDirection::Undo);
    }

    #[tokio::test]
    async fn undo_during_drag_ends_gesture() {
        let service = make_service();
        let chart_id = make_chart(&service).await;
        let Ok(table) = service.add_table(chart_id, TableShape::Round).await else {
            panic!("add table failed");
        };
        assert!(service.press_table(chart_id, table.id).await.is_ok());

        let mut rx = service.event_bus().subscribe();
        assert!(service.undo(chart_id).await.is_ok());
        assert!(matches!(
            rx.recv().await,
            Ok(ChartEvent::DragEnded { outcome: None, .. })
        ));
        assert!(matches!(rx.recv().await, Ok(ChartEvent::TablesChanged { .. })));
        assert!(matches!(rx.recv().await, Ok(ChartEvent::HistoryMoved { .. })));

        let Ok(dragging) = service.read(chart_id, |e| e.editor.is_dragging()).await else {
            panic!("read failed");
        };
        assert!(!dragging);
    }

    #[tokio::test]
    async fn create_chart_normalises_imported_state() {
        let service = make_service();
        let mut empty = Table::new_default(TableShape::Round, 0);
        empty.seats = 0;
        let mut huge = Table::new_default(TableShape::Rectangle, 1);
        huge.seats = 500;
        let Ok(mut stray) = Guest::new("Stray") else {
            panic!("valid guest");
        };
        stray.table_id = Some(TableId::new());

        let Ok(summary) = service
            .create_chart(NewChart {
                tables: vec![empty, huge],
                guests: vec![stray],
                ..NewChart::default()
            })
            .await
        else {
            panic!("chart creation failed");
        };
        let Ok((seats, seated)) = service
            .read(summary.chart_id, |e| {
                let seats: Vec<u32> = e.editor.tables().iter().map(|t| t.seats).collect();
                let seated = e.editor.guests().iter().any(|g| g.table_id.is_some());
                (seats, seated)
            })
            .await
        else {
            panic!("read failed");
        };
        assert_eq!(seats, vec![1, 30]);
        assert!(!seated);
        assert_eq!(summary.seated_count, 0);
    }

    #[tokio::test]
    async fn create_chart_rejects_duplicate_ids() {
        let service = make_service();
        let table = Table::new_default(TableShape::Square, 0);
        let result = service
            .create_chart(NewChart {
                tables: vec![table.clone(), table.clone()],
                ..NewChart::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Seating(SeatingError::DuplicateTable(id))) if id == table.id
        ));
        assert!(service.list_charts().await.is_empty());
    }

    #[tokio::test]
    async fn table_drag_commits_on_release_only() {
        let service = make_service();
        let chart_id = make_chart(&service).await;
        let Ok(table) = service.add_table(chart_id, TableShape::Round).await else {
            panic!("add table failed");
        };
        assert!(service.press_table(chart_id, table.id).await.is_ok());

        let mut rx = service.event_bus().subscribe();
        let sample = GestureSample {
            x: 0.0,
            y: 0.0,
            dx: 13.0,
            dy: -3.0,
        };
        let Ok(DragUpdate::TableMoved { position, .. }) =
            service.pointer_move(chart_id, sample).await
        else {
            panic!("expected table_moved");
        };
        assert_eq!(position, Point::new(64.0, 48.0));
        assert!(matches!(rx.recv().await, Ok(ChartEvent::DragPreview { .. })));

        let Ok(DragOutcome::CommitTable { position, .. }) = service.release(chart_id).await else {
            panic!("expected commit");
        };
        assert_eq!(position, Point::new(64.0, 48.0));
        assert!(matches!(rx.recv().await, Ok(ChartEvent::TablesChanged { .. })));
        assert!(matches!(rx.recv().await, Ok(ChartEvent::DragEnded { .. })));
    }

    #[tokio::test]
    async fn restore_chart_keeps_identity() {
        let service = make_service();
        let chart_id = ChartId::new();
        let table = Table::new_default(TableShape::Round, 0);
        let restored = RestoredChart {
            chart_id,
            name: "Restored".to_string(),
            created_at: Utc::now(),
            revision: 7,
            tables: vec![table],
            guests: Vec::new(),
            speeches: Vec::new(),
        };
        assert_eq!(service.restore_chart(restored).await.ok(), Some(chart_id));

        let Ok((revision, can_undo)) = service
            .read(chart_id, |entry| (entry.revision, entry.editor.can_undo()))
            .await
        else {
            panic!("read failed");
        };
        assert_eq!(revision, 7);
        assert!(!can_undo);
    }

    #[tokio::test]
    async fn set_canvas_rejects_empty_size() {
        let service = make_service();
        let chart_id = make_chart(&service).await;
        assert!(
            service
                .set_canvas(chart_id, Size::new(0.0, 600.0))
                .await
                .is_err()
        );
        assert!(
            service
                .set_canvas(chart_id, Size::new(800.0, 600.0))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn unknown_chart_is_not_found() {
        let service = make_service();
        assert!(matches!(
            service.add_table(ChartId::new(), TableShape::Round).await,
            Err(GatewayError::ChartNotFound(_))
        ));
    }
}
