//! The seating-chart editor aggregate.
//!
//! [`SeatingEditor`] owns the authoritative table and guest arrays of one
//! chart together with its undo history, the drag controller and the
//! hit-test index. Every mutation is synchronous and in-memory.
//!
//! # History
//!
//! The history entry under the cursor always equals the committed state.
//! [`SeatingEditor::load`] seeds a baseline and every committed mutation
//! pushes the state it produced, so undo restores the state before the
//! mutation and redo restores the state after it. A rejected operation or
//! an abandoned guest drag records nothing.

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

use super::assignment;
use super::drag::{DragBounds, DragController, DragOutcome, DragState, DragUpdate, GestureSample};
use super::geometry::{DEFAULT_GRID_SIZE, GridSpec, Point, Rect, Size};
use super::history::{DEFAULT_HISTORY_LIMIT, HistoryStack, Snapshot};
use super::hit_test::HitTestIndex;
use super::table::clamp_seats;
use super::{
    Guest, GuestId, SeatingError, Speech, Table, TableCategory, TableDraft, TableId, TableShape,
};

/// Default footprint reserved for a table when clamping drags.
pub const DEFAULT_TABLE_FOOTPRINT: Size = Size::new(120.0, 100.0);

/// Tunables shared by every chart on the gateway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    /// Grid unit in pixels.
    pub grid_size: f64,
    /// Snapshots retained by the undo history.
    pub history_limit: usize,
    /// Footprint used to keep dragged tables inside the canvas.
    pub table_footprint: Size,
    /// Canvas size assumed until the client reports a measured one.
    pub default_canvas: Size,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            table_footprint: DEFAULT_TABLE_FOOTPRINT,
            default_canvas: Size::new(1024.0, 768.0),
        }
    }
}

/// Which authoritative arrays an operation replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct ChangeSet {
    /// The table array changed.
    pub tables: bool,
    /// The guest array changed.
    pub guests: bool,
}

impl ChangeSet {
    /// Nothing changed.
    pub const NONE: Self = Self {
        tables: false,
        guests: false,
    };
    /// Only tables changed.
    pub const TABLES: Self = Self {
        tables: true,
        guests: false,
    };
    /// Only guests changed.
    pub const GUESTS: Self = Self {
        tables: false,
        guests: true,
    };
    /// Both arrays changed.
    pub const BOTH: Self = Self {
        tables: true,
        guests: true,
    };

    /// Returns `true` if nothing changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.tables && !self.guests
    }
}

/// Derived per-table view: occupancy, speakers and drag highlight.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TableSummary {
    /// Table id.
    pub table_id: TableId,
    /// Display name.
    pub name: String,
    /// Shape.
    pub shape: TableShape,
    /// Category.
    pub category: TableCategory,
    /// Category label.
    pub category_label: String,
    /// Category accent colour.
    pub category_color: String,
    /// Position to draw at, including an uncommitted drag.
    pub display_position: Point,
    /// Seat count.
    pub seats: u32,
    /// Seated guests.
    pub filled: usize,
    /// Free seats; zero when the table is over capacity.
    pub available: usize,
    /// Names of seated guests in guest-list order.
    pub guest_names: Vec<String>,
    /// Number of speeches given from this table.
    pub speaker_count: usize,
    /// Name of the speaker currently on, if seated here.
    pub speaking_now: Option<String>,
    /// The table is highlighted as the current guest drop target.
    pub is_drop_target: bool,
    /// Locked marker.
    pub locked: bool,
    /// Reserved marker.
    pub reserved: bool,
}

/// Editor state for one seating chart.
#[derive(Debug, Clone)]
pub struct SeatingEditor {
    tables: Vec<Table>,
    guests: Vec<Guest>,
    speeches: Vec<Speech>,
    history: HistoryStack<Snapshot>,
    drag: DragController,
    hitboxes: HitTestIndex,
    canvas: Size,
    settings: EditorSettings,
}

impl SeatingEditor {
    /// Creates an empty chart.
    #[must_use]
    pub fn new(settings: EditorSettings) -> Self {
        let mut editor = Self {
            tables: Vec::new(),
            guests: Vec::new(),
            speeches: Vec::new(),
            history: HistoryStack::new(settings.history_limit),
            drag: DragController::new(),
            hitboxes: HitTestIndex::new(),
            canvas: settings.default_canvas,
            settings,
        };
        editor.replace_all(Vec::new(), Vec::new());
        editor
    }

    /// Replaces both arrays with externally supplied state and restarts the
    /// history from it.
    ///
    /// Seat counts are clamped to `[MIN_SEATS, MAX_SEATS]` and guests seated
    /// at a table that is not in `tables` become unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::DuplicateTable`] or
    /// [`SeatingError::DuplicateGuest`] when an id appears twice. The editor
    /// is left unchanged.
    pub fn load(
        &mut self,
        mut tables: Vec<Table>,
        mut guests: Vec<Guest>,
    ) -> Result<(), SeatingError> {
        let mut table_ids = HashSet::with_capacity(tables.len());
        for table in &mut tables {
            if !table_ids.insert(table.id) {
                return Err(SeatingError::DuplicateTable(table.id));
            }
            table.seats = clamp_seats(i64::from(table.seats));
        }

        let mut guest_ids = HashSet::with_capacity(guests.len());
        for guest in &mut guests {
            if !guest_ids.insert(guest.id) {
                return Err(SeatingError::DuplicateGuest(guest.id));
            }
            if guest.table_id.is_some_and(|id| !table_ids.contains(&id)) {
                guest.table_id = None;
            }
        }

        self.replace_all(tables, guests);
        Ok(())
    }

    /// Every table in display order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Every guest in list order.
    #[must_use]
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// Speeches supplied by the programme.
    #[must_use]
    pub fn speeches(&self) -> &[Speech] {
        &self.speeches
    }

    /// Current canvas size.
    #[must_use]
    pub const fn canvas(&self) -> Size {
        self.canvas
    }

    /// Editor tunables.
    #[must_use]
    pub const fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Active drag gesture.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Returns `true` if undo would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if redo would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// History cursor position.
    #[must_use]
    pub const fn history_index(&self) -> usize {
        self.history.index()
    }

    /// Number of retained history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Copies the committed state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.tables, &self.guests)
    }

    /// Looks up a table.
    #[must_use]
    pub fn table(&self, table_id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    /// Looks up a guest.
    #[must_use]
    pub fn guest(&self, guest_id: GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == guest_id)
    }

    /// Measured rectangle used for hit-testing a table.
    #[must_use]
    pub fn hitbox(&self, table_id: TableId) -> Option<Rect> {
        self.hitboxes.get(table_id)
    }

    /// Records the client's canvas size.
    pub fn set_canvas(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    /// Replaces the read-only speech list.
    pub fn set_speeches(&mut self, speeches: Vec<Speech>) {
        self.speeches = speeches;
    }

    /// Records a table's measured layout size at its current position.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableNotFound`] for unknown ids.
    pub fn measure_table(&mut self, table_id: TableId, size: Size) -> Result<Rect, SeatingError> {
        let origin = self
            .display_position(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        let rect = Rect::from_origin(origin, size);
        self.hitboxes.measure(table_id, rect);
        Ok(rect)
    }

    /// Adds a table of the given shape below the existing ones.
    pub fn add_table(&mut self, shape: TableShape) -> Table {
        let table = Table::new_default(shape, self.tables.len());
        self.hitboxes.move_to(table.id, table.position, self.settings.table_footprint);
        self.tables.push(table.clone());
        self.commit();
        table
    }

    /// Saves the edit form for a table. Seat counts are clamped; guests
    /// already seated beyond a reduced capacity stay seated.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableNotFound`] for unknown ids.
    pub fn update_table(
        &mut self,
        table_id: TableId,
        draft: &TableDraft,
    ) -> Result<Table, SeatingError> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        table.apply(draft);
        let updated = table.clone();
        self.commit();
        Ok(updated)
    }

    /// Confirmation prompt for deleting a table.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableNotFound`] for unknown ids.
    pub fn delete_prompt(&self, table_id: TableId) -> Result<String, SeatingError> {
        self.table(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        Ok(assignment::delete_prompt(&self.guests, table_id))
    }

    /// Deletes a table, unseating its guests.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::ConfirmationRequired`] unless `confirmed`, and
    /// [`SeatingError::TableNotFound`] for unknown ids.
    pub fn delete_table(&mut self, table_id: TableId, confirmed: bool) -> Result<(), SeatingError> {
        let prompt = self.delete_prompt(table_id)?;
        if !confirmed {
            return Err(SeatingError::ConfirmationRequired { message: prompt });
        }
        let (tables, guests) = assignment::delete_table(&self.tables, &self.guests, table_id)?;
        self.tables = tables;
        self.guests = guests;
        self.hitboxes.remove(table_id);
        self.drag.forget_table(table_id);
        self.commit();
        Ok(())
    }

    /// Adds an unassigned guest.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::GuestNameRequired`] for blank names.
    pub fn add_guest(&mut self, name: &str) -> Result<Guest, SeatingError> {
        let guest = Guest::new(name)?;
        self.guests.push(guest.clone());
        self.commit();
        Ok(guest)
    }

    /// Seats a guest if the table has a free seat.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableFull`] when every seat is taken, or a
    /// not-found error for unknown ids. State is unchanged on error.
    pub fn assign(&mut self, guest_id: GuestId, table_id: TableId) -> Result<(), SeatingError> {
        self.guests = assignment::assign(&self.tables, &self.guests, guest_id, table_id)?;
        self.commit();
        Ok(())
    }

    /// Unseats a guest.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::GuestNotFound`] for unknown ids.
    pub fn unassign(&mut self, guest_id: GuestId) -> Result<(), SeatingError> {
        self.guests = assignment::unassign(&self.guests, guest_id)?;
        self.commit();
        Ok(())
    }

    /// Restores the state before the last committed mutation.
    pub fn undo(&mut self) -> ChangeSet {
        match self.history.undo() {
            Some(snapshot) => self.restore(snapshot),
            None => ChangeSet::NONE,
        }
    }

    /// Re-applies the last undone mutation.
    pub fn redo(&mut self) -> ChangeSet {
        match self.history.redo() {
            Some(snapshot) => self.restore(snapshot),
            None => ChangeSet::NONE,
        }
    }

    /// Starts dragging a table.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableNotFound`], [`SeatingError::TableLocked`]
    /// or [`SeatingError::DragInProgress`].
    pub fn press_table(&mut self, table_id: TableId) -> Result<(), SeatingError> {
        let table = self
            .tables
            .iter()
            .find(|t| t.id == table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        self.drag.press_table(table)
    }

    /// Picks up an unassigned guest for a drop onto a table.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::GuestNotFound`],
    /// [`SeatingError::GuestAlreadySeated`] or
    /// [`SeatingError::DragInProgress`].
    pub fn long_press_guest(&mut self, guest_id: GuestId) -> Result<(), SeatingError> {
        let guest = self
            .guests
            .iter()
            .find(|g| g.id == guest_id)
            .ok_or(SeatingError::GuestNotFound(guest_id))?;
        self.drag.long_press_guest(guest)
    }

    /// Feeds a pointer sample to the active gesture. Never commits.
    pub fn pointer_move(&mut self, sample: GestureSample) -> DragUpdate {
        let bounds = DragBounds {
            grid: GridSpec::new(self.settings.grid_size),
            canvas: self.canvas,
            footprint: self.settings.table_footprint,
            hitboxes: &self.hitboxes,
        };
        self.drag.pointer_move(sample, &bounds)
    }

    /// Ends the active gesture and commits its result.
    ///
    /// A table drag commits the final snapped position. A guest drop runs
    /// the capacity check; a full table rejects the drop and leaves the
    /// guest unseated.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::TableFull`] for a rejected drop, or
    /// [`SeatingError::TableNotFound`] if the dragged table vanished.
    pub fn release(&mut self) -> Result<(DragOutcome, ChangeSet), SeatingError> {
        let outcome = self.drag.release();
        let changes = match outcome {
            DragOutcome::Nothing | DragOutcome::Abandoned { .. } => ChangeSet::NONE,
            DragOutcome::CommitTable { table_id, position } => {
                let table = self
                    .tables
                    .iter_mut()
                    .find(|t| t.id == table_id)
                    .ok_or(SeatingError::TableNotFound(table_id))?;
                if table.position == position {
                    ChangeSet::NONE
                } else {
                    table.position = position;
                    self.hitboxes.move_to(table_id, position, self.settings.table_footprint);
                    self.commit();
                    ChangeSet::TABLES
                }
            }
            DragOutcome::DropGuest { guest_id, table_id } => {
                self.assign(guest_id, table_id)?;
                ChangeSet::GUESTS
            }
        };
        Ok((outcome, changes))
    }

    /// Discards the active gesture. Returns `true` if one was active.
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.cancel();
        if cancelled {
            // a mid-drag measure may have stored the abandoned position
            self.sync_hitboxes();
        }
        cancelled
    }

    /// Returns `true` while a drag gesture is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Position to draw a table at: the uncommitted drag position while it
    /// is being dragged, else its committed position.
    #[must_use]
    pub fn display_position(&self, table_id: TableId) -> Option<Point> {
        self.drag
            .transient_position(table_id)
            .or_else(|| self.table(table_id).map(|t| t.position))
    }

    /// Unassigned guests matching a search query.
    #[must_use]
    pub fn unassigned_guests(&self, query: &str) -> Vec<Guest> {
        assignment::unassigned(&self.guests, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Per-table occupancy and speaker summaries in display order.
    #[must_use]
    pub fn table_summaries(&self) -> Vec<TableSummary> {
        let by_table = assignment::guests_by_table(&self.guests);
        let speeches = assignment::speeches_by_table(&self.speeches);
        let drop_target = self.drag.drop_target();

        self.tables
            .iter()
            .map(|table| {
                let seated = by_table.get(&table.id).map_or(&[][..], Vec::as_slice);
                let speakers = speeches.get(&table.id).map_or(&[][..], Vec::as_slice);
                let seats = usize::try_from(table.seats).unwrap_or(usize::MAX);
                TableSummary {
                    table_id: table.id,
                    name: table.name.clone(),
                    shape: table.shape,
                    category: table.category,
                    category_label: table.category.label().to_string(),
                    category_color: table.category.color().to_string(),
                    display_position: self.display_position(table.id).unwrap_or(table.position),
                    seats: table.seats,
                    filled: seated.len(),
                    available: seats.saturating_sub(seated.len()),
                    guest_names: seated.iter().map(|g| g.name.clone()).collect(),
                    speaker_count: speakers.len(),
                    speaking_now: speakers
                        .iter()
                        .find(|s| s.is_speaking())
                        .map(|s| s.speaker_name.clone()),
                    is_drop_target: drop_target == Some(table.id),
                    locked: table.locked,
                    reserved: table.reserved,
                }
            })
            .collect()
    }

    fn commit(&mut self) {
        self.history.push(Snapshot::capture(&self.tables, &self.guests));
    }

    fn replace_all(&mut self, tables: Vec<Table>, guests: Vec<Guest>) {
        self.tables = tables;
        self.guests = guests;
        self.drag.cancel();
        self.hitboxes.clear();
        self.sync_hitboxes();
        self.history.reset(Snapshot::capture(&self.tables, &self.guests));
    }

    fn restore(&mut self, snapshot: Snapshot) -> ChangeSet {
        let changes = ChangeSet {
            tables: snapshot.tables != self.tables,
            guests: snapshot.guests != self.guests,
        };
        self.tables = snapshot.tables;
        self.guests = snapshot.guests;
        self.drag.cancel();
        self.sync_hitboxes();
        changes
    }

    /// Realigns hitboxes with committed positions, keeping measured sizes
    /// and dropping deleted tables.
    fn sync_hitboxes(&mut self) {
        let previous = std::mem::take(&mut self.hitboxes);
        for table in &self.tables {
            let size = previous
                .get(table.id)
                .map_or(self.settings.table_footprint, |rect| rect.size());
            self.hitboxes.measure(table.id, Rect::from_origin(table.position, size));
        }
    }
}

impl Default for SeatingEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn settings() -> EditorSettings {
        EditorSettings {
            default_canvas: Size::new(800.0, 600.0),
            ..EditorSettings::default()
        }
    }

    fn editor_with_table(shape: TableShape) -> (SeatingEditor, Table) {
        let mut editor = SeatingEditor::new(settings());
        let table = editor.add_table(shape);
        (editor, table)
    }

    fn add_guest(editor: &mut SeatingEditor, name: &str) -> Guest {
        let Ok(guest) = editor.add_guest(name) else {
            panic!("valid guest");
        };
        guest
    }

    fn drag_table(editor: &mut SeatingEditor, table_id: TableId, dx: f64, dy: f64) {
        if editor.press_table(table_id).is_err() {
            panic!("press failed");
        }
        let _ = editor.pointer_move(GestureSample {
            x: 0.0,
            y: 0.0,
            dx,
            dy,
        });
        if editor.release().is_err() {
            panic!("release failed");
        }
    }

    #[test]
    fn drag_commit_snaps_table_to_grid() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        drag_table(&mut editor, table.id, 13.0, -3.0);

        let Some(moved) = editor.table(table.id) else {
            panic!("table missing");
        };
        assert_eq!(moved.position, Point::new(64.0, 48.0));
        assert_eq!(moved.position.x % 8.0, 0.0);
        assert_eq!(moved.position.y % 8.0, 0.0);
    }

    #[test]
    fn drag_is_not_committed_until_release() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        let _ = editor.press_table(table.id);
        let update = editor.pointer_move(GestureSample {
            x: 0.0,
            y: 0.0,
            dx: 100.0,
            dy: 100.0,
        });
        assert!(matches!(update, DragUpdate::TableMoved { .. }));
        assert_eq!(
            editor.table(table.id).map(|t| t.position),
            Some(Point::new(50.0, 50.0))
        );
        assert_eq!(
            editor.display_position(table.id),
            Some(Point::new(152.0, 152.0))
        );

        assert!(editor.cancel_drag());
        assert_eq!(
            editor.display_position(table.id),
            Some(Point::new(50.0, 50.0))
        );
    }

    #[test]
    fn drag_stays_inside_canvas() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        drag_table(&mut editor, table.id, 5_000.0, 5_000.0);
        let Some(moved) = editor.table(table.id) else {
            panic!("table missing");
        };
        assert!(moved.position.x <= 800.0 - 120.0);
        assert!(moved.position.y <= 600.0 - 100.0);
        assert_eq!(moved.position.x % 8.0, 0.0);
        assert_eq!(moved.position.y % 8.0, 0.0);
    }

    #[test]
    fn undo_restores_pre_drag_position_and_redo_reapplies() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        drag_table(&mut editor, table.id, 13.0, -3.0);
        let after = editor.snapshot();

        assert_eq!(editor.undo(), ChangeSet::TABLES);
        assert_eq!(
            editor.table(table.id).map(|t| t.position),
            Some(Point::new(50.0, 50.0))
        );

        assert_eq!(editor.redo(), ChangeSet::TABLES);
        assert_eq!(editor.snapshot(), after);
    }

    #[test]
    fn fifth_guest_on_four_seat_table_is_rejected() {
        let (mut editor, table) = editor_with_table(TableShape::Square);
        for n in 1..=4 {
            let guest = add_guest(&mut editor, &format!("Guest {n}"));
            assert!(editor.assign(guest.id, table.id).is_ok());
        }
        let fifth = add_guest(&mut editor, "Guest 5");
        let history_before = editor.history_len();

        assert_eq!(
            editor.assign(fifth.id, table.id),
            Err(SeatingError::TableFull {
                table_id: table.id,
                seats: 4
            })
        );
        assert_eq!(editor.guest(fifth.id).and_then(|g| g.table_id), None);
        assert_eq!(assignment::occupancy(editor.guests(), table.id), 4);
        assert_eq!(editor.history_len(), history_before);
    }

    #[test]
    fn guest_drop_assigns_to_table_under_pointer() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        let guest = add_guest(&mut editor, "Ola");

        assert!(editor.long_press_guest(guest.id).is_ok());
        let update = editor.pointer_move(GestureSample {
            x: 60.0,
            y: 60.0,
            dx: 0.0,
            dy: 0.0,
        });
        assert_eq!(
            update,
            DragUpdate::DropTargetChanged {
                guest_id: guest.id,
                table_id: Some(table.id)
            }
        );
        let Ok((outcome, changes)) = editor.release() else {
            panic!("release failed");
        };
        assert!(matches!(outcome, DragOutcome::DropGuest { .. }));
        assert_eq!(changes, ChangeSet::GUESTS);
        assert_eq!(editor.guest(guest.id).and_then(|g| g.table_id), Some(table.id));
    }

    #[test]
    fn abandoned_guest_drag_records_no_history() {
        let (mut editor, _table) = editor_with_table(TableShape::Round);
        let guest = add_guest(&mut editor, "Ola");
        let len = editor.history_len();

        assert!(editor.long_press_guest(guest.id).is_ok());
        let _ = editor.pointer_move(GestureSample {
            x: 700.0,
            y: 500.0,
            dx: 0.0,
            dy: 0.0,
        });
        let Ok((outcome, changes)) = editor.release() else {
            panic!("release failed");
        };
        assert_eq!(outcome, DragOutcome::Abandoned { guest_id: guest.id });
        assert!(changes.is_empty());
        assert_eq!(editor.history_len(), len);
    }

    #[test]
    fn delete_requires_confirmation_then_cascades() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        let guest = add_guest(&mut editor, "Ola");
        assert!(editor.assign(guest.id, table.id).is_ok());

        let Err(SeatingError::ConfirmationRequired { message }) =
            editor.delete_table(table.id, false)
        else {
            panic!("expected confirmation prompt");
        };
        assert!(message.contains("1 assigned guest"));
        assert!(editor.table(table.id).is_some());

        assert!(editor.delete_table(table.id, true).is_ok());
        assert!(editor.table(table.id).is_none());
        assert!(editor.guests().iter().all(|g| g.table_id.is_none()));
        assert!(editor.hitbox(table.id).is_none());
    }

    #[test]
    fn undo_of_delete_restores_table_and_seats() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        let guest = add_guest(&mut editor, "Ola");
        assert!(editor.assign(guest.id, table.id).is_ok());
        assert!(editor.delete_table(table.id, true).is_ok());

        assert_eq!(editor.undo(), ChangeSet::BOTH);
        assert!(editor.table(table.id).is_some());
        assert_eq!(editor.guest(guest.id).and_then(|g| g.table_id), Some(table.id));
        assert!(editor.hitbox(table.id).is_some());
    }

    #[test]
    fn shrinking_seats_does_not_evict() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        for n in 0..6 {
            let guest = add_guest(&mut editor, &format!("G{n}"));
            assert!(editor.assign(guest.id, table.id).is_ok());
        }
        let mut draft = TableDraft::from(&table);
        draft.seats = 2;
        assert!(editor.update_table(table.id, &draft).is_ok());
        assert_eq!(assignment::occupancy(editor.guests(), table.id), 6);

        let summaries = editor.table_summaries();
        let Some(summary) = summaries.first() else {
            panic!("missing summary");
        };
        assert_eq!(summary.filled, 6);
        assert_eq!(summary.available, 0);
    }

    #[test]
    fn history_is_bounded_by_settings() {
        let mut editor = SeatingEditor::new(EditorSettings {
            history_limit: 5,
            ..settings()
        });
        for _ in 0..20 {
            let _ = editor.add_table(TableShape::Square);
        }
        assert_eq!(editor.history_len(), 5);
        assert_eq!(editor.history_index(), 4);
        assert!(!editor.can_redo());
    }

    #[test]
    fn undo_on_fresh_chart_is_noop() {
        let mut editor = SeatingEditor::default();
        assert!(!editor.can_undo());
        assert_eq!(editor.undo(), ChangeSet::NONE);
        assert_eq!(editor.redo(), ChangeSet::NONE);
    }

    #[test]
    fn measured_hitbox_is_used_for_drops() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        let Ok(rect) = editor.measure_table(table.id, Size::new(40.0, 40.0)) else {
            panic!("measure failed");
        };
        assert_eq!(rect.origin(), Point::new(50.0, 50.0));

        let guest = add_guest(&mut editor, "Ola");
        assert!(editor.long_press_guest(guest.id).is_ok());
        // inside the default footprint but outside the measured box
        let update = editor.pointer_move(GestureSample {
            x: 150.0,
            y: 120.0,
            dx: 0.0,
            dy: 0.0,
        });
        assert_eq!(update, DragUpdate::Unchanged);
    }

    #[test]
    fn summaries_report_speakers() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        editor.set_speeches(vec![Speech {
            id: crate::domain::SpeechId::new(),
            speaker_name: "Best man".to_string(),
            role: "Toast".to_string(),
            time: "19:30".to_string(),
            order: 1,
            status: Some(crate::domain::SpeechStatus::Speaking),
            table_id: Some(table.id),
            duration_minutes: Some(5),
            notes: None,
        }]);
        let summaries = editor.table_summaries();
        let Some(summary) = summaries.first() else {
            panic!("missing summary");
        };
        assert_eq!(summary.speaker_count, 1);
        assert_eq!(summary.speaking_now.as_deref(), Some("Best man"));
    }

    #[test]
    fn load_resets_history() {
        let (mut editor, _table) = editor_with_table(TableShape::Round);
        assert!(editor.can_undo());
        assert!(editor.load(Vec::new(), Vec::new()).is_ok());
        assert!(!editor.can_undo());
        assert_eq!(editor.history_len(), 1);
    }

    #[test]
    fn load_clamps_seats_and_unseats_dangling_guests() {
        let mut empty = Table::new_default(TableShape::Round, 0);
        empty.seats = 0;
        let mut huge = Table::new_default(TableShape::Rectangle, 1);
        huge.seats = 500;
        let Ok(mut stray) = Guest::new("Stray") else {
            panic!("valid guest");
        };
        stray.table_id = Some(TableId::new());
        let Ok(mut seated) = Guest::new("Seated") else {
            panic!("valid guest");
        };
        seated.table_id = Some(empty.id);

        let mut editor = SeatingEditor::new(settings());
        assert!(editor.load(vec![empty.clone(), huge], vec![stray, seated]).is_ok());

        let seats: Vec<u32> = editor.tables().iter().map(|t| t.seats).collect();
        assert_eq!(seats, vec![1, 30]);
        let seated_at: Vec<Option<TableId>> =
            editor.guests().iter().map(|g| g.table_id).collect();
        assert_eq!(seated_at, vec![None, Some(empty.id)]);

        let newcomer = add_guest(&mut editor, "Newcomer");
        assert!(matches!(
            editor.assign(newcomer.id, empty.id),
            Err(SeatingError::TableFull { seats: 1, .. })
        ));
    }

    #[test]
    fn load_rejects_duplicate_ids_without_changes() {
        let (mut editor, table) = editor_with_table(TableShape::Square);
        let before = editor.tables().to_vec();

        let result = editor.load(vec![table.clone(), table.clone()], Vec::new());
        assert_eq!(result, Err(SeatingError::DuplicateTable(table.id)));
        assert_eq!(editor.tables(), before.as_slice());
        assert!(editor.can_undo());

        let Ok(guest) = Guest::new("Twin") else {
            panic!("valid guest");
        };
        let result = editor.load(Vec::new(), vec![guest.clone(), guest.clone()]);
        assert_eq!(result, Err(SeatingError::DuplicateGuest(guest.id)));
    }

    #[test]
    fn cancelled_drag_realigns_measured_hitbox() {
        let (mut editor, table) = editor_with_table(TableShape::Round);
        assert!(editor.press_table(table.id).is_ok());
        let _ = editor.pointer_move(GestureSample {
            x: 0.0,
            y: 0.0,
            dx: 100.0,
            dy: 100.0,
        });
        let Ok(rect) = editor.measure_table(table.id, Size::new(40.0, 40.0)) else {
            panic!("measure failed");
        };
        assert_eq!(rect.origin(), Point::new(152.0, 152.0));

        assert!(editor.cancel_drag());
        let Some(hitbox) = editor.hitbox(table.id) else {
            panic!("hitbox missing");
        };
        assert_eq!(hitbox.origin(), Point::new(50.0, 50.0));
        assert_eq!(hitbox.size(), Size::new(40.0, 40.0));
        assert!(!editor.is_dragging());
    }
}
