//! Drag gesture state machine for table moves and guest drops.
//!
//! [`DragController`] owns the transient state of the single active gesture.
//! Pointer moves only touch this scratch state; the authoritative table and
//! guest arrays change once, when the gesture is released.

use serde::Serialize;

use super::geometry::{GridSpec, Point, Size};
use super::hit_test::HitTestIndex;
use super::{Guest, GuestId, SeatingError, Table, TableId};

/// One pointer sample delivered at frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Deserialize, utoipa::ToSchema)]
pub struct GestureSample {
    /// Pointer location relative to the canvas.
    pub x: f64,
    /// Pointer location relative to the canvas.
    pub y: f64,
    /// Horizontal translation since the gesture started.
    pub dx: f64,
    /// Vertical translation since the gesture started.
    pub dy: f64,
}

impl GestureSample {
    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.dx.is_finite() && self.dy.is_finite()
    }

    /// Pointer location as a point.
    #[must_use]
    pub const fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Layout inputs needed to place a dragged table.
#[derive(Debug, Clone, Copy)]
pub struct DragBounds<'a> {
    /// Grid used to quantize positions.
    pub grid: GridSpec,
    /// Current canvas size.
    pub canvas: Size,
    /// Footprint reserved for a table when clamping.
    pub footprint: Size,
    /// Measured table rectangles.
    pub hitboxes: &'a HitTestIndex,
}

/// Active gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A table is following the pointer.
    DraggingTable {
        /// Table being moved.
        table_id: TableId,
        /// Committed position when the gesture started.
        start: Point,
        /// Latest snapped candidate, not yet committed.
        candidate: Option<Point>,
    },
    /// An unassigned guest is being carried toward a table.
    DraggingGuest {
        /// Guest being carried.
        guest_id: GuestId,
        /// Latest pointer location on the canvas.
        pointer: Option<Point>,
        /// Table currently under the pointer.
        drop_target: Option<TableId>,
    },
}

/// Observable effect of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragUpdate {
    /// Nothing visible changed.
    Unchanged,
    /// The dragged table has a new transient position.
    TableMoved {
        /// Table being moved.
        table_id: TableId,
        /// Snapped, clamped candidate position.
        position: Point,
    },
    /// The highlighted drop target changed.
    DropTargetChanged {
        /// Guest being carried.
        guest_id: GuestId,
        /// New target, or `None` when the pointer left every table.
        table_id: Option<TableId>,
    },
}

/// What a released gesture asks the editor to commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragOutcome {
    /// No gesture was active, or the table never moved.
    Nothing,
    /// Commit the table at its final position.
    CommitTable {
        /// Table that was moved.
        table_id: TableId,
        /// Final snapped position.
        position: Point,
    },
    /// Assign the guest to the table under the pointer.
    DropGuest {
        /// Guest being carried.
        guest_id: GuestId,
        /// Table under the pointer at release.
        table_id: TableId,
    },
    /// The guest was released away from every table.
    Abandoned {
        /// Guest that was carried.
        guest_id: GuestId,
    },
}

/// Single-pointer drag state machine.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns `true` while a gesture is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Transient position of `table_id` while it is being dragged.
    #[must_use]
    pub fn transient_position(&self, table_id: TableId) -> Option<Point> {
        match &self.state {
            DragState::DraggingTable {
                table_id: dragged,
                candidate,
                ..
            } if *dragged == table_id => *candidate,
            _ => None,
        }
    }

    /// Table currently highlighted as a drop target.
    #[must_use]
    pub fn drop_target(&self) -> Option<TableId> {
        match &self.state {
            DragState::DraggingGuest { drop_target, .. } => *drop_target,
            _ => None,
        }
    }

    /// Starts dragging a table from its committed position.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::DragInProgress`] if a gesture is active, or
    /// [`SeatingError::TableLocked`] for locked tables.
    pub fn press_table(&mut self, table: &Table) -> Result<(), SeatingError> {
        if self.is_active() {
            return Err(SeatingError::DragInProgress);
        }
        if table.locked {
            return Err(SeatingError::TableLocked(table.id));
        }
        self.state = DragState::DraggingTable {
            table_id: table.id,
            start: table.position,
            candidate: None,
        };
        Ok(())
    }

    /// Picks up an unassigned guest.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::DragInProgress`] if a gesture is active, or
    /// [`SeatingError::GuestAlreadySeated`] if the guest has a table.
    pub fn long_press_guest(&mut self, guest: &Guest) -> Result<(), SeatingError> {
        if self.is_active() {
            return Err(SeatingError::DragInProgress);
        }
        if !guest.is_unassigned() {
            return Err(SeatingError::GuestAlreadySeated(guest.id));
        }
        self.state = DragState::DraggingGuest {
            guest_id: guest.id,
            pointer: None,
            drop_target: None,
        };
        Ok(())
    }

    /// Feeds one pointer sample into the active gesture.
    ///
    /// Table drags recompute the snapped candidate from the start position
    /// plus the cumulative delta. Guest drags hit-test the pointer location
    /// and only report a change when the target differs from the previous
    /// one. Non-finite samples are dropped.
    pub fn pointer_move(&mut self, sample: GestureSample, bounds: &DragBounds<'_>) -> DragUpdate {
        if !sample.is_finite() {
            return DragUpdate::Unchanged;
        }
        match &mut self.state {
            DragState::Idle => DragUpdate::Unchanged,
            DragState::DraggingTable {
                table_id,
                start,
                candidate,
            } => {
                let raw = start.offset(sample.dx, sample.dy);
                let position = bounds.grid.place(raw, bounds.canvas, bounds.footprint);
                if *candidate == Some(position) {
                    return DragUpdate::Unchanged;
                }
                *candidate = Some(position);
                DragUpdate::TableMoved {
                    table_id: *table_id,
                    position,
                }
            }
            DragState::DraggingGuest {
                guest_id,
                pointer,
                drop_target,
            } => {
                let location = sample.location();
                *pointer = Some(location);
                let target = bounds.hitboxes.hit(location);
                if *drop_target == target {
                    return DragUpdate::Unchanged;
                }
                *drop_target = target;
                DragUpdate::DropTargetChanged {
                    guest_id: *guest_id,
                    table_id: target,
                }
            }
        }
    }

    /// Ends the gesture and reports what should be committed.
    pub fn release(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Nothing,
            DragState::DraggingTable {
                table_id,
                candidate,
                ..
            } => candidate.map_or(DragOutcome::Nothing, |position| DragOutcome::CommitTable {
                table_id,
                position,
            }),
            DragState::DraggingGuest {
                guest_id,
                drop_target,
                ..
            } => drop_target.map_or(DragOutcome::Abandoned { guest_id }, |table_id| {
                DragOutcome::DropGuest { guest_id, table_id }
            }),
        }
    }

    /// Discards the gesture without committing anything.
    ///
    /// Returns `true` if a gesture was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = DragState::Idle;
        was_active
    }

    /// Drops the gesture if it refers to a table that no longer exists.
    pub fn forget_table(&mut self, table_id: TableId) {
        let stale = match &self.state {
            DragState::DraggingTable { table_id: id, .. } => *id == table_id,
            DragState::DraggingGuest { drop_target, .. } => *drop_target == Some(table_id),
            DragState::Idle => false,
        };
        if stale {
            self.state = DragState::Idle;
        }
    }
}
