//! Bounded linear undo/redo history.
//!
//! [`HistoryStack`] is an ordered list of snapshots plus a cursor. Pushing
//! after an undo drops the redo branch; pushing past the limit evicts the
//! oldest entry.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{Guest, Table};

/// Default number of snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Immutable copy of the full chart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every table, in display order.
    pub tables: Vec<Table>,
    /// Every guest, in list order.
    pub guests: Vec<Guest>,
}

impl Snapshot {
    /// Captures copies of both arrays.
    #[must_use]
    pub fn capture(tables: &[Table], guests: &[Guest]) -> Self {
        Self {
            tables: tables.to_vec(),
            guests: guests.to_vec(),
        }
    }
}

/// Bounded undo/redo log with a cursor.
///
/// The cursor always lies in `[0, len - 1]` while the stack is non-empty.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: VecDeque<T>,
    index: usize,
    limit: usize,
}

impl<T: Clone> HistoryStack<T> {
    /// Creates an empty stack retaining at most `limit` entries (minimum 1).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Drops everything and seeds the stack with a single baseline entry.
    pub fn reset(&mut self, baseline: T) {
        self.entries.clear();
        self.entries.push_back(baseline);
        self.index = 0;
    }

    /// Appends an entry after the cursor, discarding any redo branch.
    pub fn push(&mut self, entry: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index.saturating_add(1));
        }
        self.entries.push_back(entry);
        self.index = self.entries.len().saturating_sub(1);

        if self.entries.len() > self.limit {
            self.entries.pop_front();
            self.index = self.index.saturating_sub(1);
        }
    }

    /// Steps back one entry and returns it. No-op at the oldest entry.
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).cloned()
    }

    /// Steps forward one entry and returns it. No-op at the newest entry.
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).cloned()
    }

    /// Returns `true` if [`Self::undo`] would move the cursor.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Returns `true` if [`Self::redo`] would move the cursor.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index.saturating_add(1) < self.entries.len()
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.index)
    }

    /// Cursor position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

impl<T: Clone> Default for HistoryStack<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
