//! Bounded, linear undo/redo history.
//!
//! The log holds immutable snapshots of the scene (elements plus selection)
//! and a cursor pointing at the snapshot that matches the live scene.
//!
//! ```text
//!   push A, push B, undo          push C
//!   [empty, A, B]                 [empty, A, C]
//!              ^ cursor                     ^ cursor   (B is gone)
//! ```
//!
//! Boundary conditions are no-ops, never errors: `undo` at the oldest
//! snapshot and `redo` at the newest return `None`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_HISTORY;
use crate::element::{Element, ElementId, RasterHandle};

/// An immutable capture of the scene at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Elements in paint order, back to front.
    pub elements: Vec<Element>,
    /// Selected element, if any.
    pub selected: Option<ElementId>,
}

impl HistorySnapshot {
    /// Capture a snapshot.
    #[must_use]
    pub fn new(elements: Vec<Element>, selected: Option<ElementId>) -> Self {
        Self { elements, selected }
    }
}

/// Snapshot log with a movable cursor and a hard size bound.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    snapshots: VecDeque<HistorySnapshot>,
    cursor: usize,
    capacity: usize,
}

impl HistoryLog {
    /// Create a log holding one empty-scene snapshot, bounded by [`MAX_HISTORY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    /// Create a log with a custom bound (at least one snapshot).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(HistorySnapshot::default());
        Self {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    /// Record a new snapshot after the cursor.
    ///
    /// Snapshots after the cursor (the redo branch) are discarded. When the
    /// log exceeds its bound the oldest snapshot is evicted, so the cursor
    /// always ends on the snapshot just pushed.
    pub fn push(&mut self, elements: Vec<Element>, selected: Option<ElementId>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(HistorySnapshot::new(elements, selected));
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            tracing::trace!("History full, evicted oldest snapshot");
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Bind decoded pixels to every retained copy of an image element.
    ///
    /// Rasters are transient, so this rewrites snapshots in place without
    /// moving the cursor. Returns the number of copies updated.
    pub fn attach_raster(&mut self, id: &ElementId, raster: &RasterHandle) -> usize {
        self.snapshots
            .iter_mut()
            .flat_map(|snapshot| snapshot.elements.iter_mut())
            .filter(|element| &element.id == id)
            .map(|element| element.attach_raster(raster.clone()))
            .filter(|attached| *attached)
            .count()
    }

    /// Step back one snapshot.
    ///
    /// Returns the snapshot now at the cursor, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step forward one snapshot.
    ///
    /// Returns the snapshot now at the cursor, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    /// Whether [`HistoryLog::undo`] would move the cursor.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`HistoryLog::redo`] would move the cursor.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> &HistorySnapshot {
        // The log is never empty and the cursor is always in range.
        &self.snapshots[self.cursor]
    }

    /// Index of the current snapshot.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; the log holds at least the initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Maximum number of retained snapshots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}
