//! Snapshot-based undo/redo with bounded depth.

use crate::document::Document;
use log::debug;

/// Maximum number of undo snapshots to keep.
pub const MAX_HISTORY_SIZE: usize = 20;

/// Bounded undo/redo stacks of document snapshots.
///
/// A snapshot is recorded immediately before a mutating operation; a whole
/// gesture records exactly one. Undo and redo move one snapshot to the
/// opposite stack; any new recording clears the redo stack.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Document>,
    future: Vec<Document>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the current document onto the past stack (call before making
    /// changes). Evicts the oldest entry past the depth cap.
    pub fn record(&mut self, document: &Document) {
        self.past.push(document.clone());
        self.future.clear();
        if self.past.len() > MAX_HISTORY_SIZE {
            self.past.remove(0);
            debug!("history: evicted oldest snapshot (depth cap {MAX_HISTORY_SIZE})");
        }
    }

    /// Restore the previous snapshot, moving the current state onto the
    /// redo stack. Returns false if there is nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        match self.past.pop() {
            Some(snapshot) => {
                self.future.push(std::mem::replace(document, snapshot));
                true
            }
            None => false,
        }
    }

    /// Re-apply the next undone snapshot. Returns false if there is
    /// nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        match self.future.pop() {
            Some(snapshot) => {
                self.past.push(std::mem::replace(document, snapshot));
                true
            }
            None => false,
        }
    }

    /// Discard the most recent snapshot and restore it, without touching
    /// the redo stack. Used to abandon a gesture mid-flight.
    pub fn revert(&mut self, document: &mut Document) -> bool {
        match self.past.pop() {
            Some(snapshot) => {
                *document = snapshot;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.past.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
