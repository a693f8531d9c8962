//! Debounced autosave: coalesces bursts of board mutations into one write.

use super::{Storage, StorageError};
use crate::board::{Board, BoardState};
use log::warn;
use std::time::{Duration, Instant};

/// Default quiet period before a dirty board is written out.
pub const DEFAULT_DEBOUNCE_MS: u64 = 750;

/// Watches a board's revision counter and writes the serialized state to a
/// [`Storage`] backend once mutations go quiet for the debounce window.
///
/// A failed write leaves the dirty state in place so the next tick retries;
/// it never touches the in-memory board.
#[derive(Debug)]
pub struct AutosaveManager<S: Storage> {
    storage: S,
    board_id: String,
    debounce: Duration,
    last_seen_revision: u64,
    saved_revision: u64,
    quiet_since: Option<Instant>,
}

impl<S: Storage> AutosaveManager<S> {
    pub fn new(storage: S, board_id: impl Into<String>) -> Self {
        Self {
            storage,
            board_id: board_id.into(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            last_seen_revision: 0,
            saved_revision: 0,
            quiet_since: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Unsaved mutations exist.
    pub fn is_dirty(&self, board: &Board) -> bool {
        board.revision() != self.saved_revision
    }

    /// Poll once per frame or timer tick. Restarts the debounce window on
    /// any new mutation; saves once the board has been quiet long enough.
    /// Returns true if a write happened.
    pub fn tick(&mut self, board: &Board, now: Instant) -> bool {
        let revision = board.revision();
        if revision != self.last_seen_revision {
            self.last_seen_revision = revision;
            self.quiet_since = Some(now);
            return false;
        }
        if revision == self.saved_revision {
            return false;
        }
        match self.quiet_since {
            Some(since) if now.duration_since(since) >= self.debounce => self.write(board),
            Some(_) => false,
            // Dirty with no observed mutation time: save immediately
            None => self.write(board),
        }
    }

    /// Write immediately if dirty, ignoring the debounce window.
    pub fn flush(&mut self, board: &Board) -> bool {
        if self.is_dirty(board) {
            self.write(board)
        } else {
            false
        }
    }

    /// Load the saved state for this board. Missing or malformed saves
    /// both come back as `None`.
    pub fn restore(&self) -> Result<Option<BoardState>, StorageError> {
        let Some(json) = self.storage.load(&self.board_id)? else {
            return Ok(None);
        };
        Ok(BoardState::from_json(&json))
    }

    fn write(&mut self, board: &Board) -> bool {
        let json = match board.serialize() {
            Ok(json) => json,
            Err(err) => {
                warn!("autosave: serialization failed: {err}");
                return false;
            }
        };
        match self.storage.save(&self.board_id, &json) {
            Ok(()) => {
                self.saved_revision = board.revision();
                self.quiet_since = None;
                true
            }
            Err(err) => {
                warn!("autosave: write failed, will retry: {err}");
                false
            }
        }
    }
}
