//! Board persistence: a pluggable key/value blob store plus the debounced
//! autosave layer on top of it.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutosaveManager, DEFAULT_DEBOUNCE_MS};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid board id: {0:?}")]
    InvalidBoardId(String),

    #[error("no usable storage directory on this platform")]
    NoStorageDir,
}

/// A blob store for serialized boards, keyed by board id.
///
/// The board core is single-threaded; backends take `&self` so they can be
/// shared with a UI layer, and keep their own interior mutability.
pub trait Storage {
    /// Load a board's serialized state. `Ok(None)` means never saved.
    fn load(&self, board_id: &str) -> Result<Option<String>, StorageError>;

    /// Persist a board's serialized state, replacing any previous value.
    fn save(&self, board_id: &str, json: &str) -> Result<(), StorageError>;

    /// Remove a saved board. Removing an unknown id is a no-op.
    fn delete(&self, board_id: &str) -> Result<(), StorageError>;

    /// Ids of all saved boards, in no particular order.
    fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Whether a board has ever been saved.
    fn exists(&self, board_id: &str) -> Result<bool, StorageError> {
        Ok(self.load(board_id)?.is_some())
    }
}
