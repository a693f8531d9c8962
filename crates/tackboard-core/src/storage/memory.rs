//! In-memory storage backend, for tests and ephemeral sessions.

use super::{Storage, StorageError};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Keeps every board in a map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, board_id: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(board_id).cloned())
    }

    fn save(&self, board_id: &str, json: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(board_id.to_string(), json.to_string());
        Ok(())
    }

    fn delete(&self, board_id: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(board_id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.keys().cloned().collect())
    }
}
