//! Filesystem storage backend: one JSON file per board.

use super::{Storage, StorageError};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each board as `<dir>/<board_id>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at the platform data directory.
    pub fn default_location() -> Result<Self, StorageError> {
        let base = dirs::data_dir().ok_or(StorageError::NoStorageDir)?;
        Ok(Self::new(base.join("tackboard").join("boards")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Board ids become file names, so restrict them to a safe alphabet.
    fn path_for(&self, board_id: &str) -> Result<PathBuf, StorageError> {
        let valid = !board_id.is_empty()
            && board_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidBoardId(board_id.to_string()));
        }
        Ok(self.dir.join(format!("{board_id}.json")))
    }
}

impl Storage for FileStorage {
    fn load(&self, board_id: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(board_id)?;
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, board_id: &str, json: &str) -> Result<(), StorageError> {
        let path = self.path_for(board_id)?;
        fs::create_dir_all(&self.dir)?;
        // Write to a sibling temp file first so a crash never truncates
        // the previous save
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!("saved board {board_id} ({} bytes)", json.len());
        Ok(())
    }

    fn delete(&self, board_id: &str) -> Result<(), StorageError> {
        let path = self.path_for(board_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        Ok(ids)
    }
}
