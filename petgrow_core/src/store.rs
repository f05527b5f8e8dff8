//! Snapshot persistence.
//!
//! The game keeps a single named entry: the latest [`GameState`] as JSON.
//! Writes are last-write-wins; the stored snapshot may trail the live one by
//! up to one save interval.

use crate::{Error, GameState, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the save entry inside the data directory
pub const SAVE_FILE_NAME: &str = "petgrow_save.json";

/// Where snapshots are kept between sessions
pub trait SnapshotStore {
    /// Load the saved snapshot
    ///
    /// Corrupt or unreadable entries are reported as `Ok(None)`, never as an
    /// error.
    fn load(&self) -> Result<Option<GameState>>;

    fn save(&mut self, state: &GameState) -> Result<()>;
}

/// JSON file store with file locking
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for the save entry inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SAVE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Option<String> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open save file {:?}: {}. Discarding.", self.path, e);
                return None;
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock save file {:?}: {}. Discarding.", self.path, e);
            return None;
        }

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        let _ = file.unlock();

        match read {
            Ok(_) => Some(contents),
            Err(e) => {
                tracing::warn!("Failed to read save file {:?}: {}. Discarding.", self.path, e);
                None
            }
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<GameState>> {
        if !self.path.exists() {
            tracing::info!("No save file at {:?}", self.path);
            return Ok(None);
        }

        let Some(contents) = self.read_contents() else {
            return Ok(None);
        };

        match serde_json::from_str::<GameState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded snapshot from {:?}", self.path);
                Ok(Some(state))
            }
            Err(e) => {
                tracing::warn!(
                    "Save file {:?} is corrupted: {}. Starting over.",
                    self.path,
                    e
                );
                Ok(None)
            }
        }
    }

    /// Atomically replace the save entry:
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    fn save(&mut self, state: &GameState) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::State(format!("save path {:?} has no parent", self.path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;

        // Exclusive lock serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(state)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved snapshot to {:?}", self.path);
        Ok(())
    }
}

/// In-process store, for tests and embedding hosts
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Raw JSON of the entry, as a key-value store would hold it
    pub entry: Option<String>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn with_entry(raw: impl Into<String>) -> Self {
        Self {
            entry: Some(raw.into()),
            saves: 0,
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<GameState>> {
        let Some(raw) = &self.entry else {
            return Ok(None);
        };
        match serde_json::from_str(raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                tracing::warn!("Stored snapshot is corrupted: {}. Starting over.", e);
                Ok(None)
            }
        }
    }

    fn save(&mut self, state: &GameState) -> Result<()> {
        self.entry = Some(serde_json::to_string(state)?);
        self.saves += 1;
        Ok(())
    }
}
