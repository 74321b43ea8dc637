//! Log persistence with file locking.
//!
//! The whole [`LogStore`] lives under a single fixed entry. Loading never
//! fails on bad data: a missing, unreadable or corrupted entry yields an
//! empty store. Saving is write-through and atomic.

use crate::{Error, LogStore, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fixed entry name the log is stored under
pub const STORAGE_KEY: &str = "ckd_tracker_logs";

/// Storage collaborator for the completion log
pub trait LogStorage {
    /// Hydrate the full store, substituting an empty one for bad data
    fn load(&self) -> Result<LogStore>;

    /// Replace the stored entry with the current store
    fn save(&mut self, store: &LogStore) -> Result<()>;
}

/// Parse stored JSON text, falling back to an empty store
fn parse_or_default(contents: &str, origin: &dyn std::fmt::Debug) -> LogStore {
    if contents.trim().is_empty() {
        tracing::warn!("Log entry {:?} is empty. Starting with an empty log.", origin);
        return LogStore::default();
    }

    match serde_json::from_str::<LogStore>(contents) {
        Ok(store) => {
            tracing::debug!("Loaded {} logged days from {:?}", store.len(), origin);
            store
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse log entry {:?}: {}. Starting with an empty log.",
                origin,
                e
            );
            LogStore::default()
        }
    }
}

// ============================================================================
// JSON file storage
// ============================================================================

/// JSON file storage with shared/exclusive locking
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage for the fixed entry inside a data directory
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStorage for JsonFileStorage {
    fn load(&self) -> Result<LogStore> {
        let path = &self.path;
        if !path.exists() {
            tracing::info!("No log file found at {:?}, starting fresh", path);
            return Ok(LogStore::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open log file {:?}: {}. Starting with an empty log.",
                    path,
                    e
                );
                return Ok(LogStore::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock log file {:?}: {}. Starting with an empty log.",
                path,
                e
            );
            return Ok(LogStore::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read log file {:?}: {}. Starting with an empty log.",
                path,
                e
            );
            return Ok(LogStore::default());
        }

        file.unlock()?;

        Ok(parse_or_default(&contents, path))
    }

    /// Atomically writes the log by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&mut self, store: &LogStore) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "log path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        // Temp file in the same directory so the rename stays on one filesystem
        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(store)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} logged days to {:?}", store.len(), self.path);
        Ok(())
    }
}

// ============================================================================
// In-memory storage
// ============================================================================

/// Storage that keeps the serialized entry in memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entry: Option<String>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored text, as if written by an earlier session
    pub fn with_entry(entry: impl Into<String>) -> Self {
        Self {
            entry: Some(entry.into()),
            saves: 0,
        }
    }

    /// The stored JSON text, if anything has been written
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Number of completed writes
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl LogStorage for MemoryStorage {
    fn load(&self) -> Result<LogStore> {
        Ok(match &self.entry {
            Some(contents) => parse_or_default(contents, &STORAGE_KEY),
            None => LogStore::default(),
        })
    }

    fn save(&mut self, store: &LogStore) -> Result<()> {
        self.entry = Some(serde_json::to_string(store)?);
        self.saves += 1;
        Ok(())
    }
}
