//! Persistence boundary
//!
//! The store is written as one serialized blob under a well-known key.
//! `KeyValueBackend` abstracts where that blob lives:
//! - `FileBackend`: one JSON file per key inside a data directory
//! - `MemoryBackend`: an in-process map, for tests and benchmarks

use crate::storage::error::{StorageError, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// String key-value storage holding serialized blobs
pub trait KeyValueBackend {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Stores each key as `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Get path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| StorageError::InvalidEncoding(format!("{:?}: {}", path, e)))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, value)?;
        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

/// In-memory backend
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: preload a value
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Peek at a raw value without going through the trait
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
