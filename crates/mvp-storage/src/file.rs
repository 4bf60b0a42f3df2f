//! JSON-file backed store
//!
//! The whole key space lives in one JSON object. Every mutation rewrites the
//! file through a temp file and atomic rename before returning; every read goes
//! back to disk.

use crate::error::StorageError;
use crate::kv::KvStore;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write-through store backed by a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    ///
    /// The parent directory is created if missing. The file itself is only
    /// written on the first mutation.
    ///
    /// # Errors
    /// Returns error if the parent directory cannot be created
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io_error(parent, e))?;
        }
        tracing::debug!("Opened file store at {}", path.display());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::io_error(&self.path, e)),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        // Undecodable bytes and malformed JSON both degrade to empty
        match serde_json::from_slice(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    "Corrupt state file {}, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(map)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StorageError::io_error(&dir, e))?;
        tmp.write_all(&body)
            .map_err(|e| StorageError::io_error(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StorageError::io_error(tmp.path(), e))?;
        tmp.persist(&self.path).map_err(|e| StorageError::Persist {
            path: self.path.clone(),
            message: e.error.to_string(),
        })?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}
