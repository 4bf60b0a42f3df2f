//! Key-value store trait and in-memory backend

use crate::error::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;

/// Durable key→value persistence
///
/// # Contract
/// - `set` and `remove` are durable before they return (write-through)
/// - `get` always observes the latest completed write
/// - Removing an absent key is not an error
pub trait KvStore: Send + Sync + Debug {
    /// Read the value stored under `key`
    ///
    /// # Errors
    /// Returns error only if the backend cannot be reached at all.
    /// Unreadable contents are reported as absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store
///
/// Durable only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if store holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.lock().remove(key);
        Ok(())
    }
}
