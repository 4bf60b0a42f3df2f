//! Error types for the storage layer

use std::path::PathBuf;

/// Errors raised while reading or writing durable state
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error on the backing file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State could not be serialized for writing
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Atomic replacement of the backing file failed
    #[error("failed to persist {path}: {message}")]
    Persist { path: PathBuf, message: String },
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
