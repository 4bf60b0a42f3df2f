//! Error types for record operations

use mvp_storage::StorageError;

/// Errors from the record store
///
/// Reading never fails: unreadable persisted records degrade to an empty list.
/// Only making a mutation durable can fail.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Backend write failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Records could not be encoded
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}
