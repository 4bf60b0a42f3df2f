//! MVPify Storage
//!
//! Durable key→value persistence standing in for a future backend service.
//!
//! # Core Concepts
//!
//! - [`KvStore`]: the persistence seam every other crate is written against
//! - [`MemoryStore`]: process-local backend for tests and ephemeral sessions
//! - [`FileStore`]: JSON-file backend with write-through semantics
//! - [`keys`]: the persisted key names
//!
//! # Example
//!
//! ```rust,ignore
//! use mvp_storage::{FileStore, KvStore, keys};
//!
//! let store = FileStore::open("./data/state.json")?;
//! store.set(keys::IDEA_TEXT, "A pet-sharing app")?;
//! assert_eq!(store.get(keys::IDEA_TEXT)?.as_deref(), Some("A pet-sharing app"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod file;
pub mod keys;
mod kv;

pub use error::StorageError;
pub use file::FileStore;
pub use kv::{KvStore, MemoryStore};
