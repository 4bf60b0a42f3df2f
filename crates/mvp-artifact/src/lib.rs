//! MVPify Artifact Records
//!
//! Records of generated MVPs and the store that owns them.
//!
//! # Core Concepts
//!
//! - [`ArtifactRecord`]: one generated product, as listed on the dashboard
//! - [`ArtifactStatus`]: closed lifecycle status with an explicit unknown case
//! - [`RecordStore`]: insertion-ordered, write-through CRUD over a [`KvStore`]
//! - [`demo_records`]: the two records a first-time user sees
//!
//! # Example
//!
//! ```rust,ignore
//! use mvp_artifact::RecordStore;
//! use mvp_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = RecordStore::new(Arc::new(MemoryStore::new()));
//! store.seed_if_empty()?;
//! let record = store.create("Book Club", "A social platform for book lovers")?;
//! assert!(store.list().iter().any(|r| r.id == record.id));
//! ```
//!
//! [`KvStore`]: mvp_storage::KvStore

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod clock;
mod error;
mod record;
mod seed;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::RecordError;
pub use record::{ArtifactId, ArtifactRecord, ArtifactStatus};
pub use seed::demo_records;
pub use store::{RecordStats, RecordStore};
