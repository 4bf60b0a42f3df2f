//! Write-through record store
//!
//! Records are kept as one JSON array under [`keys::ARTIFACT_RECORDS`]. Every
//! mutation re-reads the array, applies the change and writes it back before
//! returning; there is no in-memory copy to go stale.

use crate::clock::{Clock, SystemClock};
use crate::error::RecordError;
use crate::record::{ArtifactId, ArtifactRecord, ArtifactStatus};
use crate::seed::demo_records;
use mvp_storage::{keys, KvStore};
use std::sync::Arc;

/// Per-status record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordStats {
    pub total: usize,
    pub generated: usize,
    pub in_progress: usize,
    pub saved: usize,
    /// Records with a status this version does not know
    pub other: usize,
}

/// Insertion-ordered store of artifact records
#[derive(Debug, Clone)]
pub struct RecordStore {
    kv: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl RecordStore {
    /// Create store over `kv` using the wall clock
    #[inline]
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self::with_clock(kv, Arc::new(SystemClock))
    }

    /// Create store with an explicit time source
    #[inline]
    #[must_use]
    pub fn with_clock(kv: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    /// All records in insertion order
    ///
    /// Unreadable or malformed persisted data reads as an empty list.
    #[must_use]
    pub fn list(&self) -> Vec<ArtifactRecord> {
        let raw = match self.kv.get(keys::ARTIFACT_RECORDS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read artifact records, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Corrupt artifact records, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Look up one record
    #[must_use]
    pub fn get(&self, id: &ArtifactId) -> Option<ArtifactRecord> {
        self.list().into_iter().find(|r| &r.id == id)
    }

    /// Check if the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// Append a new `Generated` record
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn create(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ArtifactRecord, RecordError> {
        let mut records = self.list();

        let mut record = ArtifactRecord::generated(title, description, self.clock.now());
        while records.iter().any(|r| r.id == record.id) {
            record.id = ArtifactId::new();
        }

        records.push(record.clone());
        self.write(&records)?;

        tracing::info!("Created artifact record {} ({})", record.id, record.title);
        Ok(record)
    }

    /// Remove the record with `id`
    ///
    /// Returns whether a record was removed. Unknown ids are a no-op.
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn delete(&self, id: &ArtifactId) -> Result<bool, RecordError> {
        let mut records = self.list();
        let before = records.len();
        records.retain(|r| &r.id != id);

        if records.len() == before {
            tracing::debug!("Delete of unknown artifact {} ignored", id);
            return Ok(false);
        }

        self.write(&records)?;
        tracing::info!("Deleted artifact record {}", id);
        Ok(true)
    }

    /// Change the status of the record with `id`
    ///
    /// Returns whether a record was updated.
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn update_status(
        &self,
        id: &ArtifactId,
        status: ArtifactStatus,
    ) -> Result<bool, RecordError> {
        let mut records = self.list();
        let Some(record) = records.iter_mut().find(|r| &r.id == id) else {
            return Ok(false);
        };

        if record.status == status {
            return Ok(true);
        }
        record.status = status;
        let label = record.status.to_string();

        self.write(&records)?;
        tracing::info!("Artifact {} status -> {}", id, label);
        Ok(true)
    }

    /// Populate an empty store with the demo set
    ///
    /// Returns whether seeding happened. A populated store is left untouched.
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn seed_if_empty(&self) -> Result<bool, RecordError> {
        self.seed_if_empty_with(demo_records(self.clock.now()))
    }

    /// Populate an empty store with `defaults`
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn seed_if_empty_with(&self, defaults: Vec<ArtifactRecord>) -> Result<bool, RecordError> {
        if !self.is_empty() {
            return Ok(false);
        }

        self.write(&defaults)?;
        tracing::info!("Seeded {} demo artifact records", defaults.len());
        Ok(true)
    }

    /// Per-status counts
    #[must_use]
    pub fn stats(&self) -> RecordStats {
        self.list()
            .iter()
            .fold(RecordStats::default(), |mut stats, record| {
                stats.total += 1;
                match record.status {
                    ArtifactStatus::Generated => stats.generated += 1,
                    ArtifactStatus::InProgress => stats.in_progress += 1,
                    ArtifactStatus::Saved => stats.saved += 1,
                    ArtifactStatus::Unknown(_) => stats.other += 1,
                }
                stats
            })
    }

    fn write(&self, records: &[ArtifactRecord]) -> Result<(), RecordError> {
        let body = serde_json::to_string(records)?;
        self.kv.set(keys::ARTIFACT_RECORDS, &body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone, Utc};
    use mvp_storage::MemoryStore;

    fn fixed_store() -> (RecordStore, Arc<MemoryStore>) {
        let kv = Arc::new(MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        (RecordStore::with_clock(kv.clone(), Arc::new(FixedClock(at))), kv)
    }

    #[test]
    fn create_stamps_clock_time_and_generated_status() {
        let (store, _) = fixed_store();
        let record = store.create("Book Club", "For book lovers").unwrap();

        assert_eq!(record.status, ArtifactStatus::Generated);
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
        );
        assert_eq!(store.get(&record.id), Some(record));
    }

    #[test]
    fn list_keeps_insertion_order() {
        let (store, _) = fixed_store();
        let titles = ["c", "a", "b"];
        for t in titles {
            store.create(t, "").unwrap();
        }
        let listed: Vec<_> = store.list().into_iter().map(|r| r.title).collect();
        assert_eq!(listed, titles);
    }

    #[test]
    fn corrupt_records_read_as_empty() {
        let (store, kv) = fixed_store();
        kv.set(keys::ARTIFACT_RECORDS, "[{\"id\":").unwrap();
        assert!(store.list().is_empty());

        // Store recovers on the next mutation
        store.create("fresh", "start").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_status_changes_only_status() {
        let (store, _) = fixed_store();
        let record = store.create("t", "d").unwrap();

        assert!(store.update_status(&record.id, ArtifactStatus::Saved).unwrap());
        let updated = store.get(&record.id).unwrap();
        assert_eq!(updated.status, ArtifactStatus::Saved);
        assert_eq!(updated.created_at, record.created_at);
        assert_eq!(updated.title, record.title);

        assert!(!store
            .update_status(&ArtifactId::from("missing"), ArtifactStatus::Saved)
            .unwrap());
    }

    #[test]
    fn demo_records_are_aged() {
        let (store, _) = fixed_store();
        store.seed_if_empty().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let records = store.list();

        assert_eq!(records[0].created_at, now - Duration::days(2));
        assert_eq!(records[1].created_at, now - Duration::days(7));
    }

    #[test]
    fn stats_count_each_status() {
        let (store, kv) = fixed_store();
        store.seed_if_empty().unwrap();
        let extra = store.create("x", "y").unwrap();
        store.update_status(&extra.id, ArtifactStatus::Saved).unwrap();

        let mut records = store.list();
        records.push(
            ArtifactRecord::generated("odd", "", Utc::now())
                .with_status(ArtifactStatus::Unknown("Archived".to_string())),
        );
        kv.set(keys::ARTIFACT_RECORDS, &serde_json::to_string(&records).unwrap())
            .unwrap();

        assert_eq!(
            store.stats(),
            RecordStats {
                total: 4,
                generated: 1,
                in_progress: 1,
                saved: 1,
                other: 1,
            }
        );
    }
}
