//! Demo records shown to first-time users

use crate::record::{ArtifactRecord, ArtifactStatus};
use chrono::{DateTime, Duration, Utc};

/// The fixed demo set, aged relative to `now`
///
/// Order matters: the dashboard lists records in insertion order.
#[must_use]
pub fn demo_records(now: DateTime<Utc>) -> Vec<ArtifactRecord> {
    vec![
        ArtifactRecord::generated(
            "Freelancer Services Platform",
            "A platform where freelancers can offer their services to clients",
            now - Duration::days(2),
        )
        .with_id("1"),
        ArtifactRecord::generated(
            "Pet-Sharing Community",
            "A social platform for pet owners to share experiences and find services",
            now - Duration::days(7),
        )
        .with_id("2")
        .with_status(ArtifactStatus::InProgress),
    ]
}
