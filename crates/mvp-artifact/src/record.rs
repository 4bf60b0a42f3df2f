//! Artifact record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Opaque artifact identifier
///
/// Fresh ids are ULIDs; ids loaded from storage are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Generate new unique ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ArtifactId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ArtifactId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Lifecycle status of a record
///
/// Stored as its display label. Labels this version does not know survive a
/// load/save cycle as [`ArtifactStatus::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArtifactStatus {
    /// Saved by the user but not built
    Saved,
    /// Build started but not finished
    InProgress,
    /// Build finished
    Generated,
    /// Any other stored label
    Unknown(String),
}

impl ArtifactStatus {
    /// Display label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Saved => "Saved",
            Self::InProgress => "In Progress",
            Self::Generated => "Generated",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether this is one of the known statuses
    #[inline]
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for ArtifactStatus {
    fn default() -> Self {
        Self::Generated
    }
}

impl From<String> for ArtifactStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Saved" => Self::Saved,
            "In Progress" => Self::InProgress,
            "Generated" => Self::Generated,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<ArtifactStatus> for String {
    fn from(status: ArtifactStatus) -> Self {
        match status {
            ArtifactStatus::Unknown(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated product
///
/// `id` and `created_at` never change once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub id: ArtifactId,
    pub title: String,
    pub description: String,
    pub status: ArtifactStatus,
    pub created_at: DateTime<Utc>,
}

impl ArtifactRecord {
    /// Create a freshly generated record
    #[must_use]
    pub fn generated(
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ArtifactId::new(),
            title: title.into(),
            description: description.into(),
            status: ArtifactStatus::Generated,
            created_at,
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ArtifactId>) -> Self {
        self.id = id.into();
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ArtifactStatus) -> Self {
        self.status = status;
        self
    }
}
