//! Session context
//!
//! Small durable scalar state shared across the wizard stages: the current
//! idea, the authentication token and identity, the AI-assist toggle and the
//! id of the last generated artifact. Values live in the [`KvStore`] so they
//! survive navigation and restarts; there is no expiry.

use mvp_artifact::ArtifactId;
use mvp_storage::{keys, KvStore, StorageError};
use std::sync::Arc;
use uuid::Uuid;

/// Identity shown when the stored one is missing
pub const DEFAULT_USER_LABEL: &str = "user@example.com";

/// Handle to the persisted session
#[derive(Debug, Clone)]
pub struct SessionContext {
    kv: Arc<dyn KvStore>,
}

impl SessionContext {
    /// Create session over `kv`
    #[inline]
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Store the idea text verbatim
    ///
    /// No validation happens here; the capture stage rejects empty input.
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn set_idea(&self, text: &str) -> Result<(), StorageError> {
        self.kv.set(keys::IDEA_TEXT, text)
    }

    /// Current idea text
    #[must_use]
    pub fn idea(&self) -> Option<String> {
        self.read(keys::IDEA_TEXT)
    }

    /// Toggle AI suggestions for the idea
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn set_ai_assist(&self, enabled: bool) -> Result<(), StorageError> {
        self.kv.set(keys::AI_ASSIST, if enabled { "true" } else { "false" })
    }

    /// Whether AI suggestions are enabled
    #[must_use]
    pub fn ai_assist(&self) -> bool {
        self.read(keys::AI_ASSIST).is_some_and(|v| v == "true")
    }

    /// Start an authenticated session
    ///
    /// Any identity is accepted; credentials are not verified.
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn login(&self, identity: &str) -> Result<(), StorageError> {
        let token = Uuid::new_v4().to_string();
        self.kv.set(keys::AUTH_TOKEN, &token)?;
        self.kv.set(keys::USER_IDENTITY, identity)?;
        tracing::info!("Session authenticated as {}", identity);
        Ok(())
    }

    /// End the authenticated session
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn logout(&self) -> Result<(), StorageError> {
        self.kv.remove(keys::AUTH_TOKEN)?;
        self.kv.remove(keys::USER_IDENTITY)?;
        tracing::info!("Session logged out");
        Ok(())
    }

    /// Whether a session token is present
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(keys::AUTH_TOKEN).is_some_and(|t| !t.is_empty())
    }

    /// Stored identity of the authenticated user
    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        self.read(keys::USER_IDENTITY)
    }

    /// Identity for display, falling back to [`DEFAULT_USER_LABEL`]
    #[must_use]
    pub fn user_label(&self) -> String {
        self.current_user()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_LABEL.to_string())
    }

    /// Point the session at the most recent artifact
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn set_last_artifact(&self, id: &ArtifactId) -> Result<(), StorageError> {
        self.kv.set(keys::LAST_ARTIFACT_ID, id.as_str())
    }

    /// Forget the most recent artifact
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn clear_last_artifact(&self) -> Result<(), StorageError> {
        self.kv.remove(keys::LAST_ARTIFACT_ID)
    }

    /// Id of the most recent artifact
    #[must_use]
    pub fn last_artifact(&self) -> Option<ArtifactId> {
        self.read(keys::LAST_ARTIFACT_ID).map(ArtifactId::from)
    }

    /// Drop every session value
    ///
    /// # Errors
    /// Returns error if the write could not be made durable
    pub fn clear(&self) -> Result<(), StorageError> {
        for key in keys::SESSION_KEYS {
            self.kv.remove(key)?;
        }
        tracing::info!("Session cleared");
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read session key {}, treating as absent: {}", key, e);
                None
            }
        }
    }
}
