//! Error types for MVPify Core
//!
//! Covers:
//! - Capture validation (empty idea)
//! - Stage guards (missing idea, missing build, unauthenticated dashboard)
//! - Build runs that were cancelled or have not finished
//! - Persistence and configuration failures

use crate::types::{Route, Stage};
use mvp_artifact::RecordError;
use mvp_storage::StorageError;

/// Main wizard error type
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Capture got empty or whitespace-only text
    #[error("idea text is empty")]
    EmptyIdea,

    /// Stage entered without a captured idea
    #[error("{stage} requires a captured idea")]
    IdeaRequired { stage: Stage },

    /// Stage entered before any build completed
    #[error("{stage} requires a completed build")]
    BuildRequired { stage: Stage },

    /// Build run has not reached 100%
    #[error("build run not complete ({percent}%)")]
    BuildIncomplete { percent: u8 },

    /// Build run was cancelled before completing
    #[error("build run cancelled")]
    BuildCancelled,

    /// Dashboard accessed without a session
    #[error("not authenticated")]
    NotAuthenticated,

    /// Session persistence failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record persistence failed
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl WizardError {
    /// Check if error is a stage guard the caller recovers from by redirecting
    #[inline]
    #[must_use]
    pub fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::IdeaRequired { .. } | Self::BuildRequired { .. } | Self::NotAuthenticated
        )
    }

    /// Route the caller should send the user to, if any
    #[must_use]
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::IdeaRequired { .. } | Self::EmptyIdea => Some(Route::Stage(Stage::Capture)),
            Self::BuildRequired { .. } | Self::BuildCancelled => Some(Route::Stage(Stage::Build)),
            Self::NotAuthenticated => Some(Route::Auth),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_errors_redirect() {
        let err = WizardError::IdeaRequired { stage: Stage::Build };
        assert!(err.is_guard_violation());
        assert_eq!(err.redirect(), Some(Route::Stage(Stage::Capture)));
        assert_eq!(err.to_string(), "build requires a captured idea");

        assert_eq!(WizardError::NotAuthenticated.redirect(), Some(Route::Auth));
    }

    #[test]
    fn non_guard_errors() {
        let err = WizardError::BuildIncomplete { percent: 42 };
        assert!(!err.is_guard_violation());
        assert_eq!(err.redirect(), None);
        assert!(!WizardError::EmptyIdea.is_guard_violation());
    }
}
