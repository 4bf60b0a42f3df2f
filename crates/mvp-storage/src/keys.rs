//! Persisted key names
//!
//! Kept identical to the keys written by the first web release so existing
//! browser exports load unchanged.

/// Last idea text submitted to the pipeline
pub const IDEA_TEXT: &str = "currentIdea";

/// Whether the user asked for AI suggestions on their idea
pub const AI_ASSIST: &str = "useAI";

/// Opaque token; presence means the session is authenticated
pub const AUTH_TOKEN: &str = "isAuthenticated";

/// Display label of the authenticated user
pub const USER_IDENTITY: &str = "userEmail";

/// Id of the artifact produced by the most recent build
pub const LAST_ARTIFACT_ID: &str = "generatedMVPId";

/// JSON array of artifact records
pub const ARTIFACT_RECORDS: &str = "savedMVPs";

/// Every key owned by the session context
pub const SESSION_KEYS: [&str; 5] = [
    IDEA_TEXT,
    AI_ASSIST,
    AUTH_TOKEN,
    USER_IDENTITY,
    LAST_ARTIFACT_ID,
];
