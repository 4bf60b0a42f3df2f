//! MVPify Core - Idea to MVP wizard
//!
//! The engine behind the four wizard stages:
//! - Capture: accept a free-text idea into the session
//! - Review: show the blueprint derived from the idea
//! - Build: run the simulated multi-phase build with live progress
//! - Preview: save the result as a durable artifact record
//!
//! plus the dashboard that lists, updates and deletes saved records.
//!
//! # Example
//!
//! ```rust,ignore
//! use mvp_core::{Wizard, WizardConfig, WizardContext};
//!
//! # async fn example() -> Result<(), mvp_core::WizardError> {
//! let ctx = WizardContext::open(WizardConfig::new())?;
//! let wizard = Wizard::new(ctx);
//!
//! wizard.capture("A site where freelancers sell services")?;
//! let blueprint = wizard.review()?;
//! let mut run = wizard.start_build()?;
//! run.wait_complete().await?;
//! wizard.complete_build(&run)?;
//! let record = wizard.save_from_idea()?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod blueprint;
pub mod error;
pub mod progress;
pub mod session;
pub mod types;
pub mod wizard;

// Re-exports for convenience
pub use blueprint::{preview_features, Blueprint, DataModelSpec, PageSpec, PreviewFeature};
pub use error::WizardError;
pub use progress::{
    default_phases, BuildRun, Phase, PhaseStatus, ProgressEvent, ProgressSnapshot, RunState,
    StageProgressEngine,
};
pub use session::SessionContext;
pub use types::{ProgressConfig, Route, Stage, WizardConfig};
pub use wizard::{Dashboard, Preview, Wizard, WizardContext};

pub use mvp_artifact::{ArtifactId, ArtifactRecord, ArtifactStatus, RecordStats, RecordStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with MVPify Core
    pub use crate::{
        ArtifactId, ArtifactRecord, ArtifactStatus, BuildRun, ProgressSnapshot, Stage, Wizard,
        WizardConfig, WizardContext, WizardError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
