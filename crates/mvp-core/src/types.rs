//! Core types for the wizard
//!
//! Defines:
//! - The pipeline stages and the routes a caller is sent to
//! - Wizard configuration and its progress timings

use crate::error::WizardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User-visible pipeline stage, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Enter the idea
    Capture,
    /// Review the blueprint
    Review,
    /// Watch the simulated build
    Build,
    /// View and save the result
    Preview,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 4] = [Stage::Capture, Stage::Review, Stage::Build, Stage::Preview];

    /// Stage that follows this one
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Capture => Some(Stage::Review),
            Stage::Review => Some(Stage::Build),
            Stage::Build => Some(Stage::Preview),
            Stage::Preview => None,
        }
    }

    /// 1-based step number shown to the user
    #[inline]
    #[must_use]
    pub fn step_number(self) -> u8 {
        match self {
            Stage::Capture => 1,
            Stage::Review => 2,
            Stage::Build => 3,
            Stage::Preview => 4,
        }
    }

    /// Whether entering this stage needs a captured idea
    #[inline]
    #[must_use]
    pub fn requires_idea(self) -> bool {
        self != Stage::Capture
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Capture => "capture",
            Stage::Review => "review",
            Stage::Build => "build",
            Stage::Preview => "preview",
        };
        f.write_str(name)
    }
}

/// Where the presentation layer should send the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// One of the pipeline stages
    Stage(Stage),
    /// Saved-records dashboard
    Dashboard,
    /// Login form
    Auth,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Stage(stage) => write!(f, "{stage}"),
            Route::Dashboard => f.write_str("dashboard"),
            Route::Auth => f.write_str("auth"),
        }
    }
}

/// Wizard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Directory holding the state file
    pub data_dir: PathBuf,
    /// State file name inside `data_dir`
    pub state_file: String,
    /// Populate an empty dashboard with demo records
    pub seed_demo_records: bool,
    /// Build simulation timings
    pub progress: ProgressConfig,
}

impl WizardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// With demo seeding toggled
    #[inline]
    #[must_use]
    pub fn with_demo_seed(mut self, seed: bool) -> Self {
        self.seed_demo_records = seed;
        self
    }

    /// With progress timings
    #[inline]
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressConfig) -> Self {
        self.progress = progress;
        self
    }

    /// Full path of the state file
    #[inline]
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(&self.state_file)
    }

    /// Parse configuration from TOML; missing keys take defaults
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML for this schema
    pub fn from_toml_str(raw: &str) -> Result<Self, WizardError> {
        toml::from_str(raw).map_err(|e| WizardError::ConfigError(e.to_string()))
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WizardError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WizardError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".mvpify"),
            state_file: "state.json".to_string(),
            seed_demo_records: true,
            progress: ProgressConfig::default(),
        }
    }
}

/// Build simulation timings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Period of the overall percentage timer
    pub tick_interval_ms: u64,
    /// Percentage added per tick
    pub percent_step: u8,
    /// Period of the phase cursor timer
    pub phase_interval_ms: u64,
}

impl ProgressConfig {
    /// Percentage timer period
    #[inline]
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Phase timer period
    #[inline]
    #[must_use]
    pub fn phase_interval(&self) -> Duration {
        Duration::from_millis(self.phase_interval_ms.max(1))
    }

    /// Ticks needed to reach 100%
    #[inline]
    #[must_use]
    pub fn ticks_to_complete(&self) -> u32 {
        let step = u32::from(self.percent_step.max(1));
        100_u32.div_ceil(step)
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            percent_step: 2,
            phase_interval_ms: 2000,
        }
    }
}
