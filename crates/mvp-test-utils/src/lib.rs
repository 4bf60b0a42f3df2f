//! Testing utilities for MVPify workspace
//!
//! Shared fixtures: wizards over temp-dir or in-memory state, fast progress
//! timings, and tracing setup.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use mvp_artifact::{FixedClock, RecordStore};
use mvp_core::{ProgressConfig, Wizard, WizardConfig, WizardContext};
use mvp_storage::MemoryStore;
use std::sync::{Arc, Once};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Instant used by fixed-clock fixtures
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

/// Progress timings that finish in 10 ticks of 10ms
pub fn fast_progress() -> ProgressConfig {
    ProgressConfig {
        tick_interval_ms: 10,
        percent_step: 10,
        phase_interval_ms: 20,
    }
}

/// Wizard over in-memory state
pub fn setup_memory_wizard() -> Wizard {
    init_tracing();
    Wizard::new(WizardContext::in_memory(WizardConfig::new()))
}

/// Wizard over in-memory state with records stamped at [`fixed_now`]
pub fn setup_fixed_clock_wizard() -> Wizard {
    init_tracing();
    let kv = Arc::new(MemoryStore::new());
    let records = RecordStore::with_clock(kv.clone(), Arc::new(FixedClock(fixed_now())));
    Wizard::new(WizardContext::with_store(kv, WizardConfig::new()).with_records(records))
}

/// Config whose state file lives in `dir`
pub fn temp_config(dir: &TempDir) -> WizardConfig {
    WizardConfig::new()
        .with_data_dir(dir.path())
        .with_progress(fast_progress())
}

/// Wizard persisted under a fresh temp dir
///
/// Keep the returned dir alive for the duration of the test.
pub fn setup_file_wizard() -> (Wizard, TempDir) {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let ctx = WizardContext::open(temp_config(&dir)).unwrap();
    (Wizard::new(ctx), dir)
}

/// Reopen the wizard persisted in `dir`, as after a restart
pub fn reopen_file_wizard(dir: &TempDir) -> Wizard {
    Wizard::new(WizardContext::open(temp_config(dir)).unwrap())
}
