//! Stage Progress Engine
//!
//! A build run advances two independent progressions:
//! - an overall percentage, which alone decides completion
//! - a phase cursor, which only narrates what is "happening"
//!
//! [`StageProgressEngine`] holds the state and applies ticks deterministically.
//! [`BuildRun`] drives it from two timers on the tokio runtime.
//!
//! # State machine
//! `NotStarted -> Running -> Complete`. Completion happens exactly once, on
//! the percentage tick that reaches 100; later ticks of either kind are no-ops.

mod run;

pub use run::BuildRun;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// One named step of the simulated build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub description: String,
    /// Nominal duration shown to the user; the cursor itself runs on a fixed period
    pub nominal_duration_ms: u64,
}

impl Phase {
    /// Create phase
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        nominal_duration: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            nominal_duration_ms: u64::try_from(nominal_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Nominal duration
    #[inline]
    #[must_use]
    pub fn nominal_duration(&self) -> Duration {
        Duration::from_millis(self.nominal_duration_ms)
    }
}

/// The five build phases
#[must_use]
pub fn default_phases() -> Vec<Phase> {
    vec![
        Phase::new(
            "Setting up Database",
            "Creating data models and relationships",
            Duration::from_millis(2000),
        ),
        Phase::new(
            "Configuring Authentication",
            "Setting up user login and security",
            Duration::from_millis(1500),
        ),
        Phase::new(
            "Building User Interface",
            "Creating responsive pages and components",
            Duration::from_millis(3000),
        ),
        Phase::new(
            "Integrating Features",
            "Connecting everything together",
            Duration::from_millis(2000),
        ),
        Phase::new(
            "Final Optimizations",
            "Adding polish and testing",
            Duration::from_millis(1500),
        ),
    ]
}

/// Lifecycle of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    NotStarted,
    Running,
    Complete,
}

/// Immutable view of a run at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub state: RunState,
    /// 0-based, never past the last phase
    pub phase_index: usize,
    pub phase_count: usize,
    /// 0..=100
    pub percent_complete: u8,
    /// True iff `percent_complete == 100`
    pub is_complete: bool,
}

impl ProgressSnapshot {
    /// Display status of the phase at `index`
    #[must_use]
    pub fn phase_status(&self, index: usize) -> PhaseStatus {
        if self.is_complete || index < self.phase_index {
            PhaseStatus::Done
        } else if index == self.phase_index && self.state == RunState::Running {
            PhaseStatus::Active
        } else {
            PhaseStatus::Pending
        }
    }

    /// Display status of every phase
    #[must_use]
    pub fn phase_statuses(&self) -> Vec<PhaseStatus> {
        (0..self.phase_count).map(|i| self.phase_status(i)).collect()
    }
}

/// How a phase renders in the build view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseStatus {
    Pending,
    Active,
    Done,
}

/// Observable change produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Percentage moved, still below 100
    Percent(u8),
    /// Cursor moved to the phase at this index
    PhaseAdvanced(usize),
    /// Percentage reached 100; emitted once per run
    Completed,
}

/// Deterministic progress state for one run
#[derive(Debug, Clone)]
pub struct StageProgressEngine {
    phases: Arc<[Phase]>,
    percent_step: u8,
    state: RunState,
    phase_index: usize,
    percent: u8,
}

impl StageProgressEngine {
    /// Create engine over `phases`, advancing `percent_step` per tick
    ///
    /// A step of 0 is treated as 1 so a run always terminates.
    #[must_use]
    pub fn new(phases: impl Into<Arc<[Phase]>>, percent_step: u8) -> Self {
        Self {
            phases: phases.into(),
            percent_step: percent_step.max(1),
            state: RunState::NotStarted,
            phase_index: 0,
            percent: 0,
        }
    }

    /// Engine over [`default_phases`] with the given step
    #[inline]
    #[must_use]
    pub fn with_default_phases(percent_step: u8) -> Self {
        Self::new(default_phases(), percent_step)
    }

    /// Begin the run
    ///
    /// Returns false if the run was already started.
    pub fn start(&mut self) -> bool {
        if self.state != RunState::NotStarted {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// Apply one percentage tick
    ///
    /// Returns `None` when not running. Overshoot clamps to exactly 100.
    pub fn tick_percent(&mut self) -> Option<ProgressEvent> {
        if self.state != RunState::Running {
            return None;
        }

        self.percent = self.percent.saturating_add(self.percent_step).min(100);
        if self.percent == 100 {
            self.state = RunState::Complete;
            Some(ProgressEvent::Completed)
        } else {
            Some(ProgressEvent::Percent(self.percent))
        }
    }

    /// Apply one phase tick
    ///
    /// Returns `None` when not running or already on the last phase.
    pub fn tick_phase(&mut self) -> Option<ProgressEvent> {
        if self.state != RunState::Running || self.is_on_last_phase() {
            return None;
        }
        self.phase_index += 1;
        Some(ProgressEvent::PhaseAdvanced(self.phase_index))
    }

    /// Whether the cursor can no longer advance
    #[inline]
    #[must_use]
    pub fn is_on_last_phase(&self) -> bool {
        self.phase_index + 1 >= self.phases.len()
    }

    /// Current lifecycle state
    #[inline]
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Whether the run has completed
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == RunState::Complete
    }

    /// Phases of this run
    #[inline]
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Phase under the cursor
    #[inline]
    #[must_use]
    pub fn current_phase(&self) -> Option<&Phase> {
        self.phases.get(self.phase_index)
    }

    /// Current state as an immutable snapshot
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            state: self.state,
            phase_index: self.phase_index,
            phase_count: self.phases.len(),
            percent_complete: self.percent,
            is_complete: self.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fresh_run_starts_at_zero() {
        let mut engine = StageProgressEngine::with_default_phases(2);
        let snap = engine.snapshot();
        assert_eq!(snap.state, RunState::NotStarted);
        assert_eq!(snap.phase_index, 0);
        assert_eq!(snap.percent_complete, 0);
        assert!(!snap.is_complete);

        assert!(engine.start());
        let snap = engine.snapshot();
        assert_eq!(snap.state, RunState::Running);
        assert_eq!((snap.phase_index, snap.percent_complete), (0, 0));
        assert!(!engine.start());
    }

    #[test]
    fn default_phase_durations() {
        let total: Duration = default_phases().iter().map(Phase::nominal_duration).sum();
        assert_eq!(default_phases()[0].nominal_duration(), Duration::from_millis(2000));
        assert!(total > Duration::ZERO);
    }

    #[test]
    fn ticks_before_start_are_noops() {
        let mut engine = StageProgressEngine::with_default_phases(2);
        assert_eq!(engine.tick_percent(), None);
        assert_eq!(engine.tick_phase(), None);
        assert_eq!(engine.snapshot().percent_complete, 0);
    }

    #[test]
    fn overshoot_clamps_to_hundred() {
        let mut engine = StageProgressEngine::with_default_phases(3);
        engine.start();
        for _ in 0..33 {
            assert!(matches!(engine.tick_percent(), Some(ProgressEvent::Percent(_))));
        }
        assert_eq!(engine.snapshot().percent_complete, 99);
        assert_eq!(engine.tick_percent(), Some(ProgressEvent::Completed));
        assert_eq!(engine.snapshot().percent_complete, 100);
        assert_eq!(engine.tick_percent(), None);
        assert_eq!(engine.snapshot().percent_complete, 100);
    }

    #[test]
    fn phase_cursor_stops_at_last_phase() {
        let mut engine = StageProgressEngine::with_default_phases(2);
        engine.start();
        for expected in 1..5 {
            assert_eq!(engine.tick_phase(), Some(ProgressEvent::PhaseAdvanced(expected)));
        }
        assert_eq!(engine.tick_phase(), None);
        assert_eq!(engine.snapshot().phase_index, 4);
        assert_eq!(engine.current_phase().map(|p| p.name.as_str()), Some("Final Optimizations"));
        // Cursor at the end does not complete the run
        assert!(!engine.is_complete());
    }

    #[test]
    fn completion_does_not_wait_for_phases() {
        let mut engine = StageProgressEngine::with_default_phases(50);
        engine.start();
        engine.tick_percent();
        assert_eq!(engine.tick_percent(), Some(ProgressEvent::Completed));
        assert_eq!(engine.snapshot().phase_index, 0);
        assert_eq!(engine.tick_phase(), None);
    }

    #[test]
    fn zero_step_still_terminates() {
        let mut engine = StageProgressEngine::with_default_phases(0);
        engine.start();
        let ticks = std::iter::from_fn(|| engine.tick_percent()).count();
        assert_eq!(ticks, 100);
    }

    #[test]
    fn phase_statuses_follow_cursor() {
        let mut engine = StageProgressEngine::with_default_phases(2);
        engine.start();
        engine.tick_phase();
        engine.tick_phase();
        assert_eq!(
            engine.snapshot().phase_statuses(),
            vec![
                PhaseStatus::Done,
                PhaseStatus::Done,
                PhaseStatus::Active,
                PhaseStatus::Pending,
                PhaseStatus::Pending,
            ]
        );

        while engine.tick_percent() != Some(ProgressEvent::Completed) {}
        assert!(engine
            .snapshot()
            .phase_statuses()
            .iter()
            .all(|s| *s == PhaseStatus::Done));
    }

    #[test]
    fn snapshot_serializes_for_the_view() {
        let mut engine = StageProgressEngine::with_default_phases(2);
        engine.start();
        engine.tick_percent();
        let json = serde_json::to_value(engine.snapshot()).unwrap();

        assert_eq!(json["phaseIndex"], 0);
        assert_eq!(json["percentComplete"], 2);
        assert_eq!(json["isComplete"], false);
        assert_eq!(json["state"], "Running");
    }

    #[test]
    fn empty_phase_list_is_tolerated() {
        let mut engine = StageProgressEngine::new(Vec::<Phase>::new(), 10);
        engine.start();
        assert_eq!(engine.tick_phase(), None);
        assert_eq!(engine.snapshot().phase_index, 0);
        assert!(engine.current_phase().is_none());
    }

    proptest! {
        #[test]
        fn prop_percent_monotonic_and_completes_once(
            step in 1u8..=100,
            ticks in prop::collection::vec(any::<bool>(), 0..400),
        ) {
            let mut engine = StageProgressEngine::with_default_phases(step);
            engine.start();
            let phase_count = engine.phases().len();

            let mut last_percent = 0u8;
            let mut last_phase = 0usize;
            let mut completions = 0;

            for is_percent_tick in ticks {
                let event = if is_percent_tick {
                    engine.tick_percent()
                } else {
                    engine.tick_phase()
                };
                let snap = engine.snapshot();

                prop_assert!(snap.percent_complete >= last_percent);
                prop_assert!(snap.percent_complete <= 100);
                prop_assert!(snap.phase_index >= last_phase);
                prop_assert!(snap.phase_index < phase_count);
                prop_assert_eq!(snap.is_complete, snap.percent_complete == 100);

                if event == Some(ProgressEvent::Completed) {
                    completions += 1;
                    prop_assert_eq!(snap.percent_complete, 100);
                    prop_assert!(last_percent < 100);
                }

                last_percent = snap.percent_complete;
                last_phase = snap.phase_index;
            }

            prop_assert!(completions <= 1);
            prop_assert_eq!(completions == 1, engine.is_complete());
        }

        #[test]
        fn prop_enough_ticks_end_at_exactly_hundred(step in 1u8..=100, extra in 0usize..20) {
            let mut engine = StageProgressEngine::with_default_phases(step);
            engine.start();
            let needed = 100usize.div_ceil(usize::from(step));

            let events: Vec<_> = (0..needed + extra)
                .filter_map(|_| engine.tick_percent())
                .collect();
            prop_assert_eq!(events.len(), needed);
            prop_assert_eq!(events.last(), Some(&ProgressEvent::Completed));
            prop_assert_eq!(engine.snapshot().percent_complete, 100);
        }
    }
}
