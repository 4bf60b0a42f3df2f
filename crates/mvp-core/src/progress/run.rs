//! Timer-driven build run
//!
//! One spawned task owns the engine and both timers. Each change is published
//! as an immutable [`ProgressSnapshot`] on a watch channel. A single
//! cancellation token stops both timers together; dropping the [`BuildRun`]
//! handle fires it, so a run never outlives the view that started it.

use super::{Phase, ProgressEvent, ProgressSnapshot, StageProgressEngine};
use crate::error::WizardError;
use crate::types::ProgressConfig;
use mvp_artifact::ArtifactId;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Handle to a running build simulation
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct BuildRun {
    id: Uuid,
    phases: Arc<[Phase]>,
    snapshots: watch::Receiver<ProgressSnapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    /// Idea text the run was started for
    subject: Option<String>,
    /// Artifact minted when the finished run is first claimed
    artifact: OnceLock<ArtifactId>,
}

impl BuildRun {
    /// Start a run over `phases`
    #[must_use]
    pub fn start(phases: impl Into<Arc<[Phase]>>, config: &ProgressConfig) -> Self {
        let phases = phases.into();
        let mut engine = StageProgressEngine::new(Arc::clone(&phases), config.percent_step);
        engine.start();

        let id = Uuid::new_v4();
        let (tx, rx) = watch::channel(engine.snapshot());
        let cancel = CancellationToken::new();

        tracing::info!(
            "Build run {} started ({} phases, {}% every {}ms)",
            id,
            phases.len(),
            config.percent_step.max(1),
            config.tick_interval().as_millis()
        );

        let task = tokio::spawn(drive(id, engine, tx, cancel.clone(), *config));

        Self {
            id,
            phases,
            snapshots: rx,
            cancel,
            task: Some(task),
            subject: None,
            artifact: OnceLock::new(),
        }
    }

    /// Tag the run with the idea text it builds
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Idea text the run builds, if tagged
    #[inline]
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Artifact produced by this run, once claimed
    #[inline]
    #[must_use]
    pub fn artifact(&self) -> Option<&ArtifactId> {
        self.artifact.get()
    }

    /// Artifact for this run, minted on first call
    pub(crate) fn claim_artifact(&self) -> &ArtifactId {
        self.artifact.get_or_init(ArtifactId::new)
    }

    /// Run identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Phases of this run
    #[inline]
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Latest published state
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.snapshots.borrow()
    }

    /// Receiver that observes every published snapshot
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until the percentage reaches 100
    ///
    /// # Errors
    /// Returns [`WizardError::BuildCancelled`] if the run stops first
    pub async fn wait_complete(&self) -> Result<ProgressSnapshot, WizardError> {
        let mut rx = self.snapshots.clone();
        // The borrowed value must be released before `rx` goes out of scope
        let result = match rx.wait_for(|s| s.is_complete).await {
            Ok(snapshot) => Ok(*snapshot),
            Err(_) => Err(WizardError::BuildCancelled),
        };
        result
    }

    /// Stop both timers
    ///
    /// The last published snapshot stays readable. No-op once complete.
    pub fn cancel(&self) {
        if self.snapshot().is_complete || self.cancel.is_cancelled() {
            return;
        }
        tracing::debug!("Build run {} cancel requested", self.id);
        self.cancel.cancel();
    }

    /// Whether the run was cancelled
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the driving task has exited
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Cancel and wait for the driving task to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Build run {} task ended abnormally: {}", self.id, e);
            }
        }
    }
}

impl Drop for BuildRun {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn drive(
    id: Uuid,
    mut engine: StageProgressEngine,
    tx: watch::Sender<ProgressSnapshot>,
    cancel: CancellationToken,
    config: ProgressConfig,
) {
    let tick = config.tick_interval();
    let phase_period = config.phase_interval();

    // setInterval semantics: first tick after one full period
    let mut percent_timer = interval_at(Instant::now() + tick, tick);
    let mut phase_timer = interval_at(Instant::now() + phase_period, phase_period);
    percent_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    phase_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let phases_left = !engine.is_on_last_phase();

        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                tracing::info!(
                    "Build run {} cancelled at {}%",
                    id,
                    engine.snapshot().percent_complete
                );
                return;
            }

            _ = percent_timer.tick() => match engine.tick_percent() {
                Some(ProgressEvent::Completed) => {
                    tx.send_replace(engine.snapshot());
                    tracing::info!("Build run {} complete", id);
                    return;
                }
                Some(event) => {
                    tracing::debug!("Build run {}: {:?}", id, event);
                    tx.send_replace(engine.snapshot());
                }
                None => return,
            },

            _ = phase_timer.tick(), if phases_left => {
                if let Some(event) = engine.tick_phase() {
                    tracing::debug!(
                        "Build run {}: {:?} ({})",
                        id,
                        event,
                        engine.current_phase().map_or("", |p| p.name.as_str())
                    );
                    tx.send_replace(engine.snapshot());
                }
            }
        }
    }
}
