//! Pipeline orchestrator
//!
//! [`Wizard`] sequences the four stages over an injected [`WizardContext`]:
//! 1. Capture the idea into the session
//! 2. Review the blueprint
//! 3. Build: start a timed run and mark its completion
//! 4. Preview: save the result as a record
//!
//! Review, Build and Preview refuse to run without a captured idea; the error
//! tells the caller to redirect to Capture. The dashboard operations are gated
//! on an authenticated session.

use crate::blueprint::{preview_features, Blueprint, PreviewFeature, IMPROVEMENT_SUGGESTIONS};
use crate::error::WizardError;
use crate::progress::{default_phases, BuildRun};
use crate::session::SessionContext;
use crate::types::{Route, Stage, WizardConfig};
use mvp_artifact::{ArtifactId, ArtifactRecord, ArtifactStatus, RecordStats, RecordStore};
use mvp_storage::{FileStore, KvStore, MemoryStore};
use std::sync::Arc;

/// Longest title derived from idea text, in characters
const MAX_DERIVED_TITLE_CHARS: usize = 60;

/// Everything the stages share
///
/// Built once per process and handed to the [`Wizard`]. Session and records
/// share one backing store.
#[derive(Debug, Clone)]
pub struct WizardContext {
    pub session: SessionContext,
    pub records: RecordStore,
    pub config: WizardConfig,
}

impl WizardContext {
    /// Context over the state file named by `config`
    ///
    /// # Errors
    /// Returns error if the data directory cannot be created
    pub fn open(config: WizardConfig) -> Result<Self, WizardError> {
        let store = FileStore::open(config.state_path())?;
        tracing::info!("Wizard state at {}", store.path().display());
        Ok(Self::with_store(Arc::new(store), config))
    }

    /// Context that lives only as long as the process
    #[must_use]
    pub fn in_memory(config: WizardConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    /// Context over an arbitrary backend
    #[must_use]
    pub fn with_store(kv: Arc<dyn KvStore>, config: WizardConfig) -> Self {
        Self {
            session: SessionContext::new(Arc::clone(&kv)),
            records: RecordStore::new(kv),
            config,
        }
    }

    /// With a preconfigured record store
    #[must_use]
    pub fn with_records(mut self, records: RecordStore) -> Self {
        self.records = records;
        self
    }
}

/// Data for the preview stage
#[derive(Debug, Clone)]
pub struct Preview {
    pub idea: String,
    pub artifact_id: ArtifactId,
    pub features: Vec<PreviewFeature>,
    pub saved: Vec<ArtifactRecord>,
}

/// Data for the dashboard
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: String,
    pub records: Vec<ArtifactRecord>,
    pub stats: RecordStats,
}

/// The stage orchestrator
#[derive(Debug, Clone)]
pub struct Wizard {
    ctx: WizardContext,
}

impl Wizard {
    /// Create orchestrator over `ctx`
    #[inline]
    #[must_use]
    pub fn new(ctx: WizardContext) -> Self {
        Self { ctx }
    }

    /// Shared context
    #[inline]
    #[must_use]
    pub fn context(&self) -> &WizardContext {
        &self.ctx
    }

    /// Session handle
    #[inline]
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.ctx.session
    }

    /// Record store handle
    #[inline]
    #[must_use]
    pub fn records(&self) -> &RecordStore {
        &self.ctx.records
    }

    /// Stage a returning user should land on
    #[must_use]
    pub fn resume_stage(&self) -> Stage {
        match (self.ctx.session.idea(), self.ctx.session.last_artifact()) {
            (None, _) => Stage::Capture,
            (Some(_), None) => Stage::Review,
            (Some(_), Some(_)) => Stage::Preview,
        }
    }

    // ---- Capture ----

    /// Accept idea text and move to Review
    ///
    /// A new idea has not been built yet, so any previous build result is
    /// dropped from the session.
    ///
    /// # Errors
    /// Returns [`WizardError::EmptyIdea`] for empty or whitespace-only text;
    /// the session is left unchanged.
    pub fn capture(&self, text: &str) -> Result<Stage, WizardError> {
        if text.trim().is_empty() {
            tracing::debug!("Capture rejected empty idea");
            return Err(WizardError::EmptyIdea);
        }

        self.ctx.session.set_idea(text)?;
        self.ctx.session.clear_last_artifact()?;
        tracing::info!("Captured idea ({} chars)", text.chars().count());
        Ok(Stage::Review)
    }

    /// Accept idea text and the AI-assist choice together
    ///
    /// # Errors
    /// Same as [`Wizard::capture`]; nothing is stored on rejection.
    pub fn capture_with_assist(&self, text: &str, ai_assist: bool) -> Result<Stage, WizardError> {
        let next = self.capture(text)?;
        self.ctx.session.set_ai_assist(ai_assist)?;
        Ok(next)
    }

    /// Suggestions to show next to the idea, if AI assist is on
    #[must_use]
    pub fn suggestions(&self) -> Vec<&'static str> {
        if self.ctx.session.ai_assist() {
            IMPROVEMENT_SUGGESTIONS.to_vec()
        } else {
            Vec::new()
        }
    }

    // ---- Review ----

    /// Blueprint for the captured idea
    ///
    /// # Errors
    /// Returns [`WizardError::IdeaRequired`] without a captured idea
    pub fn review(&self) -> Result<Blueprint, WizardError> {
        let idea = self.require_idea(Stage::Review)?;
        Ok(Blueprint::for_idea(idea))
    }

    // ---- Build ----

    /// Start one build run
    ///
    /// The caller owns the returned handle; dropping it stops the run.
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns [`WizardError::IdeaRequired`] without a captured idea
    pub fn start_build(&self) -> Result<BuildRun, WizardError> {
        let idea = self.require_idea(Stage::Build)?;
        Ok(BuildRun::start(default_phases(), &self.ctx.config.progress).with_subject(idea))
    }

    /// Record that `run` produced an artifact
    ///
    /// Nothing is saved to the record store here; saving is a separate
    /// choice made on the preview stage. Completing the same run again
    /// returns the same artifact id.
    ///
    /// # Errors
    /// Returns [`WizardError::BuildIncomplete`] if the run has not reached 100%,
    /// or [`WizardError::BuildRequired`] if the run was started for a
    /// different idea than the one captured now
    pub fn complete_build(&self, run: &BuildRun) -> Result<ArtifactId, WizardError> {
        let idea = self.require_idea(Stage::Build)?;
        if run.subject() != Some(idea.as_str()) {
            tracing::debug!("Build run {} does not match the captured idea", run.id());
            return Err(WizardError::BuildRequired {
                stage: Stage::Preview,
            });
        }

        let snapshot = run.snapshot();
        if !snapshot.is_complete {
            return Err(WizardError::BuildIncomplete {
                percent: snapshot.percent_complete,
            });
        }

        let id = run.claim_artifact().clone();
        self.ctx.session.set_last_artifact(&id)?;
        tracing::info!("Build run {} produced artifact {}", run.id(), id);
        Ok(id)
    }

    // ---- Preview ----

    /// Data for the preview stage
    ///
    /// # Errors
    /// Returns a guard error without a captured idea or a completed build
    pub fn preview(&self) -> Result<Preview, WizardError> {
        let (idea, artifact_id) = self.require_preview()?;
        Ok(Preview {
            idea,
            artifact_id,
            features: preview_features(),
            saved: self.ctx.records.list(),
        })
    }

    /// Save the built result as a record
    ///
    /// The new record becomes the session's last artifact.
    ///
    /// # Errors
    /// Returns a guard error if the preview stage is not reachable, or a
    /// persistence error
    pub fn save(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ArtifactRecord, WizardError> {
        self.require_preview()?;
        let record = self.ctx.records.create(title, description)?;
        self.ctx.session.set_last_artifact(&record.id)?;
        Ok(record)
    }

    /// Save the built result, titled and described from the idea text
    ///
    /// # Errors
    /// Same as [`Wizard::save`]
    pub fn save_from_idea(&self) -> Result<ArtifactRecord, WizardError> {
        let (idea, _) = self.require_preview()?;
        let description = idea.trim().to_string();
        self.save(derive_title(&description), description)
    }

    // ---- Dashboard ----

    /// Start an authenticated session
    ///
    /// Returns where to send the user next.
    ///
    /// # Errors
    /// Returns error if the session could not be persisted
    pub fn login(&self, identity: &str) -> Result<Route, WizardError> {
        self.ctx.session.login(identity)?;
        Ok(Route::Dashboard)
    }

    /// End the authenticated session
    ///
    /// # Errors
    /// Returns error if the session could not be persisted
    pub fn logout(&self) -> Result<(), WizardError> {
        Ok(self.ctx.session.logout()?)
    }

    /// Whether the session is authenticated
    #[inline]
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.ctx.session.is_authenticated()
    }

    /// Dashboard contents, seeding demo records on first access
    ///
    /// # Errors
    /// Returns [`WizardError::NotAuthenticated`] without a session
    pub fn dashboard(&self) -> Result<Dashboard, WizardError> {
        self.require_auth()?;

        if self.ctx.config.seed_demo_records {
            self.ctx.records.seed_if_empty()?;
        }

        let records = self.ctx.records.list();
        let stats = self.ctx.records.stats();
        Ok(Dashboard {
            user: self.ctx.session.user_label(),
            records,
            stats,
        })
    }

    /// Delete a record from the dashboard
    ///
    /// Returns whether a record was removed.
    ///
    /// # Errors
    /// Returns [`WizardError::NotAuthenticated`] without a session
    pub fn delete_record(&self, id: &ArtifactId) -> Result<bool, WizardError> {
        self.require_auth()?;
        Ok(self.ctx.records.delete(id)?)
    }

    /// Change a record's status
    ///
    /// Returns whether a record was updated.
    ///
    /// # Errors
    /// Returns error if the change could not be persisted
    pub fn set_record_status(
        &self,
        id: &ArtifactId,
        status: ArtifactStatus,
    ) -> Result<bool, WizardError> {
        Ok(self.ctx.records.update_status(id, status)?)
    }

    // ---- Guards ----

    fn require_idea(&self, stage: Stage) -> Result<String, WizardError> {
        match self.ctx.session.idea() {
            Some(idea) if !idea.trim().is_empty() => Ok(idea),
            _ => {
                tracing::debug!("Guard: {} entered without an idea", stage);
                Err(WizardError::IdeaRequired { stage })
            }
        }
    }

    fn require_preview(&self) -> Result<(String, ArtifactId), WizardError> {
        let idea = self.require_idea(Stage::Preview)?;
        let id = self
            .ctx
            .session
            .last_artifact()
            .ok_or(WizardError::BuildRequired {
                stage: Stage::Preview,
            })?;
        Ok((idea, id))
    }

    fn require_auth(&self) -> Result<(), WizardError> {
        if self.ctx.session.is_authenticated() {
            Ok(())
        } else {
            Err(WizardError::NotAuthenticated)
        }
    }
}

/// First line of `idea`, cut to [`MAX_DERIVED_TITLE_CHARS`]
fn derive_title(idea: &str) -> String {
    let line = idea.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= MAX_DERIVED_TITLE_CHARS {
        return line.to_string();
    }
    let cut: String = line.chars().take(MAX_DERIVED_TITLE_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> Wizard {
        Wizard::new(WizardContext::in_memory(WizardConfig::new()))
    }

    #[test]
    fn capture_then_review() {
        let w = wizard();
        assert_eq!(w.capture("A pet-sharing app").unwrap(), Stage::Review);
        let plan = w.review().unwrap();
        assert_eq!(plan.idea, "A pet-sharing app");
    }

    #[test]
    fn capture_rejects_blank() {
        let w = wizard();
        w.capture("first").unwrap();
        for blank in ["", "   ", "\n\t "] {
            assert!(matches!(w.capture(blank), Err(WizardError::EmptyIdea)));
        }
        assert_eq!(w.session().idea().as_deref(), Some("first"));
    }

    #[test]
    fn rejected_capture_keeps_assist_flag() {
        let w = wizard();
        w.capture_with_assist("idea", true).unwrap();
        assert!(w.capture_with_assist(" ", false).is_err());
        assert!(w.session().ai_assist());
        assert_eq!(w.suggestions().len(), IMPROVEMENT_SUGGESTIONS.len());
    }

    #[test]
    fn stages_guarded_without_idea() {
        let w = wizard();
        assert!(matches!(
            w.review(),
            Err(WizardError::IdeaRequired { stage: Stage::Review })
        ));
        assert!(matches!(
            w.preview(),
            Err(WizardError::IdeaRequired { stage: Stage::Preview })
        ));
        assert!(matches!(
            w.save("t", "d"),
            Err(WizardError::IdeaRequired { .. })
        ));
        assert_eq!(w.resume_stage(), Stage::Capture);
    }

    #[test]
    fn preview_requires_build() {
        let w = wizard();
        w.capture("idea").unwrap();
        let err = w.preview().unwrap_err();
        assert!(matches!(err, WizardError::BuildRequired { stage: Stage::Preview }));
        assert_eq!(w.resume_stage(), Stage::Review);
    }

    #[test]
    fn dashboard_requires_auth() {
        let w = wizard();
        assert!(matches!(w.dashboard(), Err(WizardError::NotAuthenticated)));
        assert!(matches!(
            w.delete_record(&ArtifactId::from("1")),
            Err(WizardError::NotAuthenticated)
        ));
    }

    #[test]
    fn dashboard_seeds_once() {
        let w = wizard();
        assert_eq!(w.login("ada@example.com").unwrap(), Route::Dashboard);

        let first = w.dashboard().unwrap();
        assert_eq!(first.user, "ada@example.com");
        assert_eq!(first.records.len(), 2);
        assert_eq!(first.stats.generated, 1);
        assert_eq!(first.stats.in_progress, 1);

        let second = w.dashboard().unwrap();
        assert_eq!(second.records, first.records);
    }

    #[test]
    fn dashboard_without_seed() {
        let w = Wizard::new(WizardContext::in_memory(WizardConfig::new().with_demo_seed(false)));
        w.login("x").unwrap();
        assert!(w.dashboard().unwrap().records.is_empty());
    }

    #[test]
    fn derive_title_cuts_long_lines() {
        assert_eq!(derive_title("Short idea\nmore detail"), "Short idea");
        let long = "a".repeat(100);
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), MAX_DERIVED_TITLE_CHARS);
        assert!(title.ends_with('…'));
    }
}
