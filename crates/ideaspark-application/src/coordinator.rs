//! Generation coordinator.
//!
//! Runs the generation workflows against the current session:
//! - Idea boost (composer input -> ideas)
//! - Requirement document generation (composer input or a stored idea -> PRD)
//! - Web conversion (PRD -> web document)
//!
//! At most one workflow is in flight at a time. Every entry point returns a
//! [`GenerationOutcome`]; gateway and persistence failures are logged here and
//! never reach the caller.
//!
//! A workflow is bound to the session that is current when it starts. Its
//! raw-log entry and its result are written to that session even if the user
//! switches sessions while the gateway call is pending.

use ideaspark_core::clock::Clock;
use ideaspark_core::generation::{
    FlightGuard, FlightPermit, FlightState, GenerationGateway, GenerationKind, GenerationOutcome,
    IdeaDraft, IdeaRequest, RejectReason,
};
use ideaspark_core::session::{
    DIRECT_IDEA_ID, Idea, RawLogEntry, RawRequirementKind, RequirementDoc, Session, SessionStore,
    WebDoc, derive_title,
};
use ideaspark_core::view::{ActiveTab, ViewState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::Instrument;

/// Default minimum time a workflow stays in flight after the gateway answered.
pub const DEFAULT_MIN_BUSY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorSettings {
    /// Delay between the gateway call resolving and the guard returning to idle.
    pub min_busy: Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            min_busy: DEFAULT_MIN_BUSY,
        }
    }
}

/// What a requirement-document run starts from.
struct PrdSource {
    /// Recorded verbatim in the raw log and sent as the document body.
    input: String,
    subject: String,
    idea_id: String,
}

pub struct GenerationCoordinator {
    store: Arc<SessionStore>,
    view: Arc<RwLock<ViewState>>,
    gateway: Arc<dyn GenerationGateway>,
    clock: Arc<dyn Clock>,
    flight: FlightGuard,
    settings: CoordinatorSettings,
}

impl GenerationCoordinator {
    /// Creates a coordinator bound to a store and a view state.
    ///
    /// # Arguments
    ///
    /// * `store` - Session store every workflow writes through
    /// * `view` - Shared view state (composer input, tab, selections)
    /// * `gateway` - Remote generation service
    /// * `clock` - Time source for timestamps and the minimum busy delay
    /// * `settings` - Timing settings
    pub fn new(
        store: Arc<SessionStore>,
        view: Arc<RwLock<ViewState>>,
        gateway: Arc<dyn GenerationGateway>,
        clock: Arc<dyn Clock>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            store,
            view,
            gateway,
            clock,
            flight: FlightGuard::new(),
            settings,
        }
    }

    pub fn flight_state(&self) -> FlightState {
        self.flight.state()
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    // ============================================================================
    // Workflows
    // ============================================================================

    /// Generates ideas from the composer input and prepends them to the
    /// current session.
    ///
    /// The input is logged as `AI_BOOST` whether or not the gateway succeeds.
    /// On success the input is cleared; on failure or an unusable answer it
    /// is kept so the user can resubmit.
    pub async fn boost_ideas(&self) -> GenerationOutcome {
        let Some(permit) = self.begin(GenerationKind::Boost) else {
            return GenerationOutcome::Rejected(RejectReason::Busy);
        };

        let origin = self.store.current_session().await;
        let (input, count) = {
            let view = self.view.read().await;
            match view.composer.trimmed_input() {
                Some(_) => (view.composer.input.clone(), view.composer.idea_count()),
                None => return GenerationOutcome::Rejected(RejectReason::EmptyInput),
            }
        };

        let span = tracing::info_span!("boost_ideas", count, session_id = %origin.id);
        let outcome = self.run_boost(origin, input, count).instrument(span).await;
        self.finish(permit).await;
        outcome
    }

    /// Writes a requirement document from the composer input.
    ///
    /// The subject is the first input line cut to 30 characters and the
    /// document is marked as not derived from a stored idea.
    pub async fn generate_prd(&self) -> GenerationOutcome {
        let Some(permit) = self.begin(GenerationKind::Prd) else {
            return GenerationOutcome::Rejected(RejectReason::Busy);
        };

        let session_id = self.store.current_session_id().await;
        let input = {
            let view = self.view.read().await;
            view.composer
                .trimmed_input()
                .map(|_| view.composer.input.clone())
        };
        let Some(input) = input else {
            return GenerationOutcome::Rejected(RejectReason::EmptyInput);
        };

        let source = PrdSource {
            subject: derive_title(&input),
            input,
            idea_id: DIRECT_IDEA_ID.to_string(),
        };

        let span = tracing::info_span!("generate_prd", idea_id = DIRECT_IDEA_ID, %session_id);
        let outcome = self.run_prd(&session_id, source).instrument(span).await;
        if outcome.is_completed() {
            let still_current = self.is_current(&session_id).await;
            let mut view = self.view.write().await;
            view.composer.input.clear();
            if still_current {
                view.active_tab = ActiveTab::Prds;
            }
        }
        self.finish(permit).await;
        outcome
    }

    /// Writes a requirement document from a stored idea.
    ///
    /// The idea content is the document body and the new document links
    /// back to the idea. The composer is left alone; the idea detail view is
    /// closed on success.
    pub async fn generate_prd_from_idea(&self, idea_id: &str) -> GenerationOutcome {
        let Some(permit) = self.begin(GenerationKind::Prd) else {
            return GenerationOutcome::Rejected(RejectReason::Busy);
        };

        let session = self.store.current_session().await;
        let Some(idea) = session.find_idea(idea_id) else {
            tracing::debug!("[GenerationCoordinator] Idea not found: {}", idea_id);
            return GenerationOutcome::Rejected(RejectReason::NotFound);
        };

        let source = PrdSource {
            input: idea.content.clone(),
            subject: derive_title(&idea.title),
            idea_id: idea.id.clone(),
        };

        let span = tracing::info_span!("generate_prd", idea_id, session_id = %session.id);
        let outcome = self.run_prd(&session.id, source).instrument(span).await;
        if outcome.is_completed() {
            self.show_tab_if_current(&session.id, ActiveTab::Prds).await;
        }
        self.finish(permit).await;
        outcome
    }

    /// Derives a web document from the requirement document `prd_id`.
    ///
    /// Only the single-flight guard applies: there is no composer input and
    /// nothing is written to the raw log.
    pub async fn convert_to_web(&self, prd_id: &str) -> GenerationOutcome {
        let Some(permit) = self.begin(GenerationKind::WebPrd) else {
            return GenerationOutcome::Rejected(RejectReason::Busy);
        };

        let session = self.store.current_session().await;
        let Some(prd) = session.find_prd(prd_id).cloned() else {
            tracing::debug!("[GenerationCoordinator] PRD not found: {}", prd_id);
            return GenerationOutcome::Rejected(RejectReason::NotFound);
        };

        let span = tracing::info_span!("convert_to_web", prd_id, session_id = %session.id);
        let outcome = self.run_web(&session.id, prd).instrument(span).await;
        if outcome.is_completed() {
            self.show_tab_if_current(&session.id, ActiveTab::Web).await;
        }
        self.finish(permit).await;
        outcome
    }

    // ============================================================================
    // Workflow bodies
    // ============================================================================

    async fn run_boost(&self, origin: Session, input: String, count: u32) -> GenerationOutcome {
        self.log_raw(&origin.id, &input, RawRequirementKind::AiBoost)
            .await;

        let request = IdeaRequest {
            goal: origin.goal,
            mode: origin.current_mode,
            count,
            context: input,
        };

        tracing::info!(
            "[GenerationCoordinator] Requesting {} idea(s) in {} mode",
            count,
            request.mode
        );

        let drafts = match self.gateway.generate_ideas(&request).await {
            Ok(drafts) => drafts,
            Err(e) => {
                tracing::error!("[GenerationCoordinator] Idea generation failed: {}", e);
                return GenerationOutcome::Failed;
            }
        };

        let now = self.clock.now_millis();
        let ideas: Vec<Idea> = drafts
            .into_iter()
            .filter(IdeaDraft::is_usable)
            .take(count as usize)
            .map(|d| Idea::generated(d.title, d.content, d.category, d.tags, now))
            .collect();

        if ideas.is_empty() {
            tracing::error!("[GenerationCoordinator] Idea generation returned no usable ideas");
            return GenerationOutcome::Failed;
        }

        let created = ideas.len();
        self.apply(&origin.id, move |s| s.with_ideas_prepended(ideas))
            .await;
        self.view.write().await.composer.input.clear();

        tracing::info!("[GenerationCoordinator] Added {} idea(s)", created);
        GenerationOutcome::Completed { created }
    }

    async fn run_prd(&self, session_id: &str, source: PrdSource) -> GenerationOutcome {
        self.log_raw(session_id, &source.input, RawRequirementKind::PrdGen)
            .await;

        let content = match self
            .gateway
            .generate_requirement_doc(&source.subject, &source.input)
            .await
        {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                tracing::error!("[GenerationCoordinator] PRD generation returned an empty document");
                return GenerationOutcome::Failed;
            }
            Err(e) => {
                tracing::error!("[GenerationCoordinator] PRD generation failed: {}", e);
                return GenerationOutcome::Failed;
            }
        };

        let prd = RequirementDoc::new(
            source.idea_id,
            &source.subject,
            content,
            self.clock.now_millis(),
        );
        tracing::info!("[GenerationCoordinator] Created PRD: {}", prd.title);
        self.apply(session_id, move |s| s.with_prd_prepended(prd)).await;

        GenerationOutcome::Completed { created: 1 }
    }

    async fn run_web(&self, session_id: &str, prd: RequirementDoc) -> GenerationOutcome {
        let content = match self.gateway.generate_web_doc(&prd.content).await {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                tracing::error!("[GenerationCoordinator] Web conversion returned an empty document");
                return GenerationOutcome::Failed;
            }
            Err(e) => {
                tracing::error!("[GenerationCoordinator] Web conversion failed: {}", e);
                return GenerationOutcome::Failed;
            }
        };

        let web_doc = WebDoc::derived_from(&prd, content, self.clock.now_millis());
        tracing::info!("[GenerationCoordinator] Created web document: {}", web_doc.title);
        self.apply(session_id, move |s| s.with_web_prd_prepended(web_doc))
            .await;

        GenerationOutcome::Completed { created: 1 }
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn begin(&self, kind: GenerationKind) -> Option<FlightPermit> {
        let permit = self.flight.try_begin(kind);
        match &permit {
            Some(_) => tracing::debug!("[GenerationCoordinator] {:?} in flight", kind),
            None => tracing::debug!(
                "[GenerationCoordinator] {:?} rejected, already {:?}",
                kind,
                self.flight.state()
            ),
        }
        permit
    }

    /// Holds the flight for the minimum busy duration, then releases it.
    async fn finish(&self, permit: FlightPermit) {
        self.clock.sleep(self.settings.min_busy).await;
        tracing::debug!("[GenerationCoordinator] {:?} finished", permit.kind());
        drop(permit);
    }

    async fn log_raw(&self, session_id: &str, input: &str, kind: RawRequirementKind) {
        let entry = RawLogEntry::new(input, kind, self.clock.now_millis());
        self.apply(session_id, move |s| s.with_raw_requirement(entry))
            .await;
    }

    /// Applies an update to the session the workflow started in.
    ///
    /// The in-memory state stays authoritative if the write to storage
    /// fails. If the session no longer exists the update is dropped.
    async fn apply<F>(&self, session_id: &str, mutator: F)
    where
        F: FnOnce(Session) -> Session + Send,
    {
        match self.store.update_session(session_id, mutator).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    "[GenerationCoordinator] Session {} is gone, dropping update",
                    session_id
                );
            }
            Err(e) => {
                tracing::warn!("[GenerationCoordinator] Failed to persist session update: {}", e);
            }
        }
    }

    async fn is_current(&self, session_id: &str) -> bool {
        self.store.current_session_id().await == session_id
    }

    /// Closes the detail view and shows `tab`, unless the user has moved to
    /// another session while the workflow ran.
    async fn show_tab_if_current(&self, session_id: &str, tab: ActiveTab) {
        if !self.is_current(session_id).await {
            tracing::debug!(
                "[GenerationCoordinator] Session {} no longer current, view left alone",
                session_id
            );
            return;
        }
        let mut view = self.view.write().await;
        view.close_details();
        view.active_tab = tab;
    }
}
