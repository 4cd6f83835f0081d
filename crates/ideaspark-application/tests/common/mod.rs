#![allow(dead_code)]

use async_trait::async_trait;
use ideaspark_core::clock::ManualClock;
use ideaspark_core::error::{IdeaSparkError, Result};
use ideaspark_core::generation::{GenerationGateway, IdeaDraft, IdeaRequest};
use ideaspark_core::session::{Session, SessionRepository, SessionStore};
use ideaspark_core::state::{AppState, StateRepository};
use ideaspark_core::view::ViewState;
use ideaspark_application::{CoordinatorSettings, GenerationCoordinator, WorkbenchService};
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::{Notify, RwLock};

#[derive(Default)]
pub struct MemorySessionRepository {
    pub sessions: Mutex<Vec<Session>>,
    pub saves: Mutex<usize>,
    pub fail_saves: bool,
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn load_all(&self) -> Result<Vec<Session>> {
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn save_all(&self, sessions: &[Session]) -> Result<()> {
        if self.fail_saves {
            return Err(IdeaSparkError::io("read-only storage"));
        }
        *self.sessions.lock().unwrap() = sessions.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStateRepository {
    state: Mutex<AppState>,
}

#[async_trait]
impl StateRepository for MemoryStateRepository {
    async fn save_state(&self, state: AppState) -> Result<()> {
        *self.state.lock().unwrap() = state;
        Ok(())
    }

    async fn get_state(&self) -> Result<AppState> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().authenticated
    }

    async fn set_authenticated(&self, authenticated: bool) -> Result<()> {
        self.state.lock().unwrap().authenticated = authenticated;
        Ok(())
    }

    async fn get_active_session(&self) -> Option<String> {
        self.state.lock().unwrap().active_session_id.clone()
    }

    async fn set_active_session(&self, session_id: String) -> Result<()> {
        self.state.lock().unwrap().active_session_id = Some(session_id);
        Ok(())
    }
}

/// Gateway returning canned answers and recording every call.
#[derive(Default)]
pub struct ScriptedGateway {
    pub ideas: Vec<IdeaDraft>,
    pub document: String,
    pub fail: bool,
    /// When set, every call waits for one notification before answering.
    pub gate: Option<Arc<Notify>>,
    pub idea_requests: Mutex<Vec<IdeaRequest>>,
    pub doc_requests: Mutex<Vec<(String, String)>>,
    pub web_requests: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn with_ideas(titles: &[&str]) -> Self {
        Self {
            ideas: titles
                .iter()
                .map(|t| IdeaDraft {
                    title: t.to_string(),
                    content: format!("{t} details"),
                    category: Some("green".to_string()),
                    tags: vec!["tag".to_string()],
                })
                .collect(),
            document: "# Overview\nGenerated body".to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.idea_requests.lock().unwrap().len()
            + self.doc_requests.lock().unwrap().len()
            + self.web_requests.lock().unwrap().len()
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    fn outcome<T>(&self, value: T) -> Result<T> {
        if self.fail {
            Err(IdeaSparkError::Gateway {
                status: Some(503),
                message: "UNAVAILABLE".to_string(),
                retryable: true,
            })
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<IdeaDraft>> {
        self.idea_requests.lock().unwrap().push(request.clone());
        self.wait_gate().await;
        self.outcome(self.ideas.clone())
    }

    async fn generate_requirement_doc(&self, title: &str, content: &str) -> Result<String> {
        self.doc_requests
            .lock()
            .unwrap()
            .push((title.to_string(), content.to_string()));
        self.wait_gate().await;
        self.outcome(self.document.clone())
    }

    async fn generate_web_doc(&self, source_content: &str) -> Result<String> {
        self.web_requests
            .lock()
            .unwrap()
            .push(source_content.to_string());
        self.wait_gate().await;
        self.outcome("## Pages\nLanding".to_string())
    }
}

pub struct Harness {
    pub coordinator: Arc<GenerationCoordinator>,
    pub workbench: WorkbenchService,
    pub store: Arc<SessionStore>,
    pub view: Arc<RwLock<ViewState>>,
    pub gateway: Arc<ScriptedGateway>,
    pub clock: Arc<ManualClock>,
    pub session_repo: Arc<MemorySessionRepository>,
}

impl Harness {
    pub async fn new(gateway: ScriptedGateway) -> Self {
        Self::with_sessions(gateway, Vec::new()).await
    }

    pub async fn with_sessions(gateway: ScriptedGateway, sessions: Vec<Session>) -> Self {
        let session_repo = Arc::new(MemorySessionRepository {
            sessions: Mutex::new(sessions),
            ..Default::default()
        });
        Self::with_repository(gateway, session_repo).await
    }

    pub async fn with_repository(
        gateway: ScriptedGateway,
        session_repo: Arc<MemorySessionRepository>,
    ) -> Self {
        let state_repo = Arc::new(MemoryStateRepository::default());
        let store = Arc::new(
            SessionStore::load(session_repo.clone(), state_repo)
                .await
                .unwrap(),
        );
        let view = Arc::new(RwLock::new(ViewState::default()));
        let gateway = Arc::new(gateway);
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let coordinator = Arc::new(GenerationCoordinator::new(
            store.clone(),
            view.clone(),
            gateway.clone(),
            clock.clone(),
            CoordinatorSettings::default(),
        ));
        let workbench = WorkbenchService::new(store.clone(), view.clone());

        Self {
            coordinator,
            workbench,
            store,
            view,
            gateway,
            clock,
            session_repo,
        }
    }

    pub async fn type_input(&self, input: &str) {
        self.view.write().await.composer.input = input.to_string();
    }

    pub async fn input(&self) -> String {
        self.view.read().await.composer.input.clone()
    }
}
