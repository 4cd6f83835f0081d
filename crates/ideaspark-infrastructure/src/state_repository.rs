//! Application state repository backed by `app_state.json`.

use crate::dto::AppStateV1_0;
use crate::storage::AtomicJsonFile;
use ideaspark_core::error::{IdeaSparkError, Result};
use ideaspark_core::state::model::AppState;
use ideaspark_core::state::repository::StateRepository;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State repository with an in-memory cache in front of the file.
///
/// Reads are served from the cache; every change is written through.
#[derive(Clone)]
pub struct StateRepositoryImpl {
    state: Arc<Mutex<AppState>>,
    file: Arc<AtomicJsonFile<AppStateV1_0>>,
}

impl StateRepositoryImpl {
    /// Loads the state from `path`, starting from defaults if the file is missing.
    pub async fn new(path: PathBuf) -> Result<Self> {
        let file = Arc::new(AtomicJsonFile::<AppStateV1_0>::new(path));

        let loader = file.clone();
        let initial = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| IdeaSparkError::internal(format!("Failed to join task: {}", e)))??
            .map(AppState::from)
            .unwrap_or_default();

        Ok(Self {
            state: Arc::new(Mutex::new(initial)),
            file,
        })
    }

    async fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppState) + Send,
    {
        let mut state = self.state.lock().await.clone();
        f(&mut state);
        self.save_state(state).await
    }
}

#[async_trait::async_trait]
impl StateRepository for StateRepositoryImpl {
    async fn save_state(&self, state: AppState) -> Result<()> {
        *self.state.lock().await = state.clone();

        let file = self.file.clone();
        let dto = AppStateV1_0::from(state);
        tokio::task::spawn_blocking(move || file.save(&dto))
            .await
            .map_err(|e| IdeaSparkError::internal(format!("Failed to join task: {}", e)))??;
        Ok(())
    }

    async fn get_state(&self) -> Result<AppState> {
        Ok(self.state.lock().await.clone())
    }

    async fn is_authenticated(&self) -> bool {
        self.state.lock().await.authenticated
    }

    async fn set_authenticated(&self, authenticated: bool) -> Result<()> {
        self.update(|s| s.authenticated = authenticated).await
    }

    async fn get_active_session(&self) -> Option<String> {
        self.state.lock().await.active_session_id.clone()
    }

    async fn set_active_session(&self, session_id: String) -> Result<()> {
        self.update(|s| s.active_session_id = Some(session_id)).await
    }
}
