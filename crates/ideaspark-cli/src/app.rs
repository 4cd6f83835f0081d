//! Wires the layers together for one process.

use anyhow::{Context, Result, bail};
use ideaspark_application::{CoordinatorSettings, GenerationCoordinator, WorkbenchService};
use ideaspark_core::clock::SystemClock;
use ideaspark_core::config::{AuthConfig, RootConfig};
use ideaspark_core::generation::GenerationGateway;
use ideaspark_core::session::SessionStore;
use ideaspark_core::state::StateRepository;
use ideaspark_core::view::ViewState;
use ideaspark_infrastructure::{
    ConfigService, IdeaSparkPaths, JsonSessionRepository, SecretServiceImpl, StateRepositoryImpl,
};
use ideaspark_interaction::GeminiGateway;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct App {
    pub workbench: WorkbenchService,
    pub view: Arc<RwLock<ViewState>>,
    auth: AuthConfig,
    state_repository: Arc<dyn StateRepository>,
    /// `None` until a Gemini API key is configured.
    coordinator: Option<GenerationCoordinator>,
    missing_key_hint: String,
}

impl App {
    /// Loads configuration and storage from `paths` and connects the Gemini gateway.
    pub async fn bootstrap(paths: &IdeaSparkPaths) -> Result<Self> {
        let config = ConfigService::new(paths.config_file()).get_config()?;
        let secrets = SecretServiceImpl::new(paths.secret_file());
        secrets.ensure_secret_file()?;

        let (gateway, missing_key_hint) = match secrets.gemini() {
            Ok(gemini) => {
                let idea_model = gemini
                    .model_name
                    .clone()
                    .unwrap_or_else(|| config.generation.idea_model.clone());
                let gateway = GeminiGateway::with_timeout(
                    gemini.api_key,
                    config.generation.request_timeout(),
                )?
                .with_idea_model(idea_model)
                .with_document_model(config.generation.document_model.clone());
                (Some(Arc::new(gateway) as Arc<dyn GenerationGateway>), String::new())
            }
            Err(e) => {
                tracing::warn!("[App] Generation disabled: {}", e);
                (None, e.to_string())
            }
        };

        let mut app = Self::assemble(paths, config, gateway).await?;
        app.missing_key_hint = missing_key_hint;
        Ok(app)
    }

    /// Builds the app around an explicit gateway. `None` disables generation.
    pub async fn assemble(
        paths: &IdeaSparkPaths,
        config: RootConfig,
        gateway: Option<Arc<dyn GenerationGateway>>,
    ) -> Result<Self> {
        let session_repository = Arc::new(JsonSessionRepository::new(paths.sessions_file()));
        let state_repository: Arc<dyn StateRepository> =
            Arc::new(StateRepositoryImpl::new(paths.app_state_file()).await?);

        let store = Arc::new(
            SessionStore::load(session_repository, state_repository.clone())
                .await
                .context("Failed to load sessions")?,
        );
        let view = Arc::new(RwLock::new(ViewState::new(config.generation.idea_count())));

        let coordinator = gateway.map(|gateway| {
            GenerationCoordinator::new(
                store.clone(),
                view.clone(),
                gateway,
                Arc::new(SystemClock),
                CoordinatorSettings {
                    min_busy: config.generation.min_busy(),
                },
            )
        });

        Ok(Self {
            workbench: WorkbenchService::new(store, view.clone()),
            view,
            auth: config.auth,
            state_repository,
            coordinator,
            missing_key_hint: "Generation gateway not configured".to_string(),
        })
    }

    pub fn coordinator(&self) -> Result<&GenerationCoordinator> {
        match &self.coordinator {
            Some(coordinator) => Ok(coordinator),
            None => bail!("{}", self.missing_key_hint),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state_repository.is_authenticated().await
    }

    /// Checks the credentials and persists the login flag.
    ///
    /// Returns `false` for wrong credentials; the flag is left unchanged then.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool> {
        if !self.auth.accepts(username, password) {
            tracing::info!("[App] Login rejected for '{}'", username);
            return Ok(false);
        }
        self.state_repository.set_authenticated(true).await?;
        Ok(true)
    }

    pub async fn logout(&self) -> Result<()> {
        self.state_repository.set_authenticated(false).await?;
        Ok(())
    }

    pub async fn require_login(&self) -> Result<()> {
        if !self.is_authenticated().await {
            bail!("Not logged in. Run `ideaspark login` first.");
        }
        Ok(())
    }
}
