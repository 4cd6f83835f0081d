use super::model::Session;
use super::repository::SessionRepository;
use crate::error::{IdeaSparkError, Result};
use crate::state::repository::StateRepository;
use std::sync::Arc;
use tokio::sync::RwLock;

struct StoreInner {
    sessions: Vec<Session>,
    active_session_id: String,
}

impl StoreInner {
    /// Index of the active session, falling back to the first one.
    fn current_index(&self) -> usize {
        self.sessions
            .iter()
            .position(|s| s.id == self.active_session_id)
            .unwrap_or(0)
    }
}

/// Owns the ordered session list and the active-session pointer.
///
/// `SessionStore` is responsible for:
/// - Loading sessions (synthesizing a default one on first run)
/// - Resolving the current session
/// - Applying whole-session updates and persisting the full list after each one
/// - Creating and switching sessions
///
/// The list is never empty, so there is always a current session.
pub struct SessionStore {
    inner: RwLock<StoreInner>,
    /// Persistent storage backend for session data
    session_repository: Arc<dyn SessionRepository>,
    /// Application state repository (active session ID)
    state_repository: Arc<dyn StateRepository>,
}

impl SessionStore {
    /// Loads the stored sessions and restores the active session pointer.
    ///
    /// When storage holds no sessions a default workspace is created and
    /// persisted immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if storage exists but cannot be read.
    pub async fn load(
        session_repository: Arc<dyn SessionRepository>,
        state_repository: Arc<dyn StateRepository>,
    ) -> Result<Self> {
        let mut sessions = session_repository.load_all().await?;

        if sessions.is_empty() {
            let session = Session::default_workspace(chrono::Utc::now().timestamp_millis());
            tracing::info!("[SessionStore] No stored sessions, created default: {}", session.id);
            sessions.push(session);
            session_repository.save_all(&sessions).await?;
        }

        // Unknown ids are kept as-is; resolution falls back to the first session.
        let active_session_id = match state_repository.get_active_session().await {
            Some(id) => id,
            None => sessions[0].id.clone(),
        };

        tracing::debug!(
            "[SessionStore] Loaded {} session(s), active: {}",
            sessions.len(),
            active_session_id
        );

        Ok(Self {
            inner: RwLock::new(StoreInner {
                sessions,
                active_session_id,
            }),
            session_repository,
            state_repository,
        })
    }

    /// Returns a snapshot of every session in order.
    pub async fn list_sessions(&self) -> Vec<Session> {
        self.inner.read().await.sessions.clone()
    }

    /// Returns a snapshot of the current session.
    ///
    /// If the active id matches no session, the first session is returned.
    pub async fn current_session(&self) -> Session {
        let inner = self.inner.read().await;
        inner.sessions[inner.current_index()].clone()
    }

    /// ID of the session `current_session` resolves to.
    pub async fn current_session_id(&self) -> String {
        let inner = self.inner.read().await;
        inner.sessions[inner.current_index()].id.clone()
    }

    /// Replaces the current session with `mutator(snapshot)`.
    ///
    /// This is how user-driven edits change session content. The mutator
    /// receives an owned snapshot; its result is swapped in as a whole, every
    /// other session and the list order are left untouched, and the full list
    /// is then written to the session repository under the same lock.
    ///
    /// # Errors
    ///
    /// - `Internal` if the mutator changed the session id (nothing is swapped)
    /// - Any persistence error. The in-memory swap stands in that case; the
    ///   error only reports that the snapshot did not reach storage.
    pub async fn update_current<F>(&self, mutator: F) -> Result<Session>
    where
        F: FnOnce(Session) -> Session + Send,
    {
        let mut inner = self.inner.write().await;
        let index = inner.current_index();
        self.replace_at(&mut inner, index, mutator).await
    }

    /// Replaces the session with `session_id` by `mutator(snapshot)`,
    /// whether or not it is current.
    ///
    /// Generation results use this so they land in the session the workflow
    /// started in, even if the user switched away in the meantime.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has that id
    /// - The same errors as [`SessionStore::update_current`]
    pub async fn update_session<F>(&self, session_id: &str, mutator: F) -> Result<Session>
    where
        F: FnOnce(Session) -> Session + Send,
    {
        let mut inner = self.inner.write().await;
        let index = inner
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| IdeaSparkError::not_found("Session", session_id))?;
        self.replace_at(&mut inner, index, mutator).await
    }

    async fn replace_at<F>(&self, inner: &mut StoreInner, index: usize, mutator: F) -> Result<Session>
    where
        F: FnOnce(Session) -> Session + Send,
    {
        let snapshot = inner.sessions[index].clone();
        let original_id = snapshot.id.clone();

        let updated = mutator(snapshot);
        if updated.id != original_id {
            return Err(IdeaSparkError::internal(format!(
                "Session id is immutable: '{}' -> '{}'",
                original_id, updated.id
            )));
        }

        inner.sessions[index] = updated.clone();
        tracing::debug!("[SessionStore] Updated session: {}", original_id);

        self.session_repository.save_all(&inner.sessions).await?;

        Ok(updated)
    }

    /// Appends a new empty session and makes it current.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session list cannot be saved. A failure
    /// to record the active-session pointer is logged; the new session stays
    /// current for this process and the pointer falls back on next load.
    pub async fn create_session(
        &self,
        title: impl Into<String>,
        goal: impl Into<String>,
    ) -> Result<Session> {
        let session = Session::new(title, goal, chrono::Utc::now().timestamp_millis());

        let mut inner = self.inner.write().await;
        inner.sessions.push(session.clone());
        inner.active_session_id = session.id.clone();
        self.session_repository.save_all(&inner.sessions).await?;
        drop(inner);

        self.remember_active(&session.id).await;

        tracing::info!("[SessionStore] Created session: {}", session.id);
        Ok(session)
    }

    /// Makes the session with `session_id` current.
    ///
    /// A failure to record the active-session pointer is logged, as in
    /// [`SessionStore::create_session`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session has that id.
    pub async fn switch_session(&self, session_id: &str) -> Result<Session> {
        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .cloned()
            .ok_or_else(|| IdeaSparkError::not_found("Session", session_id))?;
        inner.active_session_id = session.id.clone();
        drop(inner);

        self.remember_active(&session.id).await;

        Ok(session)
    }

    async fn remember_active(&self, session_id: &str) {
        if let Err(e) = self
            .state_repository
            .set_active_session(session_id.to_string())
            .await
        {
            tracing::warn!(
                "[SessionStore] Failed to persist active session {}: {}",
                session_id,
                e
            );
        }
    }
}
