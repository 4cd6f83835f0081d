//! Non-generative workbench operations.
//!
//! Everything that changes session content outside the generation
//! workflows goes through here, and from here through
//! `SessionStore::update_current`.

use ideaspark_core::error::Result;
use ideaspark_core::session::{BrainstormMode, Session, SessionStore};
use ideaspark_core::view::{ActiveTab, ViewState};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct WorkbenchService {
    store: Arc<SessionStore>,
    view: Arc<RwLock<ViewState>>,
}

impl WorkbenchService {
    pub fn new(store: Arc<SessionStore>, view: Arc<RwLock<ViewState>>) -> Self {
        Self { store, view }
    }

    pub async fn current_session(&self) -> Session {
        self.store.current_session().await
    }

    pub async fn list_sessions(&self) -> Vec<Session> {
        self.store.list_sessions().await
    }

    /// Sets the strategy used by the next idea boost.
    pub async fn set_mode(&self, mode: BrainstormMode) -> Result<Session> {
        tracing::debug!("[WorkbenchService] set_mode: {}", mode);
        self.store.update_current(move |s| s.with_mode(mode)).await
    }

    pub async fn set_goal(&self, goal: impl Into<String>) -> Result<Session> {
        let goal = goal.into();
        self.store
            .update_current(move |mut s| {
                s.goal = goal;
                s
            })
            .await
    }

    /// Flips the favorite flag of an idea in the current session.
    ///
    /// Unknown ids leave the session unchanged; it is still written back.
    pub async fn toggle_favorite(&self, idea_id: &str) -> Result<Session> {
        self.store
            .update_current(|s| s.with_favorite_toggled(idea_id))
            .await
    }

    /// Creates a session, makes it current and resets the view to the ideas tab.
    pub async fn create_session(
        &self,
        title: impl Into<String>,
        goal: impl Into<String>,
    ) -> Result<Session> {
        let session = self.store.create_session(title, goal).await?;
        self.reset_view().await;
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no session has that id.
    pub async fn switch_session(&self, session_id: &str) -> Result<Session> {
        let session = self.store.switch_session(session_id).await?;
        self.reset_view().await;
        Ok(session)
    }

    // Selections point into the previous session, so they are dropped.
    async fn reset_view(&self) {
        let mut view = self.view.write().await;
        view.close_details();
        view.active_tab = ActiveTab::Ideas;
    }
}
