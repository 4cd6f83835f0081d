//! JSON-file session repository.
//!
//! The whole ordered session list lives in one `sessions.json` and is
//! rewritten atomically on every save.

use crate::dto::{
    SESSIONS_ENTITY, SESSIONS_SCHEMA_VERSION, create_sessions_migrator, stored_version, tag_legacy,
};
use crate::storage::AtomicJsonFile;
use ideaspark_core::error::{IdeaSparkError, Result};
use ideaspark_core::session::{Session, SessionRepository};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct JsonSessionRepository {
    file: Arc<AtomicJsonFile<Value>>,
}

impl JsonSessionRepository {
    /// Creates a repository backed by `path`. The file is created on first save.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }
}

#[async_trait::async_trait]
impl SessionRepository for JsonSessionRepository {
    /// Loads every session; a missing or blank file yields an empty list.
    ///
    /// # Errors
    ///
    /// A file that exists but does not parse is reported rather than
    /// replaced, so user data is never overwritten by a default workspace.
    async fn load_all(&self) -> Result<Vec<Session>> {
        let file = self.file.clone();
        let value = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| IdeaSparkError::internal(format!("Failed to join task: {}", e)))??;

        let Some(value) = value else {
            tracing::debug!("[JsonSessionRepository] No sessions file yet");
            return Ok(Vec::new());
        };

        let value = tag_legacy(value);
        match stored_version(&value) {
            Some(SESSIONS_SCHEMA_VERSION) => {}
            Some(version) => tracing::info!(
                "[JsonSessionRepository] Loaded sessions in schema {}, will rewrite as {}",
                version,
                SESSIONS_SCHEMA_VERSION
            ),
            None => tracing::warn!("[JsonSessionRepository] Sessions file has no version tag"),
        }

        let migrator = create_sessions_migrator()?;
        let sessions: Vec<Session> = migrator.load_flat_from(SESSIONS_ENTITY, value)?;
        tracing::debug!("[JsonSessionRepository] Loaded {} session(s)", sessions.len());
        Ok(sessions)
    }

    async fn save_all(&self, sessions: &[Session]) -> Result<()> {
        let migrator = create_sessions_migrator()?;
        let json = migrator.save_domain_flat(SESSIONS_ENTITY, sessions.to_vec())?;
        let value: Value = serde_json::from_str(&json)?;

        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.save(&value))
            .await
            .map_err(|e| IdeaSparkError::internal(format!("Failed to join task: {}", e)))??;
        Ok(())
    }
}
