//! Session DTOs and migrations.
//!
//! `sessions.json` holds the whole ordered session list:
//! - V1.0.0: a bare JSON array of sessions, where older entries may lack
//!   `ideas`, `prds`, `webPrds` or `rawRequirements`
//! - V1.1.0: `{ "version": "1.1.0", "sessions": [...] }` with every
//!   collection present
//!
//! A bare array carries no version tag, so [`tag_legacy`] wraps it as V1.0.0
//! before it reaches the migrator. Everything after that goes through
//! [`create_sessions_migrator`].

use ideaspark_core::error::{IdeaSparkError, Result};
use ideaspark_core::session::{
    BrainstormMode, Idea, RawLogEntry, RequirementDoc, Session, WebDoc,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Migrator, Versioned};

/// Migrator entity name of the session list.
pub const SESSIONS_ENTITY: &str = "sessions";
/// Version assumed for an untagged bare array.
pub const LEGACY_SESSIONS_VERSION: &str = "1.0.0";
/// Version written on every save.
pub const SESSIONS_SCHEMA_VERSION: &str = "1.1.0";

const VERSION_KEY: &str = "version";

/// Session as stored before V1.1.0. Every collection is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct SessionV1_0_0 {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub current_mode: BrainstormMode,
    #[serde(default)]
    pub ideas: Option<Vec<Idea>>,
    #[serde(default)]
    pub prds: Option<Vec<RequirementDoc>>,
    #[serde(default)]
    pub web_prds: Option<Vec<WebDoc>>,
    #[serde(default)]
    pub raw_requirements: Option<Vec<RawLogEntry>>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

/// Session as stored since V1.1.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct SessionV1_1_0 {
    pub id: String,
    pub title: String,
    pub goal: String,
    pub current_mode: BrainstormMode,
    pub ideas: Vec<Idea>,
    pub prds: Vec<RequirementDoc>,
    pub web_prds: Vec<WebDoc>,
    pub raw_requirements: Vec<RawLogEntry>,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

/// Session list V1.0.0 (the bare array, once tagged).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct SessionsFileV1_0_0 {
    #[serde(default)]
    pub sessions: Vec<SessionV1_0_0>,
}

/// Session list V1.1.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct SessionsFileV1_1_0 {
    #[serde(default)]
    pub sessions: Vec<SessionV1_1_0>,
}

/// Type alias for the latest session list version.
pub type SessionsFileDTO = SessionsFileV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

/// Fills collections missing from older entries with empty ones.
impl MigratesTo<SessionV1_1_0> for SessionV1_0_0 {
    fn migrate(self) -> SessionV1_1_0 {
        SessionV1_1_0 {
            id: self.id,
            title: self.title,
            goal: self.goal,
            current_mode: self.current_mode,
            ideas: self.ideas.unwrap_or_default(),
            prds: self.prds.unwrap_or_default(),
            web_prds: self.web_prds.unwrap_or_default(),
            raw_requirements: self.raw_requirements.unwrap_or_default(),
            created_at: self.created_at,
            is_archived: self.is_archived,
        }
    }
}

impl MigratesTo<SessionsFileV1_1_0> for SessionsFileV1_0_0 {
    fn migrate(self) -> SessionsFileV1_1_0 {
        SessionsFileV1_1_0 {
            sessions: self.sessions.into_iter().map(MigratesTo::migrate).collect(),
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<SessionV1_1_0> for Session {
    fn from(dto: SessionV1_1_0) -> Self {
        Session {
            id: dto.id,
            title: dto.title,
            goal: dto.goal,
            current_mode: dto.current_mode,
            ideas: dto.ideas,
            prds: dto.prds,
            web_prds: dto.web_prds,
            raw_requirements: dto.raw_requirements,
            created_at: dto.created_at,
            is_archived: dto.is_archived,
        }
    }
}

impl From<Session> for SessionV1_1_0 {
    fn from(session: Session) -> Self {
        SessionV1_1_0 {
            id: session.id,
            title: session.title,
            goal: session.goal,
            current_mode: session.current_mode,
            ideas: session.ideas,
            prds: session.prds,
            web_prds: session.web_prds,
            raw_requirements: session.raw_requirements,
            created_at: session.created_at,
            is_archived: session.is_archived,
        }
    }
}

impl IntoDomain<Vec<Session>> for SessionsFileV1_1_0 {
    fn into_domain(self) -> Vec<Session> {
        self.sessions.into_iter().map(Session::from).collect()
    }
}

impl FromDomain<Vec<Session>> for SessionsFileV1_1_0 {
    fn from_domain(sessions: Vec<Session>) -> Self {
        SessionsFileV1_1_0 {
            sessions: sessions.into_iter().map(SessionV1_1_0::from).collect(),
        }
    }
}

// ============================================================================
// Legacy shape
// ============================================================================

/// Wraps an untagged bare array as a V1.0.0 session list. Tagged values pass
/// through unchanged.
pub fn tag_legacy(value: Value) -> Value {
    match value {
        Value::Array(sessions) => {
            let mut tagged = serde_json::Map::new();
            tagged.insert(
                VERSION_KEY.to_string(),
                Value::String(LEGACY_SESSIONS_VERSION.to_string()),
            );
            tagged.insert("sessions".to_string(), Value::Array(sessions));
            Value::Object(tagged)
        }
        other => other,
    }
}

/// Version tag of a (tagged) session list, if any.
pub fn stored_version(value: &Value) -> Option<&str> {
    value.get(VERSION_KEY).and_then(Value::as_str)
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates the migrator for the session list.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Missing collections become empty
/// - V1.1.0 → `Vec<Session>`: Converts DTOs to domain models (and back on save)
pub fn create_sessions_migrator() -> Result<Migrator> {
    let mut migrator = Migrator::builder().build();

    let sessions_path = Migrator::define(SESSIONS_ENTITY)
        .from::<SessionsFileV1_0_0>()
        .step::<SessionsFileV1_1_0>()
        .into_with_save::<Vec<Session>>();

    migrator.register(sessions_path).map_err(|e| {
        IdeaSparkError::migration(format!("Failed to register sessions migration path: {}", e))
    })?;

    Ok(migrator)
}
