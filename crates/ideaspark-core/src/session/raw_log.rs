//! Audit trail of user prompts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which workflow consumed a raw prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawRequirementKind {
    AiBoost,
    PrdGen,
}

/// A verbatim copy of one submitted prompt. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLogEntry {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: RawRequirementKind,
    pub created_at: i64,
}

impl RawLogEntry {
    pub fn new(content: impl Into<String>, kind: RawRequirementKind, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            kind,
            created_at,
        }
    }
}
