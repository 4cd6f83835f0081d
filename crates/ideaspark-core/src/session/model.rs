//! Session domain model.
//!
//! This module contains the core Session entity: a named workspace that owns
//! every idea, document and raw prompt produced in it.

use super::document::{RequirementDoc, WebDoc};
use super::idea::Idea;
use super::mode::BrainstormMode;
use super::raw_log::RawLogEntry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title of the workspace synthesized on first run.
pub const DEFAULT_SESSION_TITLE: &str = "Main Workspace";
/// Goal of the workspace synthesized on first run.
pub const DEFAULT_SESSION_GOAL: &str = "Start any idea experiment here";

/// Represents a workspace in the application's domain layer.
///
/// A session contains:
/// - Ideas generated by the boost workflow
/// - Requirement documents and the web documents derived from them
/// - The raw prompt log
///
/// All four collections are ordered newest first. This is the "pure" domain
/// model; the persisted shape lives in the infrastructure DTOs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier, immutable after creation
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// What the user is trying to come up with ideas for
    pub goal: String,
    /// Strategy used for the next idea generation
    pub current_mode: BrainstormMode,
    pub ideas: Vec<Idea>,
    pub prds: Vec<RequirementDoc>,
    pub web_prds: Vec<WebDoc>,
    pub raw_requirements: Vec<RawLogEntry>,
    /// Creation time in epoch milliseconds
    pub created_at: i64,
    /// Reserved soft-delete flag. No workflow reads or writes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl Session {
    /// Creates an empty session with a fresh id.
    pub fn new(title: impl Into<String>, goal: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            goal: goal.into(),
            current_mode: BrainstormMode::Free,
            ideas: Vec::new(),
            prds: Vec::new(),
            web_prds: Vec::new(),
            raw_requirements: Vec::new(),
            created_at,
            is_archived: Some(false),
        }
    }

    /// The workspace synthesized when storage holds no sessions.
    pub fn default_workspace(created_at: i64) -> Self {
        Self::new(DEFAULT_SESSION_TITLE, DEFAULT_SESSION_GOAL, created_at)
    }

    pub fn find_idea(&self, idea_id: &str) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == idea_id)
    }

    pub fn find_prd(&self, prd_id: &str) -> Option<&RequirementDoc> {
        self.prds.iter().find(|p| p.id == prd_id)
    }

    pub fn find_web_prd(&self, web_prd_id: &str) -> Option<&WebDoc> {
        self.web_prds.iter().find(|w| w.id == web_prd_id)
    }

    /// Web documents derived from the given requirement document.
    pub fn web_docs_for<'a>(&'a self, prd_id: &'a str) -> impl Iterator<Item = &'a WebDoc> + 'a {
        self.web_prds.iter().filter(move |w| w.prd_id == prd_id)
    }

    // ============================================================================
    // Snapshot transforms (used through SessionStore::update_current)
    // ============================================================================

    /// Puts `ideas` in front of the existing ones, keeping their order.
    pub fn with_ideas_prepended(mut self, ideas: Vec<Idea>) -> Self {
        let mut merged = ideas;
        merged.append(&mut self.ideas);
        self.ideas = merged;
        self
    }

    pub fn with_prd_prepended(mut self, prd: RequirementDoc) -> Self {
        self.prds.insert(0, prd);
        self
    }

    pub fn with_web_prd_prepended(mut self, web_prd: WebDoc) -> Self {
        self.web_prds.insert(0, web_prd);
        self
    }

    pub fn with_raw_requirement(mut self, entry: RawLogEntry) -> Self {
        self.raw_requirements.insert(0, entry);
        self
    }

    pub fn with_mode(mut self, mode: BrainstormMode) -> Self {
        self.current_mode = mode;
        self
    }

    /// Flips `is_favorite` on the matching idea; unknown ids leave the session unchanged.
    pub fn with_favorite_toggled(mut self, idea_id: &str) -> Self {
        if let Some(idea) = self.ideas.iter_mut().find(|i| i.id == idea_id) {
            idea.is_favorite = !idea.is_favorite;
        }
        self
    }
}
