//! Session domain module.
//!
//! This module contains all session-related domain models, the repository
//! interface, and the session store.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `idea`: Generated ideas (`Idea`, `Priority`)
//! - `document`: Requirement and web documents (`RequirementDoc`, `WebDoc`)
//! - `raw_log`: Prompt audit trail (`RawLogEntry`, `RawRequirementKind`)
//! - `mode`: Brainstorming strategies (`BrainstormMode`)
//! - `repository`: Repository trait for session persistence
//! - `store`: Ordered session list with the active-session pointer (`SessionStore`)

mod document;
mod idea;
mod mode;
mod model;
mod raw_log;
mod repository;
mod store;

// Re-export public API
pub use document::{
    DIRECT_IDEA_ID, PRD_TITLE_MAX_CHARS, PRD_TITLE_PREFIX, RequirementDoc, WEB_DOC_TITLE_PREFIX,
    WebDoc, derive_title,
};
pub use idea::{AI_AUTHOR_ID, AI_AUTHOR_NAME, Idea, Priority};
pub use mode::BrainstormMode;
pub use model::{DEFAULT_SESSION_GOAL, DEFAULT_SESSION_TITLE, Session};
pub use raw_log::{RawLogEntry, RawRequirementKind};
pub use repository::SessionRepository;
pub use store::SessionStore;
