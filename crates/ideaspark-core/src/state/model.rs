//! Application state domain models.
//!
//! Contains domain models for application-level state that persists across sessions.

use serde::{Deserialize, Serialize};

/// Application state that persists across restarts.
///
/// # Fields
///
/// * `authenticated` - Whether the user passed the login check.
/// * `active_session_id` - The ID of the session that was current when the
///   application last changed it. May point at a session that no longer
///   exists; the session store falls back to the first session in that case.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub authenticated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_session_id: Option<String>,
}

impl AppState {
    /// Creates a new AppState with default values.
    pub fn new() -> Self {
        Self::default()
    }
}
