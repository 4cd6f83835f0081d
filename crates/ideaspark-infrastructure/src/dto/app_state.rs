//! AppState DTO.

use ideaspark_core::state::AppState;
use serde::{Deserialize, Serialize};

/// Application state V1.0 as stored in `app_state.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStateV1_0 {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_session_id: Option<String>,
}

impl From<AppStateV1_0> for AppState {
    fn from(dto: AppStateV1_0) -> Self {
        AppState {
            authenticated: dto.authenticated,
            active_session_id: dto.active_session_id,
        }
    }
}

impl From<AppState> for AppStateV1_0 {
    fn from(state: AppState) -> Self {
        AppStateV1_0 {
            authenticated: state.authenticated,
            active_session_id: state.active_session_id,
        }
    }
}
