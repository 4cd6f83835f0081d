//! Configuration models.
//!
//! `RootConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Every field has a default so partial files load.

use crate::generation::{DEFAULT_IDEA_COUNT, clamp_idea_count};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_IDEA_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_DOCUMENT_MODEL: &str = "gemini-3-pro-preview";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Minimum time a workflow stays busy after the gateway answered.
    pub min_busy_ms: u64,
    pub default_idea_count: u32,
    /// HTTP request timeout of gateway calls.
    pub request_timeout_secs: u64,
    pub idea_model: String,
    pub document_model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_busy_ms: 1500,
            default_idea_count: DEFAULT_IDEA_COUNT,
            request_timeout_secs: 120,
            idea_model: DEFAULT_IDEA_MODEL.to_string(),
            document_model: DEFAULT_DOCUMENT_MODEL.to_string(),
        }
    }
}

impl GenerationConfig {
    pub fn min_busy(&self) -> Duration {
        Duration::from_millis(self.min_busy_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn idea_count(&self) -> u32 {
        clamp_idea_count(self.default_idea_count)
    }
}

/// Local login credentials. This is a UI gate, not access control.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "123".to_string(),
            password: "123".to_string(),
        }
    }
}

impl AuthConfig {
    pub fn accepts(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Overrides the idea model when set.
    #[serde(default)]
    pub model_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RootConfig = toml::from_str("[generation]\nmin_busy_ms = 10\n").unwrap();
        assert_eq!(config.generation.min_busy(), Duration::from_millis(10));
        assert_eq!(config.generation.idea_model, DEFAULT_IDEA_MODEL);
        assert!(config.auth.accepts("123", "123"));
    }

    #[test]
    fn test_idea_count_is_clamped() {
        let config = GenerationConfig {
            default_idea_count: 0,
            ..Default::default()
        };
        assert_eq!(config.idea_count(), 1);
    }
}
