//! Secret service.
//!
//! Reads API keys from `secret.json`. The `GEMINI_API_KEY` environment
//! variable takes precedence over the file.

use crate::storage::write_atomic;
use anyhow::{Context, Result};
use ideaspark_core::config::{GeminiConfig, SecretConfig};
use std::path::PathBuf;

/// Environment variable that overrides the stored Gemini key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
}

impl SecretServiceImpl {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration, applying the environment override.
    ///
    /// A missing file yields an empty configuration.
    pub fn load_secrets(&self) -> Result<SecretConfig> {
        let mut secrets = self.load_file()?;
        if let Some(key) = std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
        {
            let model_name = secrets.gemini.and_then(|g| g.model_name);
            secrets.gemini = Some(GeminiConfig {
                api_key: key,
                model_name,
            });
        }
        Ok(secrets)
    }

    /// Returns the Gemini configuration, or an error telling where to put the key.
    pub fn gemini(&self) -> Result<GeminiConfig> {
        self.load_secrets()?
            .gemini
            .filter(|g| !g.api_key.trim().is_empty())
            .with_context(|| {
                format!(
                    "Gemini API key not configured. Set {} or add it to {}",
                    GEMINI_API_KEY_ENV,
                    self.path.display()
                )
            })
    }

    /// Writes a template `secret.json` if none exists.
    ///
    /// # Security Note
    ///
    /// On Unix the file is restricted to mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        if self.path.exists() {
            return Ok(self.path.clone());
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let json = serde_json::to_string_pretty(&template)?;
        write_atomic(&self.path, json.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(self.path.clone())
    }

    fn load_file(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            return Ok(SecretConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid secrets file {}", self.path.display()))
    }
}
