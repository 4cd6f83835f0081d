//! Configuration service.
//!
//! Loads `config.toml`, writing a default file on first use so the
//! available settings are discoverable.

use crate::storage::write_atomic;
use anyhow::{Context, Result};
use ideaspark_core::config::RootConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, loading it on first access.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but is not valid TOML, or if the default
    /// file cannot be written.
    pub fn get_config(&self) -> Result<RootConfig> {
        if let Some(cached) = self.config.read().ok().and_then(|c| c.clone()) {
            return Ok(cached);
        }

        let loaded = self.load_or_create()?;
        if let Ok(mut cache) = self.config.write() {
            *cache = Some(loaded.clone());
        }
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.config.write() {
            *cache = None;
        }
    }

    fn load_or_create(&self) -> Result<RootConfig> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read {}", self.path.display()))?;
            let config = toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", self.path.display()))?;
            return Ok(config);
        }

        let config = RootConfig::default();
        let content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;
        write_atomic(&self.path, content.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!("[ConfigService] Created default config: {}", self.path.display());
        Ok(config)
    }
}
