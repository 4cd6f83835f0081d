//! Path management for IdeaSpark data files.
//!
//! Everything lives under one home directory:
//!
//! ```text
//! ~/.config/ideaspark/          # or $IDEASPARK_HOME
//! ├── config.toml               # Application configuration
//! ├── secret.json               # API keys
//! ├── sessions.json             # Every session, in order
//! ├── app_state.json            # Login flag and active session
//! └── logs/
//!     └── ideaspark.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

/// Environment variable that overrides the home directory.
pub const HOME_ENV: &str = "IDEASPARK_HOME";

const APP_DIR_NAME: &str = "ideaspark";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither `IDEASPARK_HOME` nor a platform config directory is available.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaSparkPaths {
    home: PathBuf,
}

impl IdeaSparkPaths {
    /// Resolves the home directory from `IDEASPARK_HOME`, falling back to
    /// `<platform config dir>/ideaspark`.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(home));
        }
        dirs::config_dir()
            .map(|dir| Self::at(dir.join(APP_DIR_NAME)))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Uses `home` as the home directory. Nothing is created.
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// # Security Note
    ///
    /// Holds API keys; created with mode 600 on Unix.
    pub fn secret_file(&self) -> PathBuf {
        self.home.join("secret.json")
    }

    pub fn sessions_file(&self) -> PathBuf {
        self.home.join("sessions.json")
    }

    pub fn app_state_file(&self) -> PathBuf {
        self.home.join("app_state.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home.join("logs")
    }
}
