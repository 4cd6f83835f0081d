//! Infrastructure layer for IdeaSpark.
//!
//! File-backed implementations of the core repository traits, configuration
//! and secret loading, and tracing setup.

pub mod config_service;
pub mod dto;
pub mod logging;
pub mod paths;
pub mod secret_service;
pub mod session_repository;
pub mod state_repository;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::{IdeaSparkPaths, PathError};
pub use secret_service::SecretServiceImpl;
pub use session_repository::JsonSessionRepository;
pub use state_repository::StateRepositoryImpl;
