//! Domain layer of IdeaSpark.
//!
//! Holds the session model, the session store, the single-flight guard and
//! the traits the outer layers implement (`SessionRepository`,
//! `StateRepository`, `GenerationGateway`, `Clock`).

pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod generation;
pub mod session;
pub mod state;
pub mod view;

pub use error::{IdeaSparkError, Result};
