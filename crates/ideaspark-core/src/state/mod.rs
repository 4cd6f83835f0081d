//! Application-level state that persists across restarts.

pub mod model;
pub mod repository;

pub use model::AppState;
pub use repository::StateRepository;
