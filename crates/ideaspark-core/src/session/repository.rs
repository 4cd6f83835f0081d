//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisting the session list.
///
/// The list is always read and written as a whole: every save is a full
/// snapshot overwrite, there are no incremental writes.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Older persisted shapes (missing collections are repaired with empty
///   sequences on load)
/// - Atomic replacement of the stored snapshot
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads every stored session in stored order.
    ///
    /// # Returns
    ///
    /// - `Ok(vec![])`: Nothing stored yet
    /// - `Ok(sessions)`: Stored sessions, repaired where necessary
    /// - `Err(_)`: Storage exists but could not be read or parsed
    async fn load_all(&self) -> Result<Vec<Session>>;

    /// Replaces the stored snapshot with `sessions`.
    async fn save_all(&self, sessions: &[Session]) -> Result<()>;
}
