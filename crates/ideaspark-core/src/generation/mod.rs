//! Generation domain module.
//!
//! - `gateway`: the remote generation contract (`GenerationGateway`)
//! - `flight`: the single-flight state machine (`FlightGuard`)

mod flight;
mod gateway;

pub use flight::{FlightGuard, FlightPermit, FlightState, GenerationKind};
pub use gateway::{GenerationGateway, IdeaDraft, IdeaRequest};

use serde::{Deserialize, Serialize};

/// Bounds of the per-request idea count.
pub const MIN_IDEA_COUNT: u32 = 1;
pub const MAX_IDEA_COUNT: u32 = 20;
pub const DEFAULT_IDEA_COUNT: u32 = 5;

/// Clamps a requested idea count into `MIN_IDEA_COUNT..=MAX_IDEA_COUNT`.
pub fn clamp_idea_count(count: u32) -> u32 {
    count.clamp(MIN_IDEA_COUNT, MAX_IDEA_COUNT)
}

/// Why a workflow invocation was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Another workflow is in flight.
    Busy,
    /// The composer input is empty or whitespace only.
    EmptyInput,
    /// The idea or document to work from is not in the current session.
    NotFound,
}

/// Result of one workflow invocation.
///
/// Rejections happen before anything is dispatched; failures happen after
/// the gateway was called. Neither is an error for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Records were created and folded into the session.
    Completed { created: usize },
    /// The gateway call failed or returned unusable data.
    Failed,
    Rejected(RejectReason),
}

impl GenerationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_idea_count() {
        assert_eq!(clamp_idea_count(0), 1);
        assert_eq!(clamp_idea_count(5), 5);
        assert_eq!(clamp_idea_count(99), 20);
    }
}
