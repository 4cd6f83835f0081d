//! Single-flight state machine: `IDLE -> IN_FLIGHT(kind) -> IDLE`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationKind {
    Boost,
    Prd,
    WebPrd,
}

impl GenerationKind {
    fn to_raw(self) -> u8 {
        match self {
            GenerationKind::Boost => 1,
            GenerationKind::Prd => 2,
            GenerationKind::WebPrd => 3,
        }
    }

    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(GenerationKind::Boost),
            2 => Some(GenerationKind::Prd),
            3 => Some(GenerationKind::WebPrd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightState {
    Idle,
    InFlight(GenerationKind),
}

/// Lock-free guard allowing at most one generation at a time.
///
/// `try_begin` is a compare-and-set from IDLE; the returned permit moves the
/// guard back to IDLE when dropped, so every exit path releases it.
#[derive(Debug, Clone, Default)]
pub struct FlightGuard {
    state: Arc<AtomicU8>,
}

impl FlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves IDLE -> IN_FLIGHT(kind). Returns `None` if a flight is already running.
    pub fn try_begin(&self, kind: GenerationKind) -> Option<FlightPermit> {
        self.state
            .compare_exchange(IDLE, kind.to_raw(), Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightPermit {
                state: Arc::clone(&self.state),
                kind,
            })
    }

    pub fn state(&self) -> FlightState {
        match GenerationKind::from_raw(self.state.load(Ordering::Acquire)) {
            Some(kind) => FlightState::InFlight(kind),
            None => FlightState::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state() != FlightState::Idle
    }
}

/// Proof of an in-flight generation; dropping it ends the flight.
#[derive(Debug)]
pub struct FlightPermit {
    state: Arc<AtomicU8>,
    kind: GenerationKind,
}

impl FlightPermit {
    pub fn kind(&self) -> GenerationKind {
        self.kind
    }
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        self.state.store(IDLE, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected_until_release() {
        let guard = FlightGuard::new();
        let permit = guard.try_begin(GenerationKind::Boost).unwrap();

        assert_eq!(guard.state(), FlightState::InFlight(GenerationKind::Boost));
        assert!(guard.try_begin(GenerationKind::Prd).is_none());
        assert!(guard.try_begin(GenerationKind::Boost).is_none());

        drop(permit);
        assert_eq!(guard.state(), FlightState::Idle);
        let permit = guard.try_begin(GenerationKind::WebPrd).unwrap();
        assert_eq!(permit.kind(), GenerationKind::WebPrd);
    }

    #[test]
    fn test_clones_share_state() {
        let guard = FlightGuard::new();
        let clone = guard.clone();
        let _permit = guard.try_begin(GenerationKind::Prd).unwrap();
        assert!(clone.is_busy());
    }

    #[test]
    fn test_release_on_panic_unwind() {
        let guard = FlightGuard::new();
        let inner = guard.clone();
        let result = std::panic::catch_unwind(move || {
            let _permit = inner.try_begin(GenerationKind::Boost).unwrap();
            panic!("workflow blew up");
        });
        assert!(result.is_err());
        assert!(!guard.is_busy());
    }
}
