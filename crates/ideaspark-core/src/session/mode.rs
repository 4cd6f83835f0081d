//! Brainstorming strategies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The brainstorming strategy a session uses for future idea generations.
///
/// The mode only affects prompt construction; switching it never touches
/// ideas that were already generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrainstormMode {
    /// Unconstrained free association.
    #[default]
    Free,
    /// Substitute / Combine / Adapt / Modify / Put to other use / Eliminate / Reverse.
    Scamper,
    /// De Bono's six thinking hats.
    SixHats,
    /// Random stimulus collisions.
    Random,
    /// User scenario simulation.
    Scenario,
}

impl BrainstormMode {
    /// All modes in display order.
    pub const ALL: [BrainstormMode; 5] = [
        BrainstormMode::Free,
        BrainstormMode::Scamper,
        BrainstormMode::SixHats,
        BrainstormMode::Random,
        BrainstormMode::Scenario,
    ];

    /// Wire name, identical to the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrainstormMode::Free => "FREE",
            BrainstormMode::Scamper => "SCAMPER",
            BrainstormMode::SixHats => "SIX_HATS",
            BrainstormMode::Random => "RANDOM",
            BrainstormMode::Scenario => "SCENARIO",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BrainstormMode::Free => "Free",
            BrainstormMode::Scamper => "Restructure",
            BrainstormMode::SixHats => "Perspectives",
            BrainstormMode::Random => "Collision",
            BrainstormMode::Scenario => "Scenario",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BrainstormMode::Free => "No constraints",
            BrainstormMode::Scamper => "Substitute / combine",
            BrainstormMode::SixHats => "Six thinking hats",
            BrainstormMode::Random => "Random triggers",
            BrainstormMode::Scenario => "User simulation",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BrainstormMode::Free => "💡",
            BrainstormMode::Scamper => "🔄",
            BrainstormMode::SixHats => "🎩",
            BrainstormMode::Random => "🎲",
            BrainstormMode::Scenario => "🌍",
        }
    }
}

impl fmt::Display for BrainstormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrainstormMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "FREE" => Ok(BrainstormMode::Free),
            "SCAMPER" => Ok(BrainstormMode::Scamper),
            "SIX_HATS" | "SIXHATS" => Ok(BrainstormMode::SixHats),
            "RANDOM" => Ok(BrainstormMode::Random),
            "SCENARIO" => Ok(BrainstormMode::Scenario),
            _ => Err(format!(
                "Invalid brainstorm mode: '{}'. Expected one of FREE, SCAMPER, SIX_HATS, RANDOM, SCENARIO",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for mode in BrainstormMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("six-hats".parse::<BrainstormMode>().unwrap(), BrainstormMode::SixHats);
        assert_eq!(" scamper ".parse::<BrainstormMode>().unwrap(), BrainstormMode::Scamper);
        assert!("lateral".parse::<BrainstormMode>().is_err());
    }
}
