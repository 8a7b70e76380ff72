//! Tunable rule constants.

use serde::{Deserialize, Serialize};

use crate::movegen::DEFAULT_MAGE_RADIUS;

/// Rule constants for a match. The defaults are the standard game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Actions a player takes before the turn passes
    pub moves_per_turn: u8,
    /// Starting hit points of each castle
    pub castle_hp: i32,
    /// Move-history entries kept (oldest dropped first)
    pub history_limit: usize,
    /// Manhattan radius of the mage's area attack
    pub mage_radius: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            moves_per_turn: 3,
            castle_hp: 100,
            history_limit: 50,
            mage_radius: DEFAULT_MAGE_RADIUS,
        }
    }
}

impl RulesConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let rules = RulesConfig::from_toml_str("mage_radius = 2\n").unwrap();
        assert_eq!(rules.mage_radius, 2);
        assert_eq!(rules.moves_per_turn, 3);
        assert_eq!(rules.castle_hp, 100);
        assert_eq!(rules.history_limit, 50);
    }
}
