//! Match settings, loadable from TOML.

use castle_core::{RulesConfig, Strategy};
use heuristic_engine::HeuristicEngine;
use minimax_engine::MinimaxEngine;
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors while reading a match configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid match config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read match config: {0}")]
    Io(#[from] std::io::Error),
}

/// Which built-in policy drives an automated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Heuristic,
    Minimax,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Heuristic,
        StrategyKind::Minimax,
        StrategyKind::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Heuristic => "heuristic",
            StrategyKind::Minimax => "minimax",
            StrategyKind::Random => "random",
        }
    }

    /// Instantiates the policy. `depth` only matters for minimax, `seed`
    /// only for random.
    pub fn build(self, depth: u8, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Heuristic => Box::new(HeuristicEngine::new()),
            StrategyKind::Minimax => Box::new(MinimaxEngine::with_depth(depth)),
            StrategyKind::Random => match seed {
                Some(s) => Box::new(RandomEngine::with_seed(s)),
                None => Box::new(RandomEngine::new()),
            },
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "greedy" => Ok(StrategyKind::Heuristic),
            "minimax" | "search" | "alphabeta" => Ok(StrategyKind::Minimax),
            "random" | "rand" => Ok(StrategyKind::Random),
            other => Err(format!(
                "unknown strategy '{other}' (expected heuristic, minimax or random)"
            )),
        }
    }
}

/// Settings of one match controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Whether player 2 is driven by a policy
    pub against_ai: bool,
    /// Policy bound to the automated side
    pub strategy: StrategyKind,
    /// Minimax depth in plies
    pub search_depth: u8,
    /// Delay before each automated action (0 disables pacing)
    pub pacing_ms: u64,
    /// Whether loading a level starts the placement phase
    pub placement_enabled: bool,
    /// Progression level of the human player; sets the placement budget
    pub player_level: u32,
    /// Seed for the random policy
    pub seed: Option<u64>,
    pub rules: RulesConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            against_ai: true,
            strategy: StrategyKind::Heuristic,
            search_depth: minimax_engine::DEFAULT_DEPTH,
            pacing_ms: 1000,
            placement_enabled: false,
            player_level: 1,
            seed: None,
            rules: RulesConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Builds the configured policy.
    pub fn build_strategy(&self) -> Box<dyn Strategy> {
        self.strategy.build(self.search_depth, self.seed)
    }
}
