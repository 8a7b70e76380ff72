//! Random Action Policy
//!
//! Picks uniformly among all legal actions of the acting side.
//! Useful for:
//! - Smoke testing the match loop and arena
//! - Baseline comparisons (any real policy should easily beat this)
//! - Stress testing move generation

use castle_core::{Board, Player, SearchResult, Strategy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};
use tracing::trace;


/// A policy that plays random legal actions.
///
/// Without a seed it draws from the thread RNG; with one, a match replays
/// identically.
#[derive(Debug, Clone, Default)]
pub struct RandomEngine {
    rng: Option<StdRng>,
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self { rng: None, nodes: 0 }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
            nodes: 0,
        }
    }
}

impl Strategy for RandomEngine {
    fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        let actions = board.legal_actions(player);
        self.nodes = 1;

        let best_action = match self.rng.as_mut() {
            Some(rng) => actions.choose(rng).copied(),
            None => actions.choose(&mut thread_rng()).copied(),
        };
        trace!(candidates = actions.len(), ?best_action, "random pick");

        SearchResult {
            best_action,
            score: 0.0,
            depth: 1,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
