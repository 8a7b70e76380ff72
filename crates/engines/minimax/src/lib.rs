//! Minimax Policy
//!
//! Alpha-beta search over quiet board copies with a material, castle and
//! mobility evaluation. The stronger of the built-in opponents.

mod eval;
mod search;

use castle_core::{Board, Player, SearchResult, Strategy};
use tracing::debug;

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 3;

/// Opponent policy using minimax with alpha-beta pruning.
///
/// This policy uses:
/// - Minimax search with alpha-beta pruning
/// - Unit value, castle health, king centralisation and mobility evaluation
/// - A large bonus for decided positions so forced wins are preferred
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    depth: u8,
    /// Node counter for statistics
    nodes: u64,
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            nodes: 0,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Strategy for MinimaxEngine {
    fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        self.nodes = 0;
        let result = search::pick_best_action(board, player, self.depth, &mut self.nodes);
        debug!(?result, depth = self.depth, nodes = self.nodes, "minimax search done");

        SearchResult {
            best_action: result.map(|(a, _)| a),
            score: result.map(|(_, s)| s).unwrap_or(0.0),
            depth: self.depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

// Re-export for direct use if needed
pub use eval::{evaluate, piece_value, unit_value, DECIDED_SCORE};
pub use search::pick_best_action;
