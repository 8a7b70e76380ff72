pub mod board;
pub mod combat;
pub mod error;
pub mod events;
pub mod grid;
pub mod history;
pub mod level;
pub mod movegen;
pub mod rules;
pub mod types;
pub mod unit;

// Re-export core game logic (not strategy-specific)
pub use board::*;
pub use combat::{attack_target, damage, splash_cells, Casualty, EndCause, MatchOutcome, StrikeReport};
pub use error::*;
pub use events::GameEvent;
pub use grid::Grid;
pub use history::{HistoryEntry, MoveHistory};
pub use level::{LevelDefinition, PieceSpec};
pub use movegen::*;
pub use rules::RulesConfig;
pub use types::*;
pub use unit::*;

// =============================================================================
// Strategy trait: implemented by every automated opponent
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen action (None if the side has no legal action)
    pub best_action: Option<Action>,
    /// Evaluation from the searching player's perspective
    pub score: f64,
    /// Search depth reached (1 for single-ply policies)
    pub depth: u8,
    /// Number of positions examined
    pub nodes: u64,
}

impl SearchResult {
    pub fn none() -> Self {
        Self {
            best_action: None,
            score: 0.0,
            depth: 0,
            nodes: 0,
        }
    }
}

/// Trait that all opponent policies must implement.
///
/// This allows swapping between the greedy heuristic, the minimax search and
/// the random baseline on either side of a match.
pub trait Strategy: Send {
    /// Pick an action for `player` on the given board.
    ///
    /// # Arguments
    /// * `board` - The live board; implementations must only read it or
    ///   work on [`Board::search_clone`] copies
    /// * `player` - The side to choose for
    ///
    /// # Returns
    /// SearchResult containing the chosen action and statistics
    fn search(&mut self, board: &Board, player: Player) -> SearchResult;

    /// Convenience wrapper returning only the action.
    fn compute_best_move(&mut self, board: &Board, player: Player) -> Option<Action> {
        self.search(board, player).best_action
    }

    /// Returns the policy's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
