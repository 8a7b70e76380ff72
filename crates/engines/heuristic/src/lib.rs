//! Greedy Heuristic Policy
//!
//! Looks one action ahead and never simulates replies. Strikes that end the
//! match, or at least hurt the enemy castle, are taken on sight; otherwise the
//! juiciest capture wins, and failing that the unit that can step closest to
//! the enemy castle advances.

use castle_core::{castle_pos, Action, Board, Player, SearchResult, Strategy, UnitKind};
use tracing::debug;


/// Base score of any attack on a unit; keeps every capture above every move.
const CAPTURE_BASE: f64 = 100.0;

/// Greedy single-ply policy.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEngine {
    nodes: u64,
}

impl HeuristicEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

/// Scores the legal actions of `player` and returns the best one.
///
/// Units are visited row-major with their strikes before their moves. An
/// attack on the enemy king or on the enemy castle cell (empty or defended) is
/// returned at once.
/// Captures score `100 + hp + attack` of the target; moves score the negated
/// Manhattan distance from the destination to the enemy castle. Ties keep the
/// first action found.
///
/// # Returns
/// The chosen action and its score, or `None` when `player` cannot act.
pub fn pick_greedy(board: &Board, player: Player, nodes: &mut u64) -> Option<(Action, f64)> {
    let grid = board.grid();
    let enemy_castle = castle_pos(player.other());
    let mut best: Option<(Action, f64)> = None;

    for action in board.legal_actions(player) {
        *nodes += 1;
        let score = match grid.get(action.to) {
            Some(target) if target.owner == player => continue,
            Some(target) if target.kind == UnitKind::King => {
                return Some((action, f64::INFINITY));
            }
            // Any strike on the castle cell, even through a defender standing on it.
            _ if action.to == enemy_castle => return Some((action, f64::INFINITY)),
            Some(target) => CAPTURE_BASE + target.hp as f64 + target.attack as f64,
            None => -(action.to.manhattan(enemy_castle) as f64),
        };
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((action, score));
        }
    }
    best
}

impl Strategy for HeuristicEngine {
    fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        self.nodes = 0;
        let result = pick_greedy(board, player, &mut self.nodes);
        debug!(?result, nodes = self.nodes, "greedy pick");

        SearchResult {
            best_action: result.map(|(a, _)| a),
            score: result.map(|(_, s)| s).unwrap_or(0.0),
            depth: 1,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Heuristic v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
