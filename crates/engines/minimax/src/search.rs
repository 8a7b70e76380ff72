//! Minimax search with alpha-beta pruning
//!
//! Every node acts for the board's current player, so one three-action turn is
//! three consecutive plies of the same side. Nodes where the searching player
//! acts maximize, the others minimize.

use castle_core::{Action, Board, Player};

use crate::eval::evaluate;

/// Per remaining ply bonus for a decided position, so quicker wins (and
/// slower losses) are preferred.
const TEMPO_BONUS: f64 = 1_000.0;

/// Searches `board` for `ai` and returns the best action with its score.
///
/// # Arguments
/// * `board` - The position to search; never mutated
/// * `ai` - The side to choose for
/// * `depth` - Maximum search depth in plies
/// * `nodes` - Counter for nodes searched (for statistics)
///
/// # Returns
/// The best action and its score, or `None` when `ai` has no legal action
pub fn pick_best_action(
    board: &Board,
    ai: Player,
    depth: u8,
    nodes: &mut u64,
) -> Option<(Action, f64)> {
    let root = board.search_clone_for(ai);
    let actions = root.legal_actions(ai);
    if actions.is_empty() {
        return None;
    }

    let mut best = actions[0];
    let mut best_score = f64::NEG_INFINITY;
    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;

    for action in actions {
        let mut child = root.clone();
        if child.apply_action(action).is_err() {
            continue;
        }
        *nodes += 1;

        let score = minimax(&child, depth.saturating_sub(1), alpha, beta, ai, nodes);

        if score > best_score {
            best_score = score;
            best = action;
        }
        if best_score > alpha {
            alpha = best_score;
        }
    }

    Some((best, best_score))
}

/// Recursive minimax with alpha-beta pruning over cloned boards.
fn minimax(board: &Board, depth: u8, mut alpha: f64, mut beta: f64, ai: Player, nodes: &mut u64) -> f64 {
    if board.is_terminal() {
        let tempo = TEMPO_BONUS * depth as f64;
        return match board.winner() {
            Some(w) if w == ai => evaluate(board, ai) + tempo,
            Some(_) => evaluate(board, ai) - tempo,
            None => evaluate(board, ai),
        };
    }
    if depth == 0 {
        return evaluate(board, ai);
    }

    let side = board.current_player();
    let actions = board.legal_actions(side);
    if actions.is_empty() {
        return evaluate(board, ai);
    }

    let maximizing = side == ai;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for action in actions {
        let mut child = board.clone();
        if child.apply_action(action).is_err() {
            continue;
        }
        *nodes += 1;

        let score = minimax(&child, depth - 1, alpha, beta, ai, nodes);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break; // Cutoff
        }
    }

    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
