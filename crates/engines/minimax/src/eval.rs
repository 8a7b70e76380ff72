//! Material, castle and mobility evaluation

use castle_core::{Board, Player, Unit, UnitKind};

/// Bonus for a decided position, added toward the winner.
pub const DECIDED_SCORE: f64 = 100_000.0;

const CENTER: (f64, f64) = (3.5, 3.5);

/// Evaluates the board from `ai`'s perspective.
///
/// Positive = good for `ai`. Terms:
/// - unit value (base + 0.5 hp + 0.3 attack), own minus enemy
/// - 0.1 x castle hit-point difference
/// - minus 0.5 x own king's distance to the board centre
/// - 0.2 x number of legal actions available to `ai`
/// - plus or minus [`DECIDED_SCORE`] once the match is decided
pub fn evaluate(board: &Board, ai: Player) -> f64 {
    let grid = board.grid();
    let mut score = 0.0;

    for (_, unit) in grid.units() {
        let v = unit_value(unit);
        score += if unit.owner == ai { v } else { -v };
    }

    score += 0.1 * (board.castle_hp(ai) - board.castle_hp(ai.other())) as f64;

    if let Some(king) = grid.find_king(ai) {
        let dx = king.x as f64 - CENTER.0;
        let dy = king.y as f64 - CENTER.1;
        score -= 0.5 * (dx * dx + dy * dy).sqrt();
    }

    score += 0.2 * board.legal_actions(ai).len() as f64;

    match board.winner() {
        Some(w) if w == ai => score + DECIDED_SCORE,
        Some(_) => score - DECIDED_SCORE,
        None => score,
    }
}

/// Worth of one unit: kind base plus weighted health and attack.
#[inline]
pub fn unit_value(unit: &Unit) -> f64 {
    piece_value(unit.kind) + 0.5 * unit.hp as f64 + 0.3 * unit.attack as f64
}

/// Base value of a unit kind.
#[inline]
pub fn piece_value(kind: UnitKind) -> f64 {
    match kind {
        UnitKind::King => 1000.0,
        UnitKind::Pawn => 10.0,
        UnitKind::Knight => 30.0,
        UnitKind::Archer => 25.0,
        UnitKind::Cannon => 35.0,
        UnitKind::Mage => 20.0,
    }
}
