//! Per-kind movement and attack geometry.
//!
//! Both queries are pure functions of the grid and the acting unit's cell.
//! Result order is deterministic (fixed direction tables, scanned outwards),
//! which the greedy policy relies on for stable tie-breaking.

use crate::grid::Grid;
use crate::types::*;

/// Default Manhattan radius of the mage's area attack.
pub const DEFAULT_MAGE_RADIUS: u8 = 3;

/// Reach of cannon lines and archer shots.
const LINE_RANGE: i8 = 3;

const STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const ARROW_LINES: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Cells the unit at `from` may move to (empty or enemy-occupied).
/// Returns an empty list when `from` holds no unit.
pub fn possible_moves(grid: &Grid, from: Pos) -> Vec<Pos> {
    let mut out = Vec::with_capacity(16);
    possible_moves_into(grid, from, &mut out);
    out
}

/// Generate moves into the provided buffer, reusing it across calls.
pub fn possible_moves_into(grid: &Grid, from: Pos, out: &mut Vec<Pos>) {
    out.clear();
    let unit = match grid.get(from) {
        Some(u) => u,
        None => return,
    };
    match unit.kind {
        UnitKind::King | UnitKind::Pawn | UnitKind::Archer | UnitKind::Mage => {
            gen_offsets(grid, from, unit.owner, &STEPS, out)
        }
        UnitKind::Knight => gen_offsets(grid, from, unit.owner, &KNIGHT_JUMPS, out),
        UnitKind::Cannon => gen_cannon(grid, from, unit.owner, out),
    }
}

/// Cells the unit at `from` may strike, using the default mage radius.
pub fn possible_attacks(grid: &Grid, from: Pos) -> Vec<Pos> {
    possible_attacks_with_radius(grid, from, DEFAULT_MAGE_RADIUS)
}

pub fn possible_attacks_with_radius(grid: &Grid, from: Pos, mage_radius: u8) -> Vec<Pos> {
    let unit = match grid.get(from) {
        Some(u) => u,
        None => return Vec::new(),
    };
    let owner = unit.owner;
    match unit.kind {
        UnitKind::King | UnitKind::Pawn | UnitKind::Knight | UnitKind::Cannon => {
            let mut moves = possible_moves(grid, from);
            moves.retain(|&to| grid.is_hostile(to, owner));
            moves
        }
        UnitKind::Archer => gen_arrows(grid, from, owner),
        UnitKind::Mage => gen_area(from, mage_radius),
    }
}

fn gen_offsets(grid: &Grid, from: Pos, owner: Player, offsets: &[(i8, i8)], out: &mut Vec<Pos>) {
    for &(dx, dy) in offsets {
        if let Some(to) = from.offset(dx, dy) {
            if grid.owner_at(to) != Some(owner) {
                out.push(to);
            }
        }
    }
}

fn gen_cannon(grid: &Grid, from: Pos, owner: Player, out: &mut Vec<Pos>) {
    for (dx, dy) in ORTHOGONAL {
        for i in 1..=LINE_RANGE {
            let to = match from.offset(dx * i, dy * i) {
                Some(p) => p,
                None => break,
            };
            match grid.owner_at(to) {
                Some(o) if o == owner => break,
                Some(_) => {
                    // Enemy: the line ends on it.
                    out.push(to);
                    break;
                }
                None => out.push(to),
            }
        }
    }
}

fn gen_arrows(grid: &Grid, from: Pos, owner: Player) -> Vec<Pos> {
    let enemy_castle = castle_pos(owner.other());
    let mut out = Vec::new();
    for (dx, dy) in ARROW_LINES {
        for i in 1..=LINE_RANGE {
            let to = match from.offset(dx * i, dy * i) {
                Some(p) => p,
                None => break,
            };
            match grid.owner_at(to) {
                Some(o) => {
                    if o != owner {
                        out.push(to);
                    }
                    break;
                }
                None if to == enemy_castle => {
                    out.push(to);
                    break;
                }
                None => {}
            }
        }
    }
    out
}

fn gen_area(from: Pos, radius: u8) -> Vec<Pos> {
    // Distances stay in i32 so any configured radius is safe; large radii
    // simply cover the whole board.
    let radius = radius as i32;
    Pos::all()
        .filter(|&to| to != from && from.manhattan(to) <= radius)
        .collect()
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
