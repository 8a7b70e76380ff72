//! Damage formulas and strike resolution.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::*;
use crate::unit::Unit;

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndCause {
    KingSlain,
    CastleDestroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Player,
    pub cause: EndCause,
}

/// Damage the attacker deals to a unit at `target`.
///
/// Cannons lose power with Manhattan distance: 2x adjacent, 1.5x (floored) at
/// two cells, 1x beyond. Every other kind deals its flat attack.
pub fn damage(attacker: &Unit, from: Pos, target: Pos) -> i32 {
    match attacker.kind {
        UnitKind::Cannon => match from.manhattan(target) {
            0 => 0,
            1 => attacker.attack * 2,
            2 => attacker.attack * 3 / 2,
            _ => attacker.attack,
        },
        _ => attacker.attack,
    }
}

/// Cells hit by a mage blast centred on `target`: the target and its four
/// orthogonal neighbours that lie on the board.
pub fn splash_cells(target: Pos) -> Vec<Pos> {
    [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)]
        .into_iter()
        .filter_map(|(dx, dy)| target.offset(dx, dy))
        .collect()
}

/// A single unit removed by a strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Casualty {
    pub pos: Pos,
    pub unit: Unit,
}

/// Everything a resolved attack changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrikeReport {
    pub casualties: Vec<Casualty>,
    pub castle_damage: i32,
    pub ended: Option<MatchOutcome>,
}

/// Resolves an attack by the unit at `from` against `target`.
///
/// Does not check legality; callers validate against the attack set first.
/// Mages hit every cell of the cross pattern with flat damage; all other kinds
/// hit `target` only. The first terminal event wins the report.
pub fn attack_target(grid: &mut Grid, castle_hp: &mut [i32; 2], from: Pos, target: Pos) -> StrikeReport {
    let mut report = StrikeReport::default();
    let attacker = match grid.get(from) {
        Some(u) => *u,
        None => return report,
    };

    if attacker.kind == UnitKind::Mage {
        for cell in splash_cells(target) {
            strike(grid, castle_hp, &attacker, cell, attacker.attack, &mut report);
        }
    } else {
        let dmg = damage(&attacker, from, target);
        strike(grid, castle_hp, &attacker, target, dmg, &mut report);
    }
    report
}

fn strike(
    grid: &mut Grid,
    castle_hp: &mut [i32; 2],
    attacker: &Unit,
    cell: Pos,
    unit_damage: i32,
    report: &mut StrikeReport,
) {
    let enemy = attacker.owner.other();

    if grid.is_enemy(cell, attacker.owner) {
        let killed = match grid.get_mut(cell) {
            Some(defender) => {
                defender.hp -= unit_damage;
                !defender.is_alive()
            }
            None => false,
        };
        if killed {
            if let Some(unit) = grid.take(cell) {
                report.casualties.push(Casualty { pos: cell, unit });
                if unit.kind == UnitKind::King && report.ended.is_none() {
                    report.ended = Some(MatchOutcome {
                        winner: attacker.owner,
                        cause: EndCause::KingSlain,
                    });
                }
            }
        }
    } else if cell == castle_pos(enemy) {
        // Castles always take the flat attack value.
        castle_hp[enemy.idx()] -= attacker.attack;
        report.castle_damage += attacker.attack;
        if castle_hp[enemy.idx()] <= 0 && report.ended.is_none() {
            report.ended = Some(MatchOutcome {
                winner: attacker.owner,
                cause: EndCause::CastleDestroyed,
            });
        }
    }
}

#[cfg(test)]
#[path = "combat_tests.rs"]
mod combat_tests;
