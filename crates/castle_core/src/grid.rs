use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::unit::Unit;

const CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// The 8x8 array of unit slots. Each cell holds at most one unit.
///
/// Cloning copies every unit by value, so a cloned grid never aliases the
/// original.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<Option<Unit>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    pub fn empty() -> Self {
        Self {
            cells: vec![None; CELLS],
        }
    }

    pub fn get(&self, pos: Pos) -> Option<&Unit> {
        if !pos.is_valid() {
            return None;
        }
        self.cells[pos.index()].as_ref()
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Unit> {
        if !pos.is_valid() {
            return None;
        }
        self.cells[pos.index()].as_mut()
    }

    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// Overwrites a cell. Off-board positions are ignored.
    pub fn set(&mut self, pos: Pos, unit: Option<Unit>) {
        if pos.is_valid() {
            self.cells[pos.index()] = unit;
        }
    }

    pub fn take(&mut self, pos: Pos) -> Option<Unit> {
        if !pos.is_valid() {
            return None;
        }
        self.cells[pos.index()].take()
    }

    /// Owner of the unit at `pos`, if any.
    pub fn owner_at(&self, pos: Pos) -> Option<Player> {
        self.get(pos).map(|u| u.owner)
    }

    /// True when `pos` holds a unit belonging to the opponent of `owner`.
    pub fn is_enemy(&self, pos: Pos, owner: Player) -> bool {
        self.owner_at(pos).is_some_and(|o| o != owner)
    }

    /// True when `pos` is something `owner` may strike: an enemy unit, or the
    /// empty castle cell of the opponent.
    pub fn is_hostile(&self, pos: Pos, owner: Player) -> bool {
        match self.owner_at(pos) {
            Some(o) => o != owner,
            None => pos == castle_pos(owner.other()),
        }
    }

    /// Units in row-major order.
    pub fn units(&self) -> impl Iterator<Item = (Pos, &Unit)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|u| (Pos::from_index(i), u)))
    }

    pub fn units_of(&self, owner: Player) -> impl Iterator<Item = (Pos, &Unit)> + '_ {
        self.units().filter(move |(_, u)| u.owner == owner)
    }

    pub fn find_king(&self, owner: Player) -> Option<Pos> {
        self.units_of(owner)
            .find(|(_, u)| u.kind == UnitKind::King)
            .map(|(p, _)| p)
    }

    pub fn unit_count(&self, owner: Player) -> usize {
        self.units_of(owner).count()
    }
}
