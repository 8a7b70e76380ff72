//! Pre-battle unit placement: a point budget spent on units in the human
//! player's home rows.

use castle_core::{castle_pos, placement_cost, Player, Pos, UnitKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Rows the placing player may fill.
pub const PLACEMENT_ROWS: [i8; 2] = [6, 7];

/// Where the human king is put for free.
pub const KING_START: Pos = Pos::new(3, 7);

/// Points available at a given progression level.
pub fn placement_budget(level: u32) -> u32 {
    5 + 2 * level
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no placement phase is running")]
    NotInPlacement,

    #[error("{kind} is not unlocked")]
    Locked { kind: UnitKind },

    #[error("{kind} costs {cost} points but only {remaining} are left")]
    InsufficientPoints {
        kind: UnitKind,
        cost: u32,
        remaining: u32,
    },

    #[error("select a unit kind before placing")]
    NoKindSelected,

    #[error("{pos} is outside the placement zone")]
    OutsideZone { pos: Pos },

    #[error("{pos} is already occupied")]
    Occupied { pos: Pos },
}

/// Cost and availability of one kind in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub cost: u32,
    pub unlocked: bool,
}

/// The units a player may buy, as reported by the inventory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCatalog {
    entries: BTreeMap<UnitKind, CatalogEntry>,
}

impl Default for PlacementCatalog {
    /// Every non-king kind unlocked at its default cost. The king is never
    /// bought; it is placed for free.
    fn default() -> Self {
        let entries = UnitKind::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    CatalogEntry {
                        cost: placement_cost(kind),
                        unlocked: kind != UnitKind::King,
                    },
                )
            })
            .collect();
        Self { entries }
    }
}

impl PlacementCatalog {
    pub fn set(&mut self, kind: UnitKind, cost: u32, unlocked: bool) -> &mut Self {
        self.entries.insert(kind, CatalogEntry { cost, unlocked });
        self
    }

    pub fn entry(&self, kind: UnitKind) -> Option<CatalogEntry> {
        self.entries.get(&kind).copied()
    }

    pub fn cost(&self, kind: UnitKind) -> u32 {
        self.entry(kind).map_or_else(|| placement_cost(kind), |e| e.cost)
    }

    pub fn is_unlocked(&self, kind: UnitKind) -> bool {
        self.entry(kind).is_some_and(|e| e.unlocked)
    }
}

/// Running state of a placement phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementState {
    pub player: Player,
    pub budget: u32,
    pub remaining: u32,
    pub selected: Option<UnitKind>,
    pub catalog: PlacementCatalog,
}

impl PlacementState {
    pub fn new(player: Player, level: u32, catalog: PlacementCatalog) -> Self {
        let budget = placement_budget(level);
        Self {
            player,
            budget,
            remaining: budget,
            selected: None,
            catalog,
        }
    }

    /// Validates and records a kind selection. Nothing is deducted here.
    pub fn select(&mut self, kind: UnitKind) -> Result<(), PlacementError> {
        if !self.catalog.is_unlocked(kind) {
            return Err(PlacementError::Locked { kind });
        }
        self.check_affordable(kind)?;
        self.selected = Some(kind);
        Ok(())
    }

    pub fn check_affordable(&self, kind: UnitKind) -> Result<u32, PlacementError> {
        let cost = self.catalog.cost(kind);
        if cost > self.remaining {
            return Err(PlacementError::InsufficientPoints {
                kind,
                cost,
                remaining: self.remaining,
            });
        }
        Ok(cost)
    }

    /// True for cells in the placing player's home rows, minus the castle.
    pub fn in_zone(&self, pos: Pos) -> bool {
        let rows = match self.player {
            Player::One => PLACEMENT_ROWS,
            Player::Two => PLACEMENT_ROWS.map(|y| 7 - y),
        };
        pos.is_valid() && rows.contains(&pos.y) && pos != castle_pos(self.player)
    }
}
