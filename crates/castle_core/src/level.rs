//! Level definitions: the initial layout handed in by the level-data service.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

use crate::error::LevelError;
use crate::types::*;
use crate::unit::Unit;

/// A level as delivered by the level-data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub initial_pieces: Vec<PieceSpec>,
}

/// One raw placement entry. Fields stay loosely typed so malformed entries
/// can be skipped individually instead of failing the whole level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub owner: i64,
    pub x: i64,
    pub y: i64,
}

impl PieceSpec {
    pub fn new(kind: &str, owner: i64, x: i64, y: i64) -> Self {
        Self {
            kind: kind.to_string(),
            owner,
            x,
            y,
        }
    }
}

impl LevelDefinition {
    pub fn from_json(s: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml(s: &str) -> Result<Self, LevelError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads a level file, choosing the format from the extension
    /// (`.toml`, anything else is treated as JSON).
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    /// Validated units of this level, in file order.
    ///
    /// Entries with an unknown kind, an owner other than 1/2, an off-board
    /// cell or a cell already used by an earlier entry are skipped with a
    /// warning.
    pub fn units(&self) -> Vec<(Pos, Unit)> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(self.initial_pieces.len());
        for (i, spec) in self.initial_pieces.iter().enumerate() {
            let kind = match UnitKind::from_name(&spec.kind) {
                Some(k) => k,
                None => {
                    warn!(level = self.id, entry = i, kind = %spec.kind, "unknown unit kind, skipping");
                    continue;
                }
            };
            let owner = match u8::try_from(spec.owner).ok().and_then(Player::from_id) {
                Some(p) => p,
                None => {
                    warn!(level = self.id, entry = i, owner = spec.owner, "invalid owner, skipping");
                    continue;
                }
            };
            let pos = match (i8::try_from(spec.x), i8::try_from(spec.y)) {
                (Ok(x), Ok(y)) if Pos::new(x, y).is_valid() => Pos::new(x, y),
                _ => {
                    warn!(level = self.id, entry = i, x = spec.x, y = spec.y, "cell off the board, skipping");
                    continue;
                }
            };
            if !seen.insert(pos) {
                warn!(level = self.id, entry = i, %pos, "cell already occupied, skipping");
                continue;
            }
            out.push((pos, Unit::new(kind, owner)));
        }
        out
    }
}
