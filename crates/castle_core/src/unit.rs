//! Unit records and per-kind static data.
//!
//! Units are small `Copy` values owned by the grid. Nothing here knows about
//! the board; geometry lives in `movegen` and damage in `combat`.

use serde::{Deserialize, Serialize};

use crate::types::{Player, UnitKind};

/// One piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
    pub owner: Player,
    pub hp: i32,
    pub attack: i32,
    pub level: u32,
}

impl Unit {
    /// Fresh level-1 unit with the kind's base stats.
    pub fn new(kind: UnitKind, owner: Player) -> Self {
        let (hp, attack) = base_stats(kind);
        Self {
            kind,
            owner,
            hp,
            attack,
            level: 1,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Human-readable label used in the move history, e.g. "White Pawn".
    pub fn label(&self) -> String {
        format!("{} {}", self.owner.colour(), self.kind.label())
    }

    pub fn placement_cost(&self) -> u32 {
        placement_cost(self.kind)
    }

    /// Full description shown when the unit is selected.
    pub fn info(&self, mage_radius: u8) -> UnitInfo {
        let (movement_type, movement_range) = movement_profile(self.kind);
        let (attack_type, attack_range) = match self.kind {
            UnitKind::Mage => ("area blast in a cross", mage_radius as f32),
            kind => attack_profile(kind),
        };
        UnitInfo {
            name: self.kind.name().to_string(),
            owner: self.owner,
            stats: UnitStats {
                level: self.level,
                health: self.hp,
                attack: self.attack,
            },
            movement: MovementInfo {
                kind: movement_type.to_string(),
                range: movement_range,
            },
            attack: AttackInfo {
                kind: attack_type.to_string(),
                range: attack_range,
                damage: self.attack,
            },
            skills: skills(self.kind),
            special: special_note(self.kind).map(|text| SpecialInfo {
                damage_description: text.to_string(),
            }),
        }
    }
}

/// Base (hp, attack) for a level-1 unit.
pub fn base_stats(kind: UnitKind) -> (i32, i32) {
    match kind {
        UnitKind::King => (30, 10),
        UnitKind::Pawn => (10, 5),
        UnitKind::Cannon => (10, 5),
        UnitKind::Knight => (15, 7),
        UnitKind::Archer => (12, 6),
        UnitKind::Mage => (5, 3),
    }
}

/// Default points a unit costs during the placement phase.
pub fn placement_cost(kind: UnitKind) -> u32 {
    match kind {
        UnitKind::King => 0,
        UnitKind::Pawn => 1,
        UnitKind::Knight => 3,
        UnitKind::Archer => 3,
        UnitKind::Cannon => 4,
        UnitKind::Mage => 4,
    }
}

fn movement_profile(kind: UnitKind) -> (&'static str, f32) {
    match kind {
        UnitKind::King | UnitKind::Pawn => ("one step in any direction", 1.0),
        UnitKind::Knight => ("L-shaped jump", 2.5),
        UnitKind::Archer | UnitKind::Mage => ("one step in any direction", 1.0),
        UnitKind::Cannon => ("straight lines, vertical and horizontal", 3.0),
    }
}

fn attack_profile(kind: UnitKind) -> (&'static str, f32) {
    match kind {
        UnitKind::King | UnitKind::Pawn => ("melee", 1.0),
        UnitKind::Knight => ("same as movement", 2.5),
        UnitKind::Archer => ("ranged shot along lines and diagonals", 3.0),
        UnitKind::Cannon => ("ranged shot, vertical and horizontal", 3.0),
        UnitKind::Mage => ("area blast in a cross", 3.0),
    }
}

fn skills(kind: UnitKind) -> Vec<SkillInfo> {
    let (name, description) = match kind {
        UnitKind::Knight => ("Charge", "Basic attack without special effects"),
        UnitKind::Cannon => (
            "Volley fire",
            "Deals increased damage at close range (200% on an adjacent cell)",
        ),
        UnitKind::Mage => (
            "Cross blast",
            "Hits the target cell and its four orthogonal neighbours",
        ),
        _ => ("Basic attack", "Basic attack without special effects"),
    };
    vec![SkillInfo {
        name: name.to_string(),
        description: description.to_string(),
        cooldown: 0,
    }]
}

fn special_note(kind: UnitKind) -> Option<&'static str> {
    match kind {
        UnitKind::Cannon => Some(
            "Damage falls off with distance: 200% (1 cell), 150% (2 cells), 100% (3 cells)",
        ),
        _ => None,
    }
}

/// Payload of the `piece-selected` notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub name: String,
    pub owner: Player,
    pub stats: UnitStats,
    pub movement: MovementInfo,
    pub attack: AttackInfo,
    pub skills: Vec<SkillInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub special: Option<SpecialInfo>,
}

/// Kind-specific notes beyond the basic stats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialInfo {
    pub damage_description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub level: u32,
    pub health: i32,
    pub attack: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub range: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub range: f32,
    pub damage: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub name: String,
    pub description: String,
    pub cooldown: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_stats_per_kind() {
        let king = Unit::new(UnitKind::King, Player::One);
        assert_eq!((king.hp, king.attack, king.level), (30, 10, 1));
        let mage = Unit::new(UnitKind::Mage, Player::Two);
        assert_eq!((mage.hp, mage.attack), (5, 3));
        let knight = Unit::new(UnitKind::Knight, Player::Two);
        assert_eq!((knight.hp, knight.attack), (15, 7));
    }

    #[test]
    fn info_reports_current_health() {
        let mut archer = Unit::new(UnitKind::Archer, Player::One);
        archer.hp = 4;
        let info = archer.info(3);
        assert_eq!(info.name, "archer");
        assert_eq!(info.stats.health, 4);
        assert_eq!(info.attack.range, 3.0);
        assert_eq!(info.skills.len(), 1);
        assert!(info.special.is_none());
    }

    #[test]
    fn cannon_info_carries_falloff_note() {
        let info = Unit::new(UnitKind::Cannon, Player::One).info(3);
        let special = info.special.clone().unwrap();
        assert!(special.damage_description.contains("150%"));

        let json = serde_json::to_value(&info).unwrap();
        assert!(json["special"]["damageDescription"]
            .as_str()
            .unwrap()
            .contains("200%"));

        let json = serde_json::to_value(&Unit::new(UnitKind::Pawn, Player::One).info(3)).unwrap();
        assert_eq!(json["movement"]["type"], "one step in any direction");
        assert!(json.get("special").is_none());
    }

    #[test]
    fn label_uses_army_colour() {
        assert_eq!(Unit::new(UnitKind::Pawn, Player::One).label(), "White Pawn");
        assert_eq!(Unit::new(UnitKind::Mage, Player::Two).label(), "Black Mage");
    }
}
