use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the square board.
pub const BOARD_SIZE: i8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
    /// Player number as used by level files and notifications (1 or 2).
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
    /// Army colour used in move notation: player 1 plays white.
    pub fn colour(self) -> &'static str {
        match self {
            Player::One => "White",
            Player::Two => "Black",
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Player::from_id(id).ok_or_else(|| format!("invalid player id {id}, expected 1 or 2"))
    }
}

impl From<Player> for u8 {
    fn from(p: Player) -> u8 {
        p.id()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    King,
    Pawn,
    Knight,
    Archer,
    Cannon,
    Mage,
}

impl UnitKind {
    pub const ALL: [UnitKind; 6] = [
        UnitKind::King,
        UnitKind::Pawn,
        UnitKind::Knight,
        UnitKind::Archer,
        UnitKind::Cannon,
        UnitKind::Mage,
    ];

    /// Lowercase identifier used in level definitions.
    pub fn name(self) -> &'static str {
        match self {
            UnitKind::King => "king",
            UnitKind::Pawn => "pawn",
            UnitKind::Knight => "knight",
            UnitKind::Archer => "archer",
            UnitKind::Cannon => "cannon",
            UnitKind::Mage => "mage",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UnitKind::King => "King",
            UnitKind::Pawn => "Pawn",
            UnitKind::Knight => "Knight",
            UnitKind::Archer => "Archer",
            UnitKind::Cannon => "Cannon",
            UnitKind::Mage => "Mage",
        }
    }

    pub fn from_name(name: &str) -> Option<UnitKind> {
        let name = name.trim();
        UnitKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::from_name(s).ok_or_else(|| format!("unknown unit kind: {s}"))
    }
}

/// A board coordinate. `y = 0` is the top row (player 2's home side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn is_valid(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Shifted position, or `None` when it falls off the board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Pos> {
        let p = Pos::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?);
        p.is_valid().then_some(p)
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x as i32 - other.x as i32).abs() + (self.y as i32 - other.y as i32).abs()
    }

    /// Row-major index into a 64-cell array. Only meaningful for valid positions.
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE as usize + self.x as usize
    }

    pub fn from_index(i: usize) -> Pos {
        Pos::new((i % BOARD_SIZE as usize) as i8, (i / BOARD_SIZE as usize) as i8)
    }

    /// Algebraic-style coordinate: column a-h from x, row `8 - y`.
    pub fn to_coord(self) -> String {
        let f = (b'a' + self.x as u8) as char;
        let r = BOARD_SIZE - self.y;
        format!("{f}{r}")
    }

    pub fn from_coord(c: &str) -> Option<Pos> {
        let b = c.as_bytes();
        if b.len() != 2 {
            return None;
        }
        if !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return None;
        }
        let x = (b[0] - b'a') as i8;
        let y = BOARD_SIZE - (b[1] - b'0') as i8;
        Some(Pos::new(x, y))
    }

    /// All 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..(BOARD_SIZE as usize * BOARD_SIZE as usize)).map(Pos::from_index)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One unit activation: move or strike from `from` towards `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub from: Pos,
    pub to: Pos,
}

impl Action {
    pub fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }
}

/// How a legal action resolves on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Move,
    Attack,
    CastleAttack,
}

/// Fixed castle cell for each player.
pub const fn castle_pos(p: Player) -> Pos {
    match p {
        Player::One => Pos::new(4, 7),
        Player::Two => Pos::new(4, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_notation_matches_rows_from_bottom() {
        assert_eq!(Pos::new(0, 0).to_coord(), "a8");
        assert_eq!(Pos::new(0, 7).to_coord(), "a1");
        assert_eq!(Pos::new(3, 6).to_coord(), "d2");
        assert_eq!(Pos::from_coord("e1"), Some(Pos::new(4, 7)));
        assert_eq!(Pos::from_coord("i1"), None);
    }

    #[test]
    fn offset_rejects_off_board() {
        assert_eq!(Pos::new(0, 0).offset(-1, 0), None);
        assert_eq!(Pos::new(7, 7).offset(0, 1), None);
        assert_eq!(Pos::new(3, 3).offset(1, -1), Some(Pos::new(4, 2)));
    }

    #[test]
    fn unit_kind_parses_case_insensitively() {
        assert_eq!(UnitKind::from_name("Cannon"), Some(UnitKind::Cannon));
        assert_eq!(UnitKind::from_name(" mage "), Some(UnitKind::Mage));
        assert_eq!(UnitKind::from_name("dragon"), None);
    }

    #[test]
    fn player_ids_round_trip_through_serde() {
        let json = serde_json::to_string(&Player::Two).unwrap();
        assert_eq!(json, "2");
        assert!(serde_json::from_str::<Player>("3").is_err());
    }
}
