//! Error types for board setup, action application and level parsing.

use thiserror::Error;

use crate::types::Pos;

/// Why `Board::apply_action` refused an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("the match is already over")]
    MatchOver,

    #[error("no unit at {pos}")]
    NoUnit { pos: Pos },

    #[error("unit at {pos} does not belong to the player on turn")]
    NotYourTurn { pos: Pos },

    #[error("unit at {from} cannot move to or attack {to}")]
    Illegal { from: Pos, to: Pos },
}

/// Errors while setting units on the board directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("position {pos} is outside the 8x8 board")]
    OutOfBounds { pos: Pos },

    #[error("position {pos} is already occupied")]
    Occupied { pos: Pos },
}

/// Errors while reading a level definition.
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid level TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
}
