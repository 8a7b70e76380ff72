//! Outbound notifications for the presentation and progression collaborators.

use castle_core::{GameEvent, Player, UnitInfo};
use serde::{Deserialize, Serialize};

/// The side played by the human.
pub const HUMAN: Player = Player::One;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    GameUpdate { current_player: Player, moves_left: u8 },
    PieceSelected(UnitInfo),
    MoveRecorded(String),
    /// `is_win` is from the human player's point of view.
    #[serde(rename_all = "camelCase")]
    GameOver { is_win: bool, level_id: Option<u32> },
}

impl Notification {
    pub fn from_event(event: GameEvent, level_id: Option<u32>) -> Self {
        match event {
            GameEvent::GameUpdate {
                current_player,
                moves_left,
            } => Notification::GameUpdate {
                current_player,
                moves_left,
            },
            GameEvent::PieceSelected(info) => Notification::PieceSelected(info),
            GameEvent::MoveRecorded(text) => Notification::MoveRecorded(text),
            GameEvent::GameOver { winner, .. } => Notification::GameOver {
                is_win: winner == HUMAN,
                level_id,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castle_core::EndCause;

    #[test]
    fn game_over_wire_format() {
        let n = Notification::from_event(
            GameEvent::GameOver {
                winner: Player::One,
                cause: EndCause::CastleDestroyed,
            },
            Some(4),
        );
        assert_eq!(
            n.to_json().unwrap(),
            r#"{"type":"game-over","data":{"isWin":true,"levelId":4}}"#
        );
    }

    #[test]
    fn game_update_wire_format() {
        let n = Notification::GameUpdate {
            current_player: Player::Two,
            moves_left: 3,
        };
        assert_eq!(
            n.to_json().unwrap(),
            r#"{"type":"game-update","data":{"currentPlayer":2,"movesLeft":3}}"#
        );
    }
}
