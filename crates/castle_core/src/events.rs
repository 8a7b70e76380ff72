//! Notifications the board emits for its host.

use serde::{Deserialize, Serialize};

use crate::combat::EndCause;
use crate::types::Player;
use crate::unit::UnitInfo;

/// Fire-and-forget board notifications, drained by the host after each input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum GameEvent {
    #[serde(rename_all = "camelCase")]
    GameUpdate { current_player: Player, moves_left: u8 },
    PieceSelected(UnitInfo),
    MoveRecorded(String),
    GameOver { winner: Player, cause: EndCause },
}
