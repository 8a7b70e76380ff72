//! Match Controller for Castle Tactics
//!
//! This crate composes the rules engine with an opponent policy:
//! - Routing human clicks to the board or the placement phase
//! - Driving the automated side's turn through the same click pipeline
//! - Loading levels and rebuilding the board
//! - Queuing notifications for the presentation and progression layers
//!
//! # Usage
//!
//! ```no_run
//! use castle_core::Pos;
//! use match_controller::{MatchConfig, MatchController};
//!
//! let mut controller = MatchController::new(MatchConfig::default());
//! controller.handle_click(Pos::new(3, 6));
//! controller.handle_click(Pos::new(3, 5));
//! controller.play_automated_turn();
//! for note in controller.drain_notifications() {
//!     println!("{note:?}");
//! }
//! ```

mod config;
mod controller;
mod notification;
mod placement;

pub use config::*;
pub use controller::*;
pub use notification::*;
pub use placement::*;
