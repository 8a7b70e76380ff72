//! Arena Runner for Castle Tactics
//!
//! This crate provides infrastructure for:
//! - Running headless matches between opponent policies
//! - Recording per-game outcomes and match tallies
//! - Saving results as JSON and printing text reports
//!
//! # Usage
//!
//! ```bash
//! # Greedy policy against the minimax search on the standard layout
//! cargo run -p arena -- --first heuristic --second minimax --games 20 --depth 2
//!
//! # Seeded random baseline on a level file, results written to disk
//! cargo run -p arena -- --first random --second heuristic --level levels/level_1.json --seed 7 --output results.json
//! ```

mod match_runner;
mod results;

pub use match_runner::*;
pub use results::*;
