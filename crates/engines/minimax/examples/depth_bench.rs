//! Search depth timing benchmark.
//!
//! Runs the minimax policy on the standard layout at increasing depths and
//! prints nodes, time and nodes per second for each.
//!
//! Usage:
//!   cargo run --release --example depth_bench -p minimax_engine -- [max_depth]

use castle_core::{Board, Player, Strategy};
use minimax_engine::MinimaxEngine;
use std::env;
use std::time::Instant;

fn main() {
    let max_depth: u8 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);

    let board = Board::standard();
    println!("Depth benchmark on the standard layout (player 1 to act)");
    println!("{:>5} {:>12} {:>10} {:>12}  best", "depth", "nodes", "ms", "nodes/s");

    for depth in 1..=max_depth {
        let mut engine = MinimaxEngine::with_depth(depth);
        let start = Instant::now();
        let result = engine.search(&board, Player::One);
        let elapsed = start.elapsed();
        let nps = result.nodes as f64 / elapsed.as_secs_f64().max(1e-9);
        let best = result
            .best_action
            .map(|a| format!("{}->{}", a.from.to_coord(), a.to.to_coord()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5} {:>12} {:>10} {:>12.0}  {}",
            depth,
            result.nodes,
            elapsed.as_millis(),
            nps,
            best
        );
    }
}
