//! Arena CLI
//!
//! Play opponent policies against each other and report the tallies.

use anyhow::{Context, Result};
use arena::{ArenaConfig, ArenaResults, ArenaSettings, MatchRunner};
use castle_core::{LevelDefinition, RulesConfig};
use clap::Parser;
use match_controller::StrategyKind;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the arena runner.
#[derive(Parser, Debug)]
#[command(name = "arena")]
#[command(about = "Headless strategy-vs-strategy matches for Castle Tactics")]
#[command(version)]
struct Args {
    /// Policy of the first participant (heuristic, minimax, random)
    #[arg(long)]
    first: StrategyKind,

    /// Policy of the second participant
    #[arg(long)]
    second: StrategyKind,

    /// Number of games; sides alternate every game
    #[arg(short, long, default_value_t = 10)]
    games: u32,

    /// Minimax search depth in plies
    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Turns per game before it is called a draw
    #[arg(long, default_value_t = 100)]
    max_turns: u32,

    /// Level file (JSON or TOML) to start from instead of the standard armies
    #[arg(long)]
    level: Option<PathBuf>,

    /// Rules file (TOML) overriding the standard constants
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Seed for random policies
    #[arg(long)]
    seed: Option<u64>,

    /// Write results as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arena=info,warn")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let level = args
        .level
        .as_deref()
        .map(|path| {
            LevelDefinition::load(path)
                .with_context(|| format!("failed to load level {}", path.display()))
        })
        .transpose()?;

    let rules = match &args.rules {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read rules {}", path.display()))?;
            RulesConfig::from_toml_str(&text)
                .with_context(|| format!("invalid rules {}", path.display()))?
        }
        None => RulesConfig::default(),
    };

    let level_id = level.as_ref().map(|l| l.id);
    info!(
        first = %args.first,
        second = %args.second,
        games = args.games,
        depth = args.depth,
        ?level_id,
        "starting match"
    );

    let mut first = args.first.build(args.depth, args.seed);
    let mut second = args
        .second
        .build(args.depth, args.seed.map(|s| s.wrapping_add(1)));

    let runner = MatchRunner::new(ArenaConfig {
        num_games: args.games,
        max_turns: args.max_turns,
        alternate_sides: true,
        level,
        rules,
    });
    let result = runner.run_match(first.as_mut(), second.as_mut());

    let first_name = args.first.to_string();
    let second_name = args.second.to_string();
    let mut results = ArenaResults::new(
        &format!("{first_name} vs {second_name}"),
        vec![first_name.clone(), second_name.clone()],
        ArenaSettings {
            games_per_match: args.games,
            search_depth: args.depth,
            max_turns: args.max_turns,
            level_id,
            seed: args.seed,
        },
    );
    results.add_match(&first_name, &second_name, result);
    results.print_report();

    if let Some(path) = &args.output {
        results
            .save(path)
            .with_context(|| format!("failed to save results to {}", path.display()))?;
        info!(path = %path.display(), "results saved");
    }

    Ok(())
}
