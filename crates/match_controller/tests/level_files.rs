//! Tests against the shipped level and config files
//!
//! These exercise the whole load path: file -> LevelDefinition -> board,
//! and a few automated turns on the result.

use castle_core::{LevelDefinition, Player, UnitKind};
use match_controller::{MatchConfig, MatchController, StrategyKind};
use std::path::PathBuf;

fn workspace_file(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(rel)
}

#[test]
fn test_json_level_loads() {
    let level = LevelDefinition::load(&workspace_file("levels/level_1.json")).unwrap();
    assert_eq!(level.id, 1);

    let mut controller = MatchController::new(MatchConfig {
        pacing_ms: 0,
        ..MatchConfig::default()
    });
    controller.load_level(level);

    let grid = controller.board().grid();
    assert_eq!(grid.unit_count(Player::One), 7);
    assert_eq!(grid.unit_count(Player::Two), 6);
    assert!(grid.find_king(Player::Two).is_some());
}

#[test]
fn test_toml_level_loads() {
    let level = LevelDefinition::load(&workspace_file("levels/level_2.toml")).unwrap();
    assert_eq!(level.name, "Mage Tower");
    let units = level.units();
    assert!(units
        .iter()
        .any(|(_, u)| u.kind == UnitKind::Mage && u.owner == Player::One));
}

#[test]
fn test_sample_config_parses() {
    let config = MatchConfig::load(&workspace_file("config/match.toml")).unwrap();
    assert_eq!(config.strategy, StrategyKind::Minimax);
    assert_eq!(config.rules.moves_per_turn, 3);
}

#[test]
fn test_hot_seat_turns_alternate_on_level() {
    let level = LevelDefinition::load(&workspace_file("levels/level_1.json")).unwrap();
    let mut controller = MatchController::new(MatchConfig {
        pacing_ms: 0,
        strategy: StrategyKind::Heuristic,
        ..MatchConfig::default()
    });
    controller.load_level(level);

    // Drive the human side with the same greedy policy through clicks.
    let mut human = StrategyKind::Heuristic.build(1, None);
    for _ in 0..4 {
        if controller.board().is_over() {
            break;
        }
        for _ in 0..3 {
            let Some(action) = human.compute_best_move(controller.board(), Player::One) else {
                break;
            };
            controller.handle_click(action.from);
            controller.handle_click(action.to);
            if controller.board().is_over() || controller.board().current_player() != Player::One {
                break;
            }
        }
        if controller.board().is_over() {
            break;
        }
        assert_eq!(controller.board().current_player(), Player::Two);
        let applied = controller.play_automated_turn();
        assert!(applied <= 3);
        if !controller.board().is_over() {
            assert_eq!(controller.board().current_player(), Player::One);
        }
    }
    assert!(!controller.drain_notifications().is_empty());
}
