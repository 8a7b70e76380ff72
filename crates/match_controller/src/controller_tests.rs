use super::*;
use castle_core::{castle_pos, PieceSpec, RulesConfig, SearchResult};

fn quick_config() -> MatchConfig {
    MatchConfig {
        pacing_ms: 0,
        ..MatchConfig::default()
    }
}

fn level(id: u32, pieces: &[(&str, i64, i64, i64)]) -> LevelDefinition {
    LevelDefinition {
        id,
        name: format!("level {id}"),
        initial_pieces: pieces
            .iter()
            .map(|&(kind, owner, x, y)| PieceSpec::new(kind, owner, x, y))
            .collect(),
    }
}

fn click(controller: &mut MatchController, x: i8, y: i8) -> ClickResult {
    controller.handle_click(Pos::new(x, y))
}

fn play_human_turn(controller: &mut MatchController) {
    for x in [2, 3, 4] {
        click(controller, x, 6);
        let result = click(controller, x, 5);
        assert!(
            matches!(result, ClickResult::Board(ClickOutcome::Acted(_))),
            "pawn at ({x}, 6) failed to advance: {result:?}"
        );
    }
}

#[test]
fn test_initial_state() {
    let controller = MatchController::new(quick_config());
    assert_eq!(
        controller.get_game_state(),
        GameState {
            current_player: Player::One,
            moves_left: 3,
            is_against_ai: true
        }
    );
    assert_eq!(controller.epoch(), 0);
    assert!(!controller.in_placement());
}

#[test]
fn test_human_input_refused_on_automated_turn() {
    let mut controller = MatchController::new(quick_config());
    play_human_turn(&mut controller);
    assert!(controller.automated_to_act());
    assert_eq!(click(&mut controller, 5, 1), ClickResult::NotYourTurn);
}

#[test]
fn test_automated_turn_hands_back() {
    let mut controller = MatchController::new(quick_config());
    play_human_turn(&mut controller);

    let applied = controller.play_automated_turn();

    assert_eq!(applied, 3);
    let state = controller.get_game_state();
    assert_eq!(state.current_player, Player::One);
    assert_eq!(state.moves_left, 3);
    assert_eq!(controller.board().history().len(), 6);
}

#[test]
fn test_automated_turn_waits_for_its_side() {
    let mut controller = MatchController::new(quick_config());
    assert_eq!(controller.play_automated_turn(), 0);
    assert!(controller.next_automated_move().is_none());
}

/// Policy that always answers with the same canned action.
struct ScriptedStrategy {
    action: Option<Action>,
}

impl ScriptedStrategy {
    fn boxed(action: Option<Action>) -> Box<dyn Strategy> {
        Box::new(Self { action })
    }
}

impl Strategy for ScriptedStrategy {
    fn search(&mut self, _board: &Board, _player: Player) -> SearchResult {
        SearchResult {
            best_action: self.action,
            ..SearchResult::none()
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

#[test]
fn test_automated_turn_aborts_on_rejected_action() {
    let mut controller = MatchController::new(quick_config());
    play_human_turn(&mut controller);
    // A pawn cannot travel three rows.
    controller.bind_strategy(ScriptedStrategy::boxed(Some(Action::new(
        Pos::new(5, 1),
        Pos::new(5, 4),
    ))));
    let grid_before = controller.board().grid().clone();

    assert_eq!(controller.play_automated_turn(), 0);

    let board = controller.board();
    assert_eq!(board.grid(), &grid_before);
    assert_eq!(board.current_player(), AUTOMATED);
    assert_eq!(board.moves_left(), 3);
    assert_eq!(board.selected(), None);
    assert_eq!(board.history().len(), 3);
}

#[test]
fn test_automated_turn_ends_when_policy_has_nothing() {
    let mut controller = MatchController::new(quick_config());
    play_human_turn(&mut controller);
    controller.bind_strategy(ScriptedStrategy::boxed(None));
    let grid_before = controller.board().grid().clone();

    assert_eq!(controller.play_automated_turn(), 0);

    let board = controller.board();
    assert_eq!(board.grid(), &grid_before);
    assert_eq!(board.current_player(), AUTOMATED);
    assert_eq!(board.moves_left(), 3);
    assert_eq!(board.history().len(), 3);
    assert!(controller.next_automated_move().is_none());
}

#[test]
fn test_pending_move_applies_when_fresh() {
    let mut controller = MatchController::new(quick_config());
    play_human_turn(&mut controller);

    let pending = controller.next_automated_move().unwrap();
    assert_eq!(pending.player, AUTOMATED);
    let outcome = controller.apply_pending(pending).unwrap();
    assert_eq!(outcome.action, pending.action);
    assert_eq!(controller.board().moves_left(), 2);
}

#[test]
fn test_stale_pending_move_is_dropped() {
    let mut controller = MatchController::new(quick_config());
    play_human_turn(&mut controller);
    let pending = controller.next_automated_move().unwrap();

    controller.load_level(level(2, &[("king", 1, 3, 7), ("king", 2, 3, 0)]));

    assert_eq!(
        controller.apply_pending(pending),
        Err(PendingError::Stale {
            expected: pending.epoch,
            found: controller.epoch()
        })
    );
    assert!(controller.board().history().is_empty());
}

#[test]
fn test_load_level_seeds_all_units() {
    let mut controller = MatchController::new(quick_config());
    controller.load_level(level(
        3,
        &[
            ("king", 1, 3, 7),
            ("archer", 1, 2, 6),
            ("king", 2, 3, 0),
            ("wizard", 2, 0, 0),
            ("pawn", 3, 1, 1),
        ],
    ));
    let grid = controller.board().grid();
    assert_eq!(grid.unit_count(Player::One), 2);
    assert_eq!(grid.unit_count(Player::Two), 1);
    assert_eq!(controller.level_id(), Some(3));
}

#[test]
fn test_toggle_game_mode_rebuilds_and_unbinds() {
    let mut controller = MatchController::new(quick_config());
    play_human_turn(&mut controller);
    let epoch = controller.epoch();

    controller.toggle_game_mode(false);
    assert!(!controller.is_against_ai());
    assert_eq!(controller.epoch(), epoch + 1);
    assert_eq!(controller.board().current_player(), Player::One);
    assert!(controller.board().history().is_empty());

    // Hot-seat: player 2's clicks reach the board.
    play_human_turn(&mut controller);
    click(&mut controller, 3, 1);
    assert!(matches!(
        click(&mut controller, 3, 2),
        ClickResult::Board(ClickOutcome::Acted(_))
    ));
    assert_eq!(controller.play_automated_turn(), 0);

    controller.toggle_game_mode(true);
    assert!(controller.is_against_ai());
}

#[test]
fn test_placement_phase() {
    let config = MatchConfig {
        placement_enabled: true,
        player_level: 10,
        ..quick_config()
    };
    let mut controller = MatchController::new(config);
    controller.load_level(level(
        5,
        &[("king", 1, 0, 7), ("pawn", 1, 1, 6), ("king", 2, 3, 0)],
    ));

    // Only the enemy army is seeded; the human king stands at its start cell.
    let grid = controller.board().grid();
    assert_eq!(grid.unit_count(Player::One), 1);
    assert_eq!(grid.find_king(Player::One), Some(KING_START));
    assert_eq!(controller.placement().unwrap().remaining, 25);

    assert_eq!(
        click(&mut controller, 0, 6),
        ClickResult::Placement(Err(PlacementError::NoKindSelected))
    );
    controller.select_placement_kind(UnitKind::Cannon).unwrap();
    assert_eq!(
        click(&mut controller, 0, 7),
        ClickResult::Placement(Ok(PlacementChange::Placed {
            pos: Pos::new(0, 7),
            kind: UnitKind::Cannon,
            cost: 4
        }))
    );
    assert_eq!(controller.placement().unwrap().remaining, 21);

    // Clicking a placed unit takes it back.
    assert_eq!(
        click(&mut controller, 0, 7),
        ClickResult::Placement(Ok(PlacementChange::Removed {
            pos: Pos::new(0, 7),
            kind: UnitKind::Cannon,
            refund: 4
        }))
    );
    assert_eq!(controller.placement().unwrap().remaining, 25);

    assert_eq!(
        click(&mut controller, 0, 5),
        ClickResult::Placement(Err(PlacementError::OutsideZone {
            pos: Pos::new(0, 5)
        }))
    );
    let castle = castle_pos(Player::One);
    assert_eq!(
        controller.handle_click(castle),
        ClickResult::Placement(Err(PlacementError::OutsideZone { pos: castle }))
    );
    assert_eq!(
        controller.handle_click(KING_START),
        ClickResult::Placement(Err(PlacementError::Occupied { pos: KING_START }))
    );

    click(&mut controller, 1, 6);
    controller.finish_placement().unwrap();
    assert!(!controller.in_placement());
    assert_eq!(
        controller.board().unit_at(Pos::new(1, 6)).map(|u| u.kind),
        Some(UnitKind::Cannon)
    );
    assert!(matches!(
        click(&mut controller, 1, 6),
        ClickResult::Board(ClickOutcome::Selected(_))
    ));
    assert_eq!(
        controller.finish_placement(),
        Err(PlacementError::NotInPlacement)
    );
}

#[test]
fn test_placement_rejects_unaffordable_catalog_entry() {
    let config = MatchConfig {
        placement_enabled: true,
        player_level: 10,
        ..quick_config()
    };
    let mut controller = MatchController::new(config);
    let mut catalog = PlacementCatalog::default();
    catalog.set(UnitKind::Mage, 30, true);
    controller.set_catalog(catalog);
    controller.load_level(level(1, &[("king", 2, 3, 0)]));

    assert_eq!(
        controller.select_placement_kind(UnitKind::Mage),
        Err(PlacementError::InsufficientPoints {
            kind: UnitKind::Mage,
            cost: 30,
            remaining: 25
        })
    );
    assert_eq!(controller.placement().unwrap().remaining, 25);
    assert_eq!(controller.placement().unwrap().selected, None);
}

#[test]
fn test_game_over_notification_reports_level() {
    let config = MatchConfig {
        rules: RulesConfig {
            castle_hp: 5,
            ..RulesConfig::default()
        },
        ..quick_config()
    };
    let mut controller = MatchController::new(config);
    controller.load_level(level(
        9,
        &[("king", 1, 3, 7), ("pawn", 1, 4, 1), ("king", 2, 0, 0)],
    ));
    controller.drain_notifications();

    click(&mut controller, 4, 1);
    click(&mut controller, 4, 0);

    let notes = controller.drain_notifications();
    assert!(matches!(notes.first(), Some(Notification::PieceSelected(_))));
    assert_eq!(
        notes.last(),
        Some(&Notification::GameOver {
            is_win: true,
            level_id: Some(9)
        })
    );
    assert!(controller.board().is_over());
    assert_eq!(controller.play_automated_turn(), 0);
}
