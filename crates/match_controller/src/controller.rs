//! The match controller: owns the live board, decides whose input is
//! accepted and drives the automated side.

use castle_core::{
    Action, ActionError, ActionOutcome, Board, ClickOutcome, LevelDefinition, Player, Pos,
    Strategy, Unit, UnitKind,
};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::notification::{Notification, HUMAN};
use crate::placement::{PlacementCatalog, PlacementError, PlacementState, KING_START};

/// The side driven by a policy when playing against the computer.
pub const AUTOMATED: Player = Player::Two;

/// Snapshot reported to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_player: Player,
    pub moves_left: u8,
    pub is_against_ai: bool,
}

/// An automated action computed against a specific board generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingMove {
    pub epoch: u64,
    pub player: Player,
    pub action: Action,
}

/// Why a pending move was dropped instead of applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PendingError {
    #[error("board was rebuilt (move computed for epoch {expected}, board is at {found})")]
    Stale { expected: u64, found: u64 },

    #[error("{player} is no longer to act")]
    NotOnTurn { player: Player },

    #[error(transparent)]
    Rejected(#[from] ActionError),
}

/// What a placement click changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementChange {
    Placed { pos: Pos, kind: UnitKind, cost: u32 },
    Removed { pos: Pos, kind: UnitKind, refund: u32 },
}

/// Result of a click routed through the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickResult {
    Board(ClickOutcome),
    Placement(Result<PlacementChange, PlacementError>),
    /// The automated side is to act; human input is refused
    NotYourTurn,
}

pub struct MatchController {
    board: Board,
    config: MatchConfig,
    strategy: Option<Box<dyn Strategy>>,
    against_ai: bool,
    level: Option<LevelDefinition>,
    placement: Option<PlacementState>,
    catalog: PlacementCatalog,
    epoch: u64,
    notifications: Vec<Notification>,
}

impl MatchController {
    /// Controller on the standard layout, with the configured policy bound
    /// when `against_ai` is set.
    pub fn new(config: MatchConfig) -> Self {
        let strategy = config.against_ai.then(|| config.build_strategy());
        Self {
            board: Board::standard_with_rules(config.rules),
            against_ai: config.against_ai,
            strategy,
            config,
            level: None,
            placement: None,
            catalog: PlacementCatalog::default(),
            epoch: 0,
            notifications: Vec::new(),
        }
    }

    /// Replaces the policy driving the automated side and enables it.
    pub fn bind_strategy(&mut self, strategy: Box<dyn Strategy>) {
        info!(strategy = strategy.name(), "opponent bound");
        self.strategy = Some(strategy);
        self.against_ai = true;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_against_ai(&self) -> bool {
        self.against_ai
    }

    pub fn level_id(&self) -> Option<u32> {
        self.level.as_ref().map(|l| l.id)
    }

    pub fn placement(&self) -> Option<&PlacementState> {
        self.placement.as_ref()
    }

    pub fn in_placement(&self) -> bool {
        self.placement.is_some()
    }

    /// Catalog used by placement phases started from `load_level`.
    pub fn set_catalog(&mut self, catalog: PlacementCatalog) {
        self.catalog = catalog;
    }

    pub fn get_game_state(&self) -> GameState {
        GameState {
            current_player: self.board.current_player(),
            moves_left: self.board.moves_left(),
            is_against_ai: self.against_ai,
        }
    }

    /// True when the automated side should act now.
    pub fn automated_to_act(&self) -> bool {
        self.against_ai
            && self.strategy.is_some()
            && self.placement.is_none()
            && !self.board.is_over()
            && self.board.current_player() == AUTOMATED
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Routes a human click to placement or to the board.
    pub fn handle_click(&mut self, pos: Pos) -> ClickResult {
        if self.placement.is_some() {
            return ClickResult::Placement(self.placement_click(pos));
        }
        if self.against_ai && self.board.current_player() != HUMAN {
            info!(%pos, "automated side is to act, click ignored");
            return ClickResult::NotYourTurn;
        }
        let outcome = self.board.handle_click(pos);
        self.collect_events();
        ClickResult::Board(outcome)
    }

    // ------------------------------------------------------------------
    // Board lifecycle
    // ------------------------------------------------------------------

    /// Rebuilds the board from a level definition.
    ///
    /// With placement enabled only player 2's units are seeded and a
    /// placement phase starts for the human.
    pub fn load_level(&mut self, level: LevelDefinition) {
        info!(level = level.id, name = %level.name, "loading level");
        self.level = Some(level);
        self.rebuild_board();
    }

    /// Switches between playing against the computer and hot-seat play, then
    /// rebuilds the board.
    pub fn toggle_game_mode(&mut self, use_ai: bool) {
        self.against_ai = use_ai;
        if use_ai {
            if self.strategy.is_none() {
                self.strategy = Some(self.config.build_strategy());
            }
        } else {
            self.strategy = None;
        }
        info!(against_ai = use_ai, "game mode changed");
        self.rebuild_board();
    }

    fn rebuild_board(&mut self) {
        self.placement = None;
        let level = self.level.clone();
        match &level {
            Some(level) if self.config.placement_enabled => {
                self.board = Board::from_level(level, self.config.rules, |p| p != HUMAN);
                self.start_placement(self.config.player_level, self.catalog.clone());
            }
            Some(level) => {
                self.board = Board::from_level(level, self.config.rules, |_| true);
            }
            None => {
                self.board = Board::standard_with_rules(self.config.rules);
            }
        }
        self.bump_epoch();
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.new_game();
        }
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
        debug!(epoch = self.epoch, "board replaced");
    }

    // ------------------------------------------------------------------
    // Placement phase
    // ------------------------------------------------------------------

    /// Starts a placement phase on the current board's enemy layout.
    ///
    /// The board keeps only the automated side's units; the human king is
    /// placed for free at its start cell.
    pub fn begin_placement(&mut self, player_level: u32, catalog: PlacementCatalog) {
        let board = match &self.level {
            Some(level) => Board::from_level(level, self.config.rules, |p| p != HUMAN),
            None => Board::with_rules(self.config.rules),
        };
        self.board = board;
        self.bump_epoch();
        self.start_placement(player_level, catalog);
    }

    fn start_placement(&mut self, player_level: u32, catalog: PlacementCatalog) {
        if let Err(err) = self.board.place(KING_START, Unit::new(UnitKind::King, HUMAN)) {
            warn!(%err, "could not place the human king");
        }
        let state = PlacementState::new(HUMAN, player_level, catalog);
        info!(budget = state.budget, "placement phase started");
        self.placement = Some(state);
    }

    pub fn select_placement_kind(&mut self, kind: UnitKind) -> Result<(), PlacementError> {
        let state = self
            .placement
            .as_mut()
            .ok_or(PlacementError::NotInPlacement)?;
        state.select(kind)?;
        debug!(%kind, "placement kind selected");
        Ok(())
    }

    fn placement_click(&mut self, pos: Pos) -> Result<PlacementChange, PlacementError> {
        let state = self
            .placement
            .as_mut()
            .ok_or(PlacementError::NotInPlacement)?;
        if !state.in_zone(pos) {
            return Err(PlacementError::OutsideZone { pos });
        }

        if let Some(unit) = self.board.unit_at(pos).copied() {
            if unit.owner != state.player || unit.kind == UnitKind::King {
                return Err(PlacementError::Occupied { pos });
            }
            self.board.remove(pos);
            let refund = state.catalog.cost(unit.kind);
            state.remaining += refund;
            debug!(%pos, kind = %unit.kind, refund, "placed unit removed");
            return Ok(PlacementChange::Removed {
                pos,
                kind: unit.kind,
                refund,
            });
        }

        let kind = state.selected.ok_or(PlacementError::NoKindSelected)?;
        let cost = state.check_affordable(kind)?;
        self.board
            .place(pos, Unit::new(kind, state.player))
            .map_err(|_| PlacementError::Occupied { pos })?;
        state.remaining -= cost;
        debug!(%pos, %kind, cost, remaining = state.remaining, "unit placed");
        Ok(PlacementChange::Placed { pos, kind, cost })
    }

    /// Ends the placement phase; the battle starts with the human to act.
    pub fn finish_placement(&mut self) -> Result<(), PlacementError> {
        let state = self.placement.take().ok_or(PlacementError::NotInPlacement)?;
        info!(spent = state.budget - state.remaining, "placement finished");
        self.notifications.push(Notification::GameUpdate {
            current_player: self.board.current_player(),
            moves_left: self.board.moves_left(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Automated side
    // ------------------------------------------------------------------

    /// Plays the automated side's turn through the click pipeline.
    ///
    /// Stops when the turn passes, the policy has nothing to play, an action
    /// fails to apply or the match ends. Returns the number of actions taken.
    pub fn play_automated_turn(&mut self) -> usize {
        let limit = self.config.rules.moves_per_turn as usize;
        let pacing = Duration::from_millis(self.config.pacing_ms);
        let mut applied = 0;

        for _ in 0..limit {
            if !self.automated_to_act() || self.board.moves_left() == 0 {
                break;
            }
            if !pacing.is_zero() {
                thread::sleep(pacing);
            }

            let Some(action) = self.compute_automated_action() else {
                info!("automated side has no action, ending its turn early");
                break;
            };

            self.board.handle_click(action.from);
            let outcome = self.board.handle_click(action.to);
            self.collect_events();
            if !matches!(outcome, ClickOutcome::Acted(_)) {
                warn!(?action, ?outcome, "automated action did not apply, aborting turn");
                break;
            }
            applied += 1;
        }
        debug!(applied, "automated turn finished");
        applied
    }

    fn compute_automated_action(&mut self) -> Option<Action> {
        let strategy = self.strategy.as_mut()?;
        let result = strategy.search(&self.board, AUTOMATED);
        debug!(
            strategy = strategy.name(),
            action = ?result.best_action,
            score = result.score,
            nodes = result.nodes,
            "automated search"
        );
        result.best_action
    }

    /// Computes the next automated action without applying it.
    pub fn next_automated_move(&mut self) -> Option<PendingMove> {
        if !self.automated_to_act() {
            return None;
        }
        let action = self.compute_automated_action()?;
        Some(PendingMove {
            epoch: self.epoch,
            player: AUTOMATED,
            action,
        })
    }

    /// Applies a previously computed move if the board it was computed for is
    /// still live and the move is still legal.
    pub fn apply_pending(&mut self, pending: PendingMove) -> Result<ActionOutcome, PendingError> {
        if pending.epoch != self.epoch {
            warn!(expected = pending.epoch, found = self.epoch, "dropping stale move");
            return Err(PendingError::Stale {
                expected: pending.epoch,
                found: self.epoch,
            });
        }
        if self.board.is_over() {
            return Err(ActionError::MatchOver.into());
        }
        if self.placement.is_some() || self.board.current_player() != pending.player {
            warn!(player = %pending.player, "dropping move for a side not on turn");
            return Err(PendingError::NotOnTurn {
                player: pending.player,
            });
        }
        let Action { from, to } = pending.action;
        if !self.board.can_move_to(from, to) {
            warn!(action = ?pending.action, "dropping move that is no longer legal");
            return Err(ActionError::Illegal { from, to }.into());
        }

        self.board.handle_click(from);
        let outcome = self.board.handle_click(to);
        self.collect_events();
        match outcome {
            ClickOutcome::Acted(outcome) => Ok(outcome),
            _ => Err(ActionError::Illegal { from, to }.into()),
        }
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    fn collect_events(&mut self) {
        let level_id = self.level_id();
        for event in self.board.drain_events() {
            self.notifications
                .push(Notification::from_event(event, level_id));
        }
    }

    /// Takes every notification queued since the last drain, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.collect_events();
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
