//! The board: grid ownership, turn counter, click state machine and the single
//! rules pipeline both human input and automated players go through.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::{self, Casualty, MatchOutcome};
use crate::error::{ActionError, BoardError};
use crate::events::GameEvent;
use crate::grid::Grid;
use crate::history::{self, HistoryEntry, MoveHistory};
use crate::level::LevelDefinition;
use crate::movegen;
use crate::rules::RulesConfig;
use crate::types::*;
use crate::unit::Unit;

/// Snapshot of whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnState {
    pub current_player: Player,
    pub moves_left: u8,
    pub is_over: bool,
}

/// What a successfully applied action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub action: Action,
    pub kind: ActionKind,
    pub casualties: Vec<Casualty>,
    pub castle_damage: i32,
    /// Set when this action ended the match
    pub ended: Option<MatchOutcome>,
    /// True when this action used the last move of the turn
    pub turn_passed: bool,
}

/// Result of feeding one cell click into the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing happened (empty or enemy cell with no selection, off-board, match over)
    Ignored,
    /// The unit at this cell is now selected
    Selected(Pos),
    /// An illegal destination was clicked; the selection was dropped
    Deselected,
    Acted(ActionOutcome),
}

#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    current_player: Player,
    moves_left: u8,
    selected: Option<Pos>,
    castle_hp: [i32; 2],
    history: MoveHistory,
    outcome: Option<MatchOutcome>,
    rules: RulesConfig,
    events: Vec<GameEvent>,
    // Search copies keep no history, emit no events and do not log.
    quiet: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board with the standard rules, player 1 to act.
    pub fn new() -> Self {
        Self::with_rules(RulesConfig::default())
    }

    pub fn with_rules(rules: RulesConfig) -> Self {
        Self {
            grid: Grid::empty(),
            current_player: Player::One,
            moves_left: rules.moves_per_turn,
            selected: None,
            castle_hp: [rules.castle_hp; 2],
            history: MoveHistory::new(rules.history_limit),
            outcome: None,
            rules,
            events: Vec::new(),
            quiet: false,
        }
    }

    /// The default two-army layout used when no level is loaded.
    pub fn standard() -> Self {
        Self::standard_with_rules(RulesConfig::default())
    }

    pub fn standard_with_rules(rules: RulesConfig) -> Self {
        let mut board = Self::with_rules(rules);
        for (pos, unit) in standard_layout() {
            board.grid.set(pos, Some(unit));
        }
        board
    }

    /// Seeds a board from a level, keeping only entries whose owner passes
    /// `include`. Malformed entries are skipped (see [`LevelDefinition::units`]).
    pub fn from_level(
        level: &LevelDefinition,
        rules: RulesConfig,
        include: impl Fn(Player) -> bool,
    ) -> Self {
        let mut board = Self::with_rules(rules);
        let mut seeded = 0;
        for (pos, unit) in level.units() {
            if include(unit.owner) {
                board.grid.set(pos, Some(unit));
                seeded += 1;
            }
        }
        info!(level = level.id, units = seeded, "board seeded from level");
        board
    }

    /// Puts a unit on an empty cell.
    pub fn place(&mut self, pos: Pos, unit: Unit) -> Result<(), BoardError> {
        if !pos.is_valid() {
            return Err(BoardError::OutOfBounds { pos });
        }
        if !self.grid.is_empty(pos) {
            return Err(BoardError::Occupied { pos });
        }
        self.grid.set(pos, Some(unit));
        Ok(())
    }

    pub fn remove(&mut self, pos: Pos) -> Option<Unit> {
        if self.selected == Some(pos) {
            self.selected = None;
        }
        self.grid.take(pos)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn unit_at(&self, pos: Pos) -> Option<&Unit> {
        self.grid.get(pos)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn moves_left(&self) -> u8 {
        self.moves_left
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    pub fn castle_hp(&self, player: Player) -> i32 {
        self.castle_hp[player.idx()]
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// True when the match is decided: an outcome was recorded, a castle is
    /// down, or a king is missing from the grid.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
            || self.castle_hp.iter().any(|&hp| hp <= 0)
            || Player::ALL.iter().any(|&p| self.grid.find_king(p).is_none())
    }

    /// Winner of a decided position, if one side can be named.
    pub fn winner(&self) -> Option<Player> {
        if let Some(o) = self.outcome {
            return Some(o.winner);
        }
        for p in Player::ALL {
            let enemy = p.other();
            if self.castle_hp(enemy) <= 0 && self.castle_hp(p) > 0 {
                return Some(p);
            }
            if self.grid.find_king(enemy).is_none() && self.grid.find_king(p).is_some() {
                return Some(p);
            }
        }
        None
    }

    pub fn turn_state(&self) -> TurnState {
        TurnState {
            current_player: self.current_player,
            moves_left: self.moves_left,
            is_over: self.is_over(),
        }
    }

    pub fn possible_moves(&self, pos: Pos) -> Vec<Pos> {
        movegen::possible_moves(&self.grid, pos)
    }

    pub fn possible_attacks(&self, pos: Pos) -> Vec<Pos> {
        movegen::possible_attacks_with_radius(&self.grid, pos, self.rules.mage_radius)
    }

    /// How moving the unit at `from` to `to` would resolve, or `None` if it is
    /// illegal. Ignores whose turn it is.
    ///
    /// The destination decides which set is consulted: a friendly cell is
    /// never legal, an enemy unit or the empty enemy castle needs the attack
    /// set, an empty cell needs the move set.
    pub fn classify(&self, from: Pos, to: Pos) -> Option<ActionKind> {
        let unit = self.grid.get(from)?;
        if !to.is_valid() || from == to {
            return None;
        }
        match self.grid.owner_at(to) {
            Some(owner) if owner == unit.owner => None,
            Some(_) => self
                .possible_attacks(from)
                .contains(&to)
                .then_some(ActionKind::Attack),
            None if to == castle_pos(unit.owner.other()) => self
                .possible_attacks(from)
                .contains(&to)
                .then_some(ActionKind::CastleAttack),
            None => self
                .possible_moves(from)
                .contains(&to)
                .then_some(ActionKind::Move),
        }
    }

    pub fn can_move_to(&self, from: Pos, to: Pos) -> bool {
        self.classify(from, to).is_some()
    }

    /// Every legal action of `player`, regardless of whose turn it is.
    ///
    /// Units are visited row-major; for each unit its strikes come before its
    /// moves. Each destination appears at most once per unit.
    pub fn legal_actions(&self, player: Player) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut moves = Vec::with_capacity(16);
        let enemy_castle = castle_pos(player.other());
        for (from, _) in self.grid.units_of(player) {
            for to in self.possible_attacks(from) {
                if self.grid.is_hostile(to, player) {
                    actions.push(Action::new(from, to));
                }
            }
            movegen::possible_moves_into(&self.grid, from, &mut moves);
            for &to in &moves {
                if self.grid.is_empty(to) && to != enemy_castle {
                    actions.push(Action::new(from, to));
                }
            }
        }
        actions
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Applies one action for the player on turn.
    ///
    /// On success the selection is cleared, history is recorded and the turn
    /// counter advances, unless the action ended the match.
    pub fn apply_action(&mut self, action: Action) -> Result<ActionOutcome, ActionError> {
        if self.is_over() {
            return Err(ActionError::MatchOver);
        }
        let Action { from, to } = action;
        let unit = *self
            .grid
            .get(from)
            .ok_or(ActionError::NoUnit { pos: from })?;
        if unit.owner != self.current_player {
            return Err(ActionError::NotYourTurn { pos: from });
        }
        let kind = self
            .classify(from, to)
            .ok_or(ActionError::Illegal { from, to })?;

        let mut outcome = ActionOutcome {
            action,
            kind,
            casualties: Vec::new(),
            castle_damage: 0,
            ended: None,
            turn_passed: false,
        };

        let text = match kind {
            ActionKind::Move => {
                let moved = self.grid.take(from);
                self.grid.set(to, moved);
                history::describe_move(&unit, from, to)
            }
            ActionKind::Attack | ActionKind::CastleAttack => {
                let target = self.grid.get(to).copied();
                let report = combat::attack_target(&mut self.grid, &mut self.castle_hp, from, to);
                outcome.casualties = report.casualties;
                outcome.castle_damage = report.castle_damage;
                outcome.ended = report.ended;
                match target {
                    Some(t) => history::describe_attack(&unit, &t, from, to),
                    None => history::describe_castle_attack(&unit, from, to),
                }
            }
        };

        self.selected = None;
        if !self.quiet {
            debug!(%text, "action applied");
            self.history.push(HistoryEntry {
                kind,
                text: text.clone(),
            });
            self.events.push(GameEvent::MoveRecorded(text));
        }

        if let Some(ended) = outcome.ended {
            self.outcome = Some(ended);
            if !self.quiet {
                info!(winner = %ended.winner, cause = ?ended.cause, "match over");
                self.events.push(GameEvent::GameOver {
                    winner: ended.winner,
                    cause: ended.cause,
                });
            }
            return Ok(outcome);
        }

        self.moves_left = self.moves_left.saturating_sub(1);
        if self.moves_left == 0 {
            self.current_player = self.current_player.other();
            self.moves_left = self.rules.moves_per_turn;
            outcome.turn_passed = true;
            if !self.quiet {
                info!(player = %self.current_player, "turn passes");
            }
        }
        if !self.quiet {
            self.events.push(GameEvent::GameUpdate {
                current_player: self.current_player,
                moves_left: self.moves_left,
            });
        }
        Ok(outcome)
    }

    /// Feeds one cell click into the selection state machine.
    ///
    /// Never fails: illegal input clears the selection (or re-selects an own
    /// unit) and leaves the grid untouched.
    pub fn handle_click(&mut self, pos: Pos) -> ClickOutcome {
        if self.is_over() || !pos.is_valid() {
            return ClickOutcome::Ignored;
        }

        if let Some(from) = self.selected {
            if self.can_move_to(from, pos) {
                return match self.apply_action(Action::new(from, pos)) {
                    Ok(outcome) => ClickOutcome::Acted(outcome),
                    Err(err) => {
                        debug!(%err, "click rejected");
                        self.selected = None;
                        ClickOutcome::Deselected
                    }
                };
            }
            if self.is_own_unit(pos) {
                return self.select(pos);
            }
            debug!(%from, to = %pos, "illegal destination, selection cleared");
            self.selected = None;
            return ClickOutcome::Deselected;
        }

        if self.is_own_unit(pos) {
            return self.select(pos);
        }
        if !self.quiet {
            info!(%pos, player = %self.current_player, "click on a cell without an own unit ignored");
        }
        ClickOutcome::Ignored
    }

    fn is_own_unit(&self, pos: Pos) -> bool {
        self.grid.owner_at(pos) == Some(self.current_player)
    }

    fn select(&mut self, pos: Pos) -> ClickOutcome {
        self.selected = Some(pos);
        if let Some(unit) = self.grid.get(pos) {
            if !self.quiet {
                debug!(%pos, kind = %unit.kind, "unit selected");
                self.events
                    .push(GameEvent::PieceSelected(unit.info(self.rules.mage_radius)));
            }
        }
        ClickOutcome::Selected(pos)
    }

    /// Takes every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deep copy for look-ahead: no history, no events, no logging, and no
    /// selection.
    pub fn search_clone(&self) -> Board {
        Board {
            grid: self.grid.clone(),
            current_player: self.current_player,
            moves_left: self.moves_left,
            selected: None,
            castle_hp: self.castle_hp,
            history: MoveHistory::new(0),
            outcome: self.outcome,
            rules: self.rules,
            events: Vec::new(),
            quiet: true,
        }
    }

    /// Quiet copy in which `player` is to act. Keeps the remaining moves when
    /// it already is their turn, otherwise hands them a fresh turn.
    pub fn search_clone_for(&self, player: Player) -> Board {
        let mut copy = self.search_clone();
        if copy.current_player != player {
            copy.current_player = player;
            copy.moves_left = copy.rules.moves_per_turn;
        }
        copy
    }
}

/// Units of the default layout. Player 2 mirrors player 1 on rows 0/1 and
/// fields no mage.
pub fn standard_layout() -> Vec<(Pos, Unit)> {
    let mut out = Vec::with_capacity(27);
    for (player, back, front) in [(Player::One, 7, 6), (Player::Two, 0, 1)] {
        let back_row = [
            (0, UnitKind::Cannon),
            (1, UnitKind::Knight),
            (2, UnitKind::Archer),
            (3, UnitKind::King),
            (5, UnitKind::Archer),
            (6, UnitKind::Knight),
            (7, UnitKind::Cannon),
        ];
        for (x, kind) in back_row {
            out.push((Pos::new(x, back), Unit::new(kind, player)));
        }
        for x in 2..=5 {
            out.push((Pos::new(x, front), Unit::new(UnitKind::Pawn, player)));
        }
    }
    out.push((Pos::new(5, 5), Unit::new(UnitKind::Mage, Player::One)));
    out
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
