//! Match runner for playing games between strategies

use castle_core::{Board, EndCause, LevelDefinition, Player, RulesConfig, Strategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// How a single game finished
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Finish {
    KingSlain,
    CastleDestroyed,
    /// A side had no legal action left
    NoActions,
    /// A strategy proposed an action the board refused
    Forfeit,
    TurnLimit,
}

impl From<EndCause> for Finish {
    fn from(cause: EndCause) -> Self {
        match cause {
            EndCause::KingSlain => Finish::KingSlain,
            EndCause::CastleDestroyed => Finish::CastleDestroyed,
        }
    }
}

/// Record of one game, from player 1's perspective
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub result: GameResult,
    pub finish: Finish,
    pub turns: u32,
    pub actions: u32,
}

/// Result of a match (multiple games), from the first strategy's perspective
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score as a fraction (wins + draws / 2) / games
    pub fn score(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total as f64
    }

    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }
}

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Turns (three actions each) per game before declaring a draw
    pub max_turns: u32,
    /// Whether to alternate sides each game
    pub alternate_sides: bool,
    /// Starting layout; the standard armies when `None`
    pub level: Option<LevelDefinition>,
    pub rules: RulesConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_turns: 100,
            alternate_sides: true,
            level: None,
            rules: RulesConfig::default(),
        }
    }
}

/// Runs matches between two strategies
pub struct MatchRunner {
    config: ArenaConfig,
}

impl MatchRunner {
    pub fn new(config: ArenaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Run a match between two strategies
    ///
    /// Returns the result from `first`'s perspective
    pub fn run_match(&self, first: &mut dyn Strategy, second: &mut dyn Strategy) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let first_is_one = !self.config.alternate_sides || game_num % 2 == 0;

            let mut record = if first_is_one {
                self.play_game(first, second)
            } else {
                self.play_game(second, first)
            };
            if !first_is_one {
                record.result = record.result.flipped();
            }
            result.record(record.result);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                side = if first_is_one { "P1" } else { "P2" },
                result = ?record.result,
                finish = ?record.finish,
                turns = record.turns,
                score = %format!("{}-{}-{}", result.wins, result.losses, result.draws),
                "game finished"
            );
            result.games.push(record);
        }

        result
    }

    fn initial_board(&self) -> Board {
        match &self.config.level {
            Some(level) => Board::from_level(level, self.config.rules, |_| true),
            None => Board::standard_with_rules(self.config.rules),
        }
    }

    /// Play a single game, returns the record from player 1's perspective
    pub fn play_game(&self, one: &mut dyn Strategy, two: &mut dyn Strategy) -> GameRecord {
        let mut board = self.initial_board();
        one.new_game();
        two.new_game();

        let per_turn = self.config.rules.moves_per_turn.max(1) as u32;
        let max_actions = self.config.max_turns.saturating_mul(per_turn);
        let mut actions = 0;

        let record = |result, finish, actions: u32| GameRecord {
            result,
            finish,
            turns: actions / per_turn,
            actions,
        };

        while actions < max_actions {
            let side = board.current_player();
            let search = if side == Player::One {
                one.search(&board, side)
            } else {
                two.search(&board, side)
            };

            let Some(action) = search.best_action else {
                debug!(player = %side, "no legal action");
                return record(GameResult::Draw, Finish::NoActions, actions);
            };

            let applied = board.apply_action(action);
            board.drain_events();
            match applied {
                Ok(outcome) => {
                    actions += 1;
                    if let Some(ended) = outcome.ended {
                        let result = if ended.winner == Player::One {
                            GameResult::Win
                        } else {
                            GameResult::Loss
                        };
                        return record(result, ended.cause.into(), actions);
                    }
                }
                Err(err) => {
                    warn!(player = %side, ?action, %err, "strategy proposed an illegal action");
                    let result = if side == Player::One {
                        GameResult::Loss
                    } else {
                        GameResult::Win
                    };
                    return record(result, Finish::Forfeit, actions);
                }
            }
        }

        record(GameResult::Draw, Finish::TurnLimit, actions)
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    first: &mut dyn Strategy,
    second: &mut dyn Strategy,
    num_games: u32,
    max_turns: u32,
) -> MatchResult {
    let config = ArenaConfig {
        num_games,
        max_turns,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    runner.run_match(first, second)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
