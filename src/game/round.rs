use super::grid::Grid;
use crate::consts;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// The parameters of a full game: the board, the number of rounds, and how
/// the target and speed grow from one round to the next
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawRules")]
pub(crate) struct Rules {
    grid: Grid,
    rounds: u32,
    first_target: u32,
    target_increment: u32,
    base_speed: u32,
    speed_increment: u32,
}

impl Rules {
    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    /// Total number of rounds in a game
    pub(crate) fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Number of apples needed to clear the round with the given 0-based
    /// index
    pub(crate) fn target(&self, round: u32) -> u32 {
        self.first_target
            .saturating_add(self.target_increment.saturating_mul(round))
    }

    /// Number of snake movements per second in the given round; never zero
    pub(crate) fn speed(&self, round: u32) -> u32 {
        self.base_speed
            .saturating_add(self.speed_increment.saturating_mul(round))
            .max(1)
    }

    /// Time between snake movements in the given round
    pub(crate) fn tick_interval(&self, round: u32) -> Duration {
        Duration::from_secs(1) / self.speed(round)
    }

    /// Is the round with the given index the last one of the game?
    pub(crate) fn is_final_round(&self, round: u32) -> bool {
        round.saturating_add(1) >= self.rounds
    }
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            grid: Grid::new(consts::DEFAULT_COLUMNS, consts::DEFAULT_ROWS),
            rounds: consts::DEFAULT_ROUNDS,
            first_target: consts::DEFAULT_FIRST_TARGET,
            target_increment: consts::DEFAULT_TARGET_INCREMENT,
            base_speed: consts::DEFAULT_BASE_SPEED,
            speed_increment: consts::DEFAULT_SPEED_INCREMENT,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawRules {
    columns: u16,
    rows: u16,
    rounds: u32,
    first_target: u32,
    target_increment: u32,
    base_speed: u32,
    speed_increment: u32,
}

impl Default for RawRules {
    fn default() -> RawRules {
        RawRules {
            columns: consts::DEFAULT_COLUMNS,
            rows: consts::DEFAULT_ROWS,
            rounds: consts::DEFAULT_ROUNDS,
            first_target: consts::DEFAULT_FIRST_TARGET,
            target_increment: consts::DEFAULT_TARGET_INCREMENT,
            base_speed: consts::DEFAULT_BASE_SPEED,
            speed_increment: consts::DEFAULT_SPEED_INCREMENT,
        }
    }
}

impl TryFrom<RawRules> for Rules {
    type Error = RulesError;

    fn try_from(value: RawRules) -> Result<Rules, RulesError> {
        // The starting snake lies horizontally with its head in the middle
        // column, so there must be room for its whole body to the left.
        let min_columns = consts::INITIAL_SNAKE_LENGTH * 2;
        let min_rows = consts::INITIAL_SNAKE_LENGTH;
        if value.columns < min_columns || value.rows < min_rows {
            return Err(RulesError::GridTooSmall {
                columns: value.columns,
                rows: value.rows,
                min_columns,
                min_rows,
            });
        }
        // The board and its border must fit below the HUD.
        let max_columns = consts::DISPLAY_SIZE.width.saturating_sub(2);
        let max_rows = consts::DISPLAY_SIZE.height.saturating_sub(3);
        if value.columns > max_columns || value.rows > max_rows {
            return Err(RulesError::GridTooLarge {
                columns: value.columns,
                rows: value.rows,
                max_columns,
                max_rows,
            });
        }
        if value.rounds == 0 {
            return Err(RulesError::NoRounds);
        }
        if value.first_target == 0 {
            return Err(RulesError::NoTarget);
        }
        if value.base_speed == 0 {
            return Err(RulesError::NoSpeed);
        }
        Ok(Rules {
            grid: Grid::new(value.columns, value.rows),
            rounds: value.rounds,
            first_target: value.first_target,
            target_increment: value.target_increment,
            base_speed: value.base_speed,
            speed_increment: value.speed_increment,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum RulesError {
    #[error("a {columns}x{rows} board is too small; it must be at least {min_columns}x{min_rows}")]
    GridTooSmall {
        columns: u16,
        rows: u16,
        min_columns: u16,
        min_rows: u16,
    },
    #[error("a {columns}x{rows} board is too large; it must be at most {max_columns}x{max_rows}")]
    GridTooLarge {
        columns: u16,
        rows: u16,
        max_columns: u16,
        max_rows: u16,
    },
    #[error("a game must have at least one round")]
    NoRounds,
    #[error("the first round must require at least one apple")]
    NoTarget,
    #[error("the base speed must be at least one move per second")]
    NoSpeed,
}

/// Progress through the current round.  Replaced wholesale whenever a round
/// starts, including retries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct RoundState {
    index: u32,
    target: u32,
    score: u32,
    tick_interval: Duration,
}

impl RoundState {
    pub(crate) fn new(index: u32, rules: &Rules) -> RoundState {
        RoundState {
            index,
            target: rules.target(index),
            score: 0,
            tick_interval: rules.tick_interval(index),
        }
    }

    /// The 0-based index of the round
    pub(crate) fn index(&self) -> u32 {
        self.index
    }

    /// The 1-based number of the round, for display
    pub(crate) fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub(crate) fn target(&self) -> u32 {
        self.target
    }

    /// Number of apples eaten so far this round
    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Count an eaten apple.  Returns `true` if this reaches the target.
    pub(crate) fn record_apple(&mut self) -> bool {
        self.score = self.score.saturating_add(1);
        self.is_complete()
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.score >= self.target
    }
}
