use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{
    engine::ConfigError,
    grid::{
        types::{Coord, Direction},
        utils::manhattan_distance,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Immutable per-run parameters. Speeds are tick intervals in milliseconds,
/// so a smaller number is a faster game and `max_speed` is the floor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub board_width:     i64,
    pub board_height:    i64,
    pub initial_speed:   u64,
    pub speed_increment: u64,
    pub max_speed:       u64,
    pub score_threshold: u32,
    pub food_reward:     u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width:     20,
            board_height:    20,
            initial_speed:   150,
            speed_increment: 5,
            max_speed:       80,
            score_threshold: 50,
            food_reward:     10,
        }
    }
}

impl GameConfig {
    pub const MIN_BOARD_SIDE: i64 = 3;

    /// # Errors
    ///
    /// Returns the first parameter that makes the game unplayable.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < Self::MIN_BOARD_SIDE
            || self.board_height < Self::MIN_BOARD_SIDE
        {
            return Err(ConfigError::BoardTooSmall {
                width:  self.board_width,
                height: self.board_height,
            });
        }
        if self.initial_speed == 0 {
            return Err(ConfigError::NonPositive("initial_speed"));
        }
        if self.max_speed == 0 {
            return Err(ConfigError::NonPositive("max_speed"));
        }
        if self.speed_increment == 0 {
            return Err(ConfigError::NonPositive("speed_increment"));
        }
        if self.score_threshold == 0 {
            return Err(ConfigError::NonPositive("score_threshold"));
        }
        if self.food_reward == 0 {
            return Err(ConfigError::NonPositive("food_reward"));
        }
        if self.max_speed > self.initial_speed {
            return Err(ConfigError::SpeedFloorAboveInitial {
                initial_speed: self.initial_speed,
                max_speed:     self.max_speed,
            });
        }
        Ok(())
    }

    /// Tick interval for a given score: one `speed_increment` faster per
    /// `score_threshold` points, never below `max_speed`.
    #[must_use]
    pub fn speed_for(&self, score: u32) -> u64 {
        let steps = u64::from(score / self.score_threshold.max(1));
        self.initial_speed
            .saturating_sub(steps.saturating_mul(self.speed_increment))
            .max(self.max_speed)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake:          VecDeque<Coord>,
    pub food:           Coord,
    pub direction:      Direction,
    pub next_direction: Direction,
    pub score:          u32,
    pub high_score:     u32,
    pub status:         GameStatus,
    pub game_speed:     u64,
}

impl GameState {
    #[must_use]
    pub fn head(&self) -> Option<Coord> {
        self.snake.front().copied()
    }

    #[must_use]
    pub fn occupies(&self, coord: Coord) -> bool {
        self.snake.contains(&coord)
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.status, GameStatus::Playing)
    }

    /// True when every pair of neighbouring segments is one step apart.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.snake
            .iter()
            .zip(self.snake.iter().skip(1))
            .all(|(a, b)| manhattan_distance(*a, *b) == 1)
    }

    /// Draws the board one row per line: `@` head, `#` body, `*` food and
    /// `.` for empty cells.
    #[must_use]
    pub fn render(&self, config: &GameConfig) -> String {
        let head = self.head();
        let mut out = String::new();
        for y in 0..config.board_height {
            for x in 0..config.board_width {
                let c = Coord { x, y };
                out.push(if Some(c) == head {
                    '@'
                } else if self.occupies(c) {
                    '#'
                } else if c == self.food {
                    '*'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}
