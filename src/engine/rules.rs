use std::{
    collections::{HashSet, VecDeque},
    fmt,
    iter,
};

use color_eyre::{eyre::ensure, Result};
use log::{debug, info, trace};
use rand::Rng;

use super::{board::Board, food::place_food};
use crate::grid::{
    types::{Coord, Direction},
    GameConfig,
    GameState,
    GameStatus,
};

pub const INITIAL_LENGTH: usize = 3;
pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Wall => write!(f, "hit the wall"),
            Self::Body => write!(f, "bit itself"),
        }
    }
}

/// The starting chain: head in the middle of the board, body trailing
/// behind it opposite to `INITIAL_DIRECTION`. On a 20x20 board this is
/// `(10,10) (9,10) (8,10)`.
#[must_use]
pub fn initial_snake(config: &GameConfig) -> VecDeque<Coord> {
    #[allow(clippy::cast_possible_wrap)]
    let min_x = INITIAL_LENGTH as i64 - 1;
    let head = Coord {
        x: (config.board_width / 2).max(min_x),
        y: config.board_height / 2,
    };
    iter::successors(Some(head), |c| {
        Some(c.neighbour(INITIAL_DIRECTION.opposite()))
    })
    .take(INITIAL_LENGTH)
    .collect()
}

/// A fresh READY state for `config`. Expects a validated config, which
/// always leaves free cells around the starting snake.
pub fn initial_state<R: Rng + ?Sized>(
    config: &GameConfig,
    high_score: u32,
    rng: &mut R,
) -> GameState {
    let snake = initial_snake(config);
    let food = place_food(&Board::from(config), &snake, rng)
        .unwrap_or(Coord { x: 0, y: 0 });

    GameState {
        snake,
        food,
        direction: INITIAL_DIRECTION,
        next_direction: INITIAL_DIRECTION,
        score: 0,
        high_score,
        status: GameStatus::Ready,
        game_speed: config.initial_speed,
    }
}

/// Boundary first, then the body. The whole pre-move body except the head
/// counts, including the tail that would be vacated this tick.
#[must_use]
pub fn check_collision(
    board: &Board,
    snake: &VecDeque<Coord>,
    candidate: Coord,
) -> Option<Collision> {
    if !board.contains(candidate) {
        return Some(Collision::Wall);
    }
    if snake.iter().skip(1).any(|segment| *segment == candidate) {
        return Some(Collision::Body);
    }
    None
}

fn game_over(state: &GameState) -> GameState {
    GameState {
        status: GameStatus::GameOver,
        ..state.clone()
    }
}

/// One tick. Pure: reads `state`, returns the successor. Anything other
/// than a PLAYING state comes back unchanged.
pub fn advance<R: Rng + ?Sized>(
    state: &GameState,
    config: &GameConfig,
    rng: &mut R,
) -> GameState {
    if !state.is_playing() {
        debug!("ignoring tick while {:?}", state.status);
        return state.clone();
    }

    let Some(head) = state.head() else {
        return game_over(state);
    };

    let direction = state.next_direction;
    let candidate = head.neighbour(direction);
    let board = Board::from(config);

    if let Some(collision) = check_collision(&board, &state.snake, candidate) {
        info!(
            "snake {collision} at {candidate}, final score {}",
            state.score
        );
        return game_over(state);
    }

    let mut next = state.clone();
    next.direction = direction;
    next.snake.push_front(candidate);

    if candidate == state.food {
        let Some(food) = place_food(&board, &next.snake, rng) else {
            info!("board is full at score {}", state.score);
            return game_over(state);
        };
        next.score = state.score.saturating_add(config.food_reward);
        next.food = food;
        info!(
            "ate food at {candidate}, score {} length {}, next food at {food}",
            next.score,
            next.snake.len()
        );
    } else {
        next.snake.pop_back();
    }

    next.game_speed = config.speed_for(next.score).min(state.game_speed);

    trace!(
        "moved {direction} to {candidate}, interval {} ms",
        next.game_speed
    );

    next
}

/// Checks what must hold for every reachable state: the snake is on the
/// board, unbroken, never overlaps itself and never covers the food.
///
/// # Errors
///
/// Describes the first broken invariant.
pub fn check_invariants(state: &GameState, config: &GameConfig) -> Result<()> {
    let board = Board::from(config);
    ensure!(!state.snake.is_empty(), "snake has no segments");
    ensure!(
        state.snake.iter().all(|c| board.contains(*c)),
        "snake left the board: {:?}",
        state.snake
    );
    ensure!(state.is_contiguous(), "snake is broken: {:?}", state.snake);
    ensure!(
        state.snake.iter().collect::<HashSet<_>>().len() == state.snake.len(),
        "snake overlaps itself: {:?}",
        state.snake
    );
    ensure!(
        !state.occupies(state.food),
        "food {} is under the snake",
        state.food
    );
    ensure!(
        state.game_speed >= config.max_speed,
        "interval {} ms is below the floor",
        state.game_speed
    );
    Ok(())
}
