use std::collections::VecDeque;

use log::trace;
use rand::{seq::IteratorRandom, Rng};

use super::board::Board;
use crate::grid::types::Coord;

const SAMPLE_ATTEMPTS: usize = 64;

/// Picks a uniformly random cell not covered by `snake`.
///
/// Rejection-samples first, which is quick while the snake is short, then
/// falls back to choosing among the enumerated free cells. Returns `None`
/// only when the snake covers the whole board.
pub fn place_food<R: Rng + ?Sized>(
    board: &Board,
    snake: &VecDeque<Coord>,
    rng: &mut R,
) -> Option<Coord> {
    for _ in 0..SAMPLE_ATTEMPTS {
        let candidate = Coord {
            x: rng.random_range(0..board.width),
            y: rng.random_range(0..board.height),
        };
        if !snake.contains(&candidate) {
            return Some(candidate);
        }
    }

    trace!("food sampling missed {SAMPLE_ATTEMPTS} times, scanning free cells");
    board.cells().filter(|c| !snake.contains(c)).choose(rng)
}
