use std::cmp::Reverse;

use itertools::Itertools;

use super::Pilot;
use crate::{
    engine::{rules::check_collision, Board},
    grid::{
        types::{Coord, Direction},
        utils::manhattan_distance,
        GameConfig,
        GameState,
    },
};

/// Heads straight for the food, avoiding moves that die this tick and
/// preferring cells with more room around them when distances tie.
pub struct Greedy;

impl Greedy {
    fn open_neighbours(board: &Board, state: &GameState, cell: Coord) -> usize {
        Direction::iter()
            .map(|d| cell.neighbour(*d))
            .filter(|c| board.contains(*c) && !state.occupies(*c))
            .count()
    }
}

impl Pilot for Greedy {
    fn get_movement(
        &self,
        state: &GameState,
        config: &GameConfig,
    ) -> Option<Direction> {
        let head = state.head()?;
        let board = Board::from(config);

        Direction::iter()
            .copied()
            .filter(|d| !d.is_opposite(state.direction))
            .map(|d| (d, head.neighbour(d)))
            .filter(|(_, cell)| {
                check_collision(&board, &state.snake, *cell).is_none()
            })
            .sorted_by_key(|(_, cell)| {
                (
                    manhattan_distance(*cell, state.food),
                    Reverse(Self::open_neighbours(&board, state, *cell)),
                )
            })
            .map(|(d, _)| d)
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::Greedy;
    use crate::{
        grid::{
            types::{Coord, Direction},
            GameConfig,
            GameState,
            GameStatus,
        },
        pilots::Pilot,
    };

    fn state(snake: &[(i64, i64)], direction: Direction, food: (i64, i64)) -> GameState {
        GameState {
            snake: snake.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            food: Coord::new(food.0, food.1),
            direction,
            next_direction: direction,
            score: 0,
            high_score: 0,
            status: GameStatus::Playing,
            game_speed: 150,
        }
    }

    #[test]
    fn steers_towards_food() {
        let config = GameConfig::default();
        let s = state(&[(10, 10), (9, 10), (8, 10)], Direction::Right, (10, 3));
        assert_eq!(Greedy.get_movement(&s, &config), Some(Direction::Up));
    }

    #[test]
    fn avoids_the_wall() {
        let config = GameConfig::default();
        let s = state(&[(19, 5), (18, 5), (17, 5)], Direction::Right, (19, 19));
        assert_eq!(Greedy.get_movement(&s, &config), Some(Direction::Down));
    }

    #[test]
    fn gives_up_when_boxed_in() {
        let config = GameConfig::default();
        // Head in the corner, body covering both exits.
        let s = state(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 2)], Direction::Left, (5, 5));
        assert_eq!(Greedy.get_movement(&s, &config), None);
    }
}
