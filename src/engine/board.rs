use itertools::iproduct;

use crate::grid::{types::Coord, GameConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub width:  i64,
    pub height: i64,
}

impl Board {
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width
            && coord.y < self.height
    }

    /// Every cell, row by row from the top-left.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        iproduct!(0..self.height, 0..self.width).map(|(y, x)| Coord { x, y })
    }
}

impl From<&GameConfig> for Board {
    fn from(config: &GameConfig) -> Self {
        Self {
            width:  config.board_width,
            height: config.board_height,
        }
    }
}
