//! Square grid coordinates for the 9×9 tactical board
//!
//! Ships move one cell at a time in any of the 8 directions, so distance is
//! Chebyshev (king-move) distance.

use serde::{Deserialize, Serialize};

use crate::combat::constants::GRID_MAX;

/// Cell on the combat board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Number of king moves between two cells
    pub fn distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    pub fn is_on_board(&self) -> bool {
        (0..=GRID_MAX).contains(&self.x) && (0..=GRID_MAX).contains(&self.y)
    }

    pub fn offset(&self, direction: GridDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// All 8 surrounding cells, including ones off the board
    pub fn neighbors(&self) -> [GridCoord; 8] {
        GridDirection::all().map(|d| self.offset(d))
    }
}

/// The 8 king-move directions; y grows downward (toward the attacker)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl GridDirection {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            GridDirection::North => (0, -1),
            GridDirection::NorthEast => (1, -1),
            GridDirection::East => (1, 0),
            GridDirection::SouthEast => (1, 1),
            GridDirection::South => (0, 1),
            GridDirection::SouthWest => (-1, 1),
            GridDirection::West => (-1, 0),
            GridDirection::NorthWest => (-1, -1),
        }
    }

    pub fn all() -> [GridDirection; 8] {
        [
            GridDirection::North,
            GridDirection::NorthEast,
            GridDirection::East,
            GridDirection::SouthEast,
            GridDirection::South,
            GridDirection::SouthWest,
            GridDirection::West,
            GridDirection::NorthWest,
        ]
    }
}
