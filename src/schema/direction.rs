//! Movement instructions that make up a robot genome.

use serde::{Deserialize, Serialize};

/// A single unit step on the room grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Still,
}

impl Direction {
    /// Every direction, including `Still`.
    pub const ALL: [Direction; 5] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Still,
    ];

    /// Directions that actually move the robot. Mutation only draws from these.
    pub const MOVES: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Step vector `(dx, dy)`; `y` grows downwards.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Still => (0, 0),
        }
    }

    /// Apply this step to `(x, y)`, clamping to a `width` x `height` grid.
    #[inline]
    pub fn step(self, x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
        let (dx, dy) = self.delta();
        let nx = (x as isize + dx).clamp(0, width as isize - 1);
        let ny = (y as isize + dy).clamp(0, height as isize - 1);
        (nx as usize, ny as usize)
    }
}
