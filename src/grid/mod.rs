mod direction;
mod offset_coordinate;
mod square_grid;

use serde::{Deserialize, Serialize};

pub use direction::Direction;
pub use offset_coordinate::OffsetCoordinate;
pub use square_grid::{SquareGrid, square::Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells in a grid of this size.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// `Cell` is the row-major index of a position inside a [`SquareGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(usize);

impl Cell {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}
