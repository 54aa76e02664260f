use super::{Cell, Direction, OffsetCoordinate, Size};
use square::Square;

pub mod square;

/// A bounded, non-wrapping square grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareGrid {
    pub size: Size,
}

impl SquareGrid {
    pub const fn new(size: Size) -> Self {
        Self { size }
    }

    #[inline]
    pub const fn contains(&self, offset_coordinate: OffsetCoordinate) -> bool {
        let [x, y] = offset_coordinate.to_array();
        x >= 0 && y >= 0 && x < self.size.width as i32 && y < self.size.height as i32
    }

    /// Converts an offset coordinate to a cell, returns `None` when it lies outside the grid.
    pub fn offset_to_cell(&self, offset_coordinate: OffsetCoordinate) -> Option<Cell> {
        if !self.contains(offset_coordinate) {
            return None;
        }
        let [x, y] = offset_coordinate.to_array();
        Some(Cell::new(y as usize * self.size.width as usize + x as usize))
    }

    pub fn cell_to_offset(&self, cell: Cell) -> OffsetCoordinate {
        let width = self.size.width as usize;
        OffsetCoordinate::new((cell.index() % width) as i32, (cell.index() / width) as i32)
    }

    /// Get the neighbor of `cell` in `direction`, or `None` when it is off the grid.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let square = Square::from_offset(self.cell_to_offset(cell));
        self.offset_to_cell(square.neighbor(direction).to_offset())
    }
}
