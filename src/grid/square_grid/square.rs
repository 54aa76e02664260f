use std::ops::{Add, Sub};

use glam::IVec2;

use crate::grid::{direction::Direction, offset_coordinate::OffsetCoordinate};

/// A position or displacement on the square grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Square(IVec2);

impl Square {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    /// Create a new [`Square`] from an [`OffsetCoordinate`].
    pub const fn from_offset(offset_coordinate: OffsetCoordinate) -> Self {
        Self(offset_coordinate.into_inner())
    }

    pub const fn x(&self) -> i32 {
        self.0.x
    }

    pub const fn y(&self) -> i32 {
        self.0.y
    }

    pub fn to_offset(self) -> OffsetCoordinate {
        OffsetCoordinate::new(self.x(), self.y())
    }

    /// Unit displacement for `direction`.
    pub const fn unit(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(0, -1),
            Direction::NorthEast => Self::new(1, -1),
            Direction::East => Self::new(1, 0),
            Direction::SouthEast => Self::new(1, 1),
            Direction::South => Self::new(0, 1),
            Direction::SouthWest => Self::new(-1, 1),
            Direction::West => Self::new(-1, 0),
            Direction::NorthWest => Self::new(-1, -1),
        }
    }

    /// Get [`Square`] at the given `direction` from `self`.
    pub fn neighbor(self, direction: Direction) -> Self {
        self + Self::unit(direction)
    }

    /// The orthogonal direction leading from `self` to an adjacent `rhs`, if any.
    pub fn direction_to(self, rhs: Self) -> Option<Direction> {
        let delta = rhs - self;
        Direction::ORTHOGONAL
            .into_iter()
            .find(|&direction| Self::unit(direction) == delta)
    }
}

impl Add for Square {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Square {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_units_cancel() {
        for direction in Direction::ORTHOGONAL {
            let sum = Square::unit(direction) + Square::unit(direction.opposite());
            assert_eq!(sum, Square::new(0, 0));
        }
    }

    #[test]
    fn direction_between_adjacent_squares() {
        let origin = Square::new(4, 4);
        assert_eq!(origin.direction_to(Square::new(4, 5)), Some(Direction::South));
        assert_eq!(origin.direction_to(Square::new(3, 4)), Some(Direction::West));
        assert_eq!(origin.direction_to(Square::new(5, 5)), None);
    }
}
