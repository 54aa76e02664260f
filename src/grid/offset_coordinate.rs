use core::convert::From;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A coordinate in the offset coordinate system.
///
/// The origin `(0, 0)` is the top-left cell of the map. `x` grows to the east and `y` grows to
/// the south. A coordinate is only meaningful for a grid when `x ∈ [0, width)` and
/// `y ∈ [0, height)`; coordinates outside that range are legal values and are used to describe
/// positions just off the map edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct OffsetCoordinate(pub IVec2);

impl OffsetCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub const fn x(&self) -> i32 {
        self.0.x
    }

    pub const fn y(&self) -> i32 {
        self.0.y
    }

    pub const fn into_inner(self) -> IVec2 {
        self.0
    }

    pub const fn to_array(self) -> [i32; 2] {
        [self.0.x, self.0.y]
    }
}

impl From<[u32; 2]> for OffsetCoordinate {
    fn from(value: [u32; 2]) -> Self {
        OffsetCoordinate::new(value[0] as i32, value[1] as i32)
    }
}

impl From<[i32; 2]> for OffsetCoordinate {
    fn from(value: [i32; 2]) -> Self {
        OffsetCoordinate::new(value[0], value[1])
    }
}

impl From<OffsetCoordinate> for [i32; 2] {
    fn from(value: OffsetCoordinate) -> Self {
        value.to_array()
    }
}
