//! The finished two-layer map handed over to gameplay.

use enum_map::{EnumMap, enum_map};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    grid::{Direction, OffsetCoordinate, Size, SquareGrid},
    tile::Tile,
    tile_component::{Building, ConnectionMask, Overlay, Terrain},
};

/// The two stacked layers of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Terrain,
    Overlay,
}

/// A value that can be written to one of the [`Layer`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileValue {
    Terrain(Terrain),
    Overlay(Overlay),
}

impl TileValue {
    pub const fn layer(&self) -> Layer {
        match self {
            TileValue::Terrain(_) => Layer::Terrain,
            TileValue::Overlay(_) => Layer::Overlay,
        }
    }
}

/// Both layers of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    pub terrain: Terrain,
    pub overlay: Overlay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTileGrid")]
pub struct TileGrid {
    size: Size,
    /// Terrain of each tile. The index of the terrain is equal to [`Tile::index()`].
    pub(crate) terrain_list: Vec<Terrain>,
    /// Overlay of each tile. The index of the overlay is equal to [`Tile::index()`].
    pub(crate) overlay_list: Vec<Overlay>,
}

/// A [`TileGrid`] as read from disk, before its layers are checked against its size.
#[derive(Deserialize)]
struct RawTileGrid {
    size: Size,
    terrain_list: Vec<Terrain>,
    overlay_list: Vec<Overlay>,
}

impl TryFrom<RawTileGrid> for TileGrid {
    type Error = Error;

    fn try_from(raw: RawTileGrid) -> Result<Self, Self::Error> {
        let area = raw.size.area();
        if raw.terrain_list.len() != area || raw.overlay_list.len() != area {
            return Err(Error::InvalidConfiguration(format!(
                "a {}x{} tile grid needs {area} tiles per layer, got {} terrains and {} overlays",
                raw.size.width,
                raw.size.height,
                raw.terrain_list.len(),
                raw.overlay_list.len()
            )));
        }
        Ok(Self {
            size: raw.size,
            terrain_list: raw.terrain_list,
            overlay_list: raw.overlay_list,
        })
    }
}

impl TileGrid {
    /// Creates a grid covered by ocean.
    pub fn new(size: Size) -> Self {
        Self::filled(size, Terrain::Ocean)
    }

    pub fn filled(size: Size, terrain: Terrain) -> Self {
        Self {
            size,
            terrain_list: vec![terrain; size.area()],
            overlay_list: vec![Overlay::Empty; size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn grid(&self) -> SquareGrid {
        SquareGrid::new(self.size)
    }

    /// Returns an iterator over all tiles in row-major order.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + use<> {
        (0..self.size.area()).map(Tile::new)
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        Tile::from_offset(OffsetCoordinate::new(x, y), self.grid())
    }

    /// Both layers at `(x, y)`, or `None` off the map.
    pub fn get(&self, x: i32, y: i32) -> Option<TileState> {
        self.tile(x, y).map(|tile| TileState {
            terrain: tile.terrain(self),
            overlay: tile.overlay(self),
        })
    }

    /// Writes `value` into `layer` at `(x, y)`.
    ///
    /// Writes off the map, or of a value that doesn't belong to `layer`, are ignored.
    pub fn set(&mut self, x: i32, y: i32, layer: Layer, value: TileValue) {
        let Some(tile) = self.tile(x, y) else {
            return;
        };
        match (layer, value) {
            (Layer::Terrain, TileValue::Terrain(terrain)) => tile.set_terrain(self, terrain),
            (Layer::Overlay, TileValue::Overlay(overlay)) => tile.set_overlay(self, overlay),
            _ => {}
        }
    }

    /// Places `building` at `(x, y)` if [`Building::can_place`] allows it.
    ///
    /// Returns `true` when the overlay changed.
    pub fn place_building(&mut self, x: i32, y: i32, building: Building) -> bool {
        let Some(tile) = self.tile(x, y) else {
            return false;
        };
        if !building.can_place(tile.terrain(self), tile.overlay(self)) {
            return false;
        }
        tile.set_overlay(self, Overlay::Building(building));
        true
    }

    /// Clears the overlay at `(x, y)`. Rivers and the town hall can't be removed.
    ///
    /// Returns `true` when the overlay changed.
    pub fn bulldoze(&mut self, x: i32, y: i32) -> bool {
        let Some(tile) = self.tile(x, y) else {
            return false;
        };
        if !tile.overlay(self).is_removable() {
            return false;
        }
        tile.set_overlay(self, Overlay::Empty);
        true
    }

    /// Sides through which the road or river at `(x, y)` continues.
    ///
    /// Returns `None` when the tile holds neither. Rivers also flow into shore and ocean, and
    /// both continue past the map edge.
    pub fn connection(&self, x: i32, y: i32) -> Option<ConnectionMask> {
        let tile = self.tile(x, y)?;
        let overlay = tile.overlay(self);
        if !matches!(overlay, Overlay::Road | Overlay::River) {
            return None;
        }

        let grid = self.grid();
        let sides = [
            (Direction::North, ConnectionMask::TOP),
            (Direction::South, ConnectionMask::BOTTOM),
            (Direction::West, ConnectionMask::LEFT),
            (Direction::East, ConnectionMask::RIGHT),
        ];
        let mask = sides
            .into_iter()
            .filter(|&(direction, _)| match tile.neighbor_tile(direction, grid) {
                None => true,
                Some(neighbor) => {
                    neighbor.overlay(self) == overlay
                        || (overlay == Overlay::River && neighbor.terrain(self).is_water())
                }
            })
            .fold(ConnectionMask::empty(), |mask, (_, side)| mask | side);
        Some(mask)
    }

    /// Number of tiles of each terrain.
    pub fn terrain_histogram(&self) -> EnumMap<Terrain, u32> {
        let mut histogram: EnumMap<Terrain, u32> = enum_map! { _ => 0 };
        self.terrain_list
            .iter()
            .for_each(|&terrain| histogram[terrain] += 1);
        histogram
    }

    /// One pixel per tile, the overlay drawn over the terrain.
    pub fn to_preview_image(&self) -> RgbImage {
        RgbImage::from_fn(self.size.width, self.size.height, |x, y| {
            let index = y as usize * self.size.width as usize + x as usize;
            let color = self.overlay_list[index]
                .preview_color()
                .unwrap_or_else(|| self.terrain_list[index].preview_color());
            Rgb(color)
        })
    }
}
