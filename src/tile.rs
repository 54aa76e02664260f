use arrayvec::ArrayVec;

use crate::{
    grid::{Cell, Direction, OffsetCoordinate, SquareGrid},
    tile_component::{Overlay, Terrain},
    tile_map::TileGrid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// `Tile` represents a tile on the map, where the `usize` is the index of the current tile.
///
/// The index is row-major, so sorting tiles sorts them top to bottom, then left to right.
pub struct Tile(usize);

impl Tile {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Creates a `Tile` from an `OffsetCoordinate`, returns `None` when it is off the grid.
    pub fn from_offset(offset_coordinate: OffsetCoordinate, grid: SquareGrid) -> Option<Self> {
        grid.offset_to_cell(offset_coordinate).map(Self::from_cell)
    }

    #[inline(always)]
    pub fn from_cell(cell: Cell) -> Self {
        Self(cell.index())
    }

    #[inline(always)]
    pub fn to_cell(&self) -> Cell {
        Cell::new(self.0)
    }

    /// Get the index of the tile.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0
    }

    pub fn to_offset(&self, grid: SquareGrid) -> OffsetCoordinate {
        grid.cell_to_offset(self.to_cell())
    }

    /// Retrieves the neighboring tile in the specified direction, or `None` at the map edge.
    pub fn neighbor_tile(&self, direction: Direction, grid: SquareGrid) -> Option<Self> {
        grid.neighbor(self.to_cell(), direction).map(Self::from_cell)
    }

    /// The up to 4 tiles sharing an edge with the current tile, in [`Direction::ORTHOGONAL`] order.
    pub fn neighbor_tiles(&self, grid: SquareGrid) -> ArrayVec<Self, 4> {
        Direction::ORTHOGONAL
            .iter()
            .filter_map(|&direction| self.neighbor_tile(direction, grid))
            .collect()
    }

    /// The up to 8 tiles sharing an edge or a corner with the current tile.
    pub fn surrounding_tiles(&self, grid: SquareGrid) -> ArrayVec<Self, 8> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.neighbor_tile(direction, grid))
            .collect()
    }

    #[inline]
    pub fn terrain(&self, tile_grid: &TileGrid) -> Terrain {
        tile_grid.terrain_list[self.0]
    }

    #[inline]
    pub fn overlay(&self, tile_grid: &TileGrid) -> Overlay {
        tile_grid.overlay_list[self.0]
    }

    #[inline]
    pub fn set_terrain(&self, tile_grid: &mut TileGrid, terrain: Terrain) {
        tile_grid.terrain_list[self.0] = terrain;
    }

    #[inline]
    pub fn set_overlay(&self, tile_grid: &mut TileGrid, overlay: Overlay) {
        tile_grid.overlay_list[self.0] = overlay;
    }

    /// Checks if the tile is impassable, see [`Terrain::is_impassable`].
    pub fn is_impassable(&self, tile_grid: &TileGrid) -> bool {
        self.terrain(tile_grid).is_impassable()
    }

    pub fn has_river(&self, tile_grid: &TileGrid) -> bool {
        self.overlay(tile_grid) == Overlay::River
    }

    /// Checks if the tile is water or has water on one of its 4 edges.
    pub fn touches_water(&self, tile_grid: &TileGrid) -> bool {
        self.terrain(tile_grid).is_water()
            || self
                .neighbor_tiles(tile_grid.grid())
                .iter()
                .any(|tile| tile.terrain(tile_grid).is_water())
    }
}
