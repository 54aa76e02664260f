//! This module defines the [`TileMap`] struct, the working state of one generation attempt.
//! Its methods contain 2 parts:
//! 1. The common methods, included in the `mod.rs` file.
//! 2. The map generating methods, defined in the [`impls`] module, one file per stage.
//!
//! Only the [`TileGrid`] and the [`StartSite`] outlive the generation, see [`GameMap`].

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{Size, SquareGrid},
    map_parameters::MapParameters,
    tile::Tile,
};

mod impls;
mod tile_grid;

pub use impls::*;
pub use tile_grid::{Layer, TileGrid, TileState, TileValue};

pub struct TileMap {
    /// Random number generator for the map, every random draw of the pipeline comes from here.
    pub random_number_generator: StdRng,
    /// The map being generated.
    pub tile_grid: TileGrid,
    /// Grey elevation of each tile, recorded by the classifier. The index is equal to [`Tile::index()`].
    pub elevation_list: Vec<i32>,
    /// Landmasses sorted by descending size.
    pub island_list: Vec<Island>,
    /// Islands with more tiles than this are playable.
    pub playable_island_size: u32,
    pub start_site: Option<StartSite>,
}

impl TileMap {
    /// Creates an ocean map for one generation attempt, its random numbers are drawn from `seed`.
    pub fn new(map_parameters: &MapParameters, seed: u64) -> Self {
        let size = map_parameters.map_size();
        Self {
            random_number_generator: StdRng::seed_from_u64(seed),
            tile_grid: TileGrid::new(size),
            elevation_list: vec![0; size.area()],
            island_list: Vec::new(),
            playable_island_size: map_parameters.playable_island_size(),
            start_site: None,
        }
    }

    pub fn size(&self) -> Size {
        self.tile_grid.size()
    }

    pub fn grid(&self) -> SquareGrid {
        self.tile_grid.grid()
    }

    /// Returns an iterator over all tiles in the map.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + use<> {
        self.tile_grid.all_tiles()
    }

    #[inline]
    pub fn elevation(&self, tile: Tile) -> i32 {
        self.elevation_list[tile.index()]
    }

    /// Islands large enough to host the start site, largest first.
    pub fn playable_islands(&self) -> impl Iterator<Item = &Island> {
        self.island_list
            .iter()
            .filter(|island| island.size() > self.playable_island_size as usize)
    }

    /// Drops the working state and keeps what gameplay needs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StartSiteNotFound`] if no start site was selected.
    pub fn into_game_map(self) -> Result<GameMap> {
        let start_site = self.start_site.ok_or(Error::StartSiteNotFound)?;
        Ok(GameMap {
            tile_grid: self.tile_grid,
            start_site,
        })
    }
}

/// A finished map: the tiles plus the player's starting settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    pub tile_grid: TileGrid,
    pub start_site: StartSite,
}
