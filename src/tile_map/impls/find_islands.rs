use std::collections::VecDeque;

use log::debug;

use crate::{
    grid::{OffsetCoordinate, SquareGrid},
    tile::Tile,
    tile_map::TileMap,
};

/// A maximal set of passable tiles connected through their edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    /// Island ID. The ID is equal to the index of the island in the [`TileMap::island_list`].
    pub id: usize,
    /// Tiles of the island in row-major order.
    pub tile_list: Vec<Tile>,
}

impl Island {
    /// Size of the island in tiles.
    pub fn size(&self) -> usize {
        self.tile_list.len()
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.tile_list.binary_search(&tile).is_ok()
    }

    /// The top-left and bottom-right corners of the smallest rectangle holding the island.
    pub fn bounding_box(&self, grid: SquareGrid) -> Option<(OffsetCoordinate, OffsetCoordinate)> {
        let mut offsets = self.tile_list.iter().map(|tile| tile.to_offset(grid));
        let first = offsets.next()?;
        Some(offsets.fold((first, first), |(min, max), offset| {
            (
                OffsetCoordinate(min.0.min(offset.0)),
                OffsetCoordinate(max.0.max(offset.0)),
            )
        }))
    }
}

impl TileMap {
    /// Splits the passable tiles into islands, sorted by descending size.
    ///
    /// Tiles are scanned in row-major order; every passable tile not yet assigned starts a flood
    /// fill through the 4 edge neighbours.
    pub fn find_islands(&mut self) {
        let grid = self.grid();
        let mut visited = vec![false; self.size().area()];
        let mut island_list = Vec::new();

        for tile in self.all_tiles() {
            if visited[tile.index()] || tile.is_impassable(&self.tile_grid) {
                continue;
            }

            let mut tile_list = Vec::new();
            let mut queue = VecDeque::new();
            visited[tile.index()] = true;
            queue.push_back(tile);

            while let Some(current_tile) = queue.pop_front() {
                tile_list.push(current_tile);
                for neighbor in current_tile.neighbor_tiles(grid) {
                    if !visited[neighbor.index()] && !neighbor.is_impassable(&self.tile_grid) {
                        visited[neighbor.index()] = true;
                        queue.push_back(neighbor);
                    }
                }
            }

            tile_list.sort_unstable();
            island_list.push(Island { id: 0, tile_list });
        }

        self.set_island_list(island_list);
    }

    /// Puts every passable tile into a single island, without checking connectivity.
    pub fn define_single_landmass(&mut self) {
        let tile_list: Vec<Tile> = self
            .all_tiles()
            .filter(|tile| !tile.is_impassable(&self.tile_grid))
            .collect();

        let island_list = if tile_list.is_empty() {
            Vec::new()
        } else {
            vec![Island { id: 0, tile_list }]
        };
        self.set_island_list(island_list);
    }

    fn set_island_list(&mut self, mut island_list: Vec<Island>) {
        // Stable, so equally large islands keep their scan order.
        island_list.sort_by(|a, b| b.size().cmp(&a.size()));
        island_list
            .iter_mut()
            .enumerate()
            .for_each(|(id, island)| island.id = id);
        self.island_list = island_list;

        debug!(
            "found {} islands, {} playable, largest has {} tiles",
            self.island_list.len(),
            self.playable_islands().count(),
            self.island_list.first().map_or(0, Island::size),
        );
    }
}
