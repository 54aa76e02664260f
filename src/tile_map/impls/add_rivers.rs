use std::ops::RangeInclusive;

use arrayvec::ArrayVec;
use log::debug;
use rand::Rng;

use crate::{
    grid::{Direction, Square},
    tile::Tile,
    tile_component::Overlay,
    tile_map::TileMap,
};

/// Islands smaller than this never get rivers.
const MIN_RIVER_ISLAND_SIZE: usize = 40;

/// A river that reached the sea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverPath {
    /// Course of the river from its source to its mouth. Consecutive tiles share an edge.
    pub tile_list: Vec<Tile>,
    /// Single tiles branching off the mouth.
    pub delta_list: Vec<Tile>,
}

impl RiverPath {
    pub fn source(&self) -> Option<Tile> {
        self.tile_list.first().copied()
    }

    /// The last land tile of the course, it always touches water.
    pub fn mouth(&self) -> Option<Tile> {
        self.tile_list.last().copied()
    }

    /// Every tile the river occupies, the delta included.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tile_list.iter().chain(&self.delta_list).copied()
    }
}

/// Indices of the island tiles, sorted by elevation, that may become a river source.
///
/// Sources sit among the highest tiles but never on the peak itself.
fn source_range(island_size: usize) -> RangeInclusive<usize> {
    let lowest = (island_size as f64 * 0.85) as usize;
    let highest = ((island_size as f64 * 0.98) as usize).min(island_size.saturating_sub(2));
    lowest..=highest
}

impl TileMap {
    /// Carves rivers down the slopes of every island large enough to hold them.
    ///
    /// The number of rivers per island grows with the island size and `rainfall`. Each river
    /// starts among the highest tiles of its island. A walk that cannot reach the sea is thrown
    /// away, and an island gets at most 10 attempts per river it asks for.
    pub fn add_rivers(&mut self, rainfall: i32) {
        let island_tile_lists: Vec<Vec<Tile>> = self
            .island_list
            .iter()
            .filter(|island| island.size() >= MIN_RIVER_ISLAND_SIZE)
            .map(|island| island.tile_list.clone())
            .collect();

        let mut river_count = 0;
        for mut tile_list in island_tile_lists {
            let size = tile_list.len();
            let min_rivers = ((size as f64).powf(1. / 5.) as i32).max(1);
            let max_rivers = (min_rivers + 3).max((size as f64).cbrt() as i32);
            let target = self
                .random_number_generator
                .random_range(min_rivers..=max_rivers)
                .saturating_add(rainfall.saturating_sub(1));
            if target <= 0 {
                continue;
            }

            tile_list.sort_by_key(|&tile| self.elevation(tile));

            let mut remaining = target;
            let mut attempts = 10 * target;
            while remaining > 0 && attempts > 0 {
                attempts -= 1;
                let index = self
                    .random_number_generator
                    .random_range(source_range(size));
                if let Some(river) = self.trace_river(tile_list[index]) {
                    self.commit_river(&river);
                    remaining -= 1;
                    river_count += 1;
                }
            }
        }

        debug!("rivers: {river_count} carved");
    }

    /// Walks downhill from `source` until the sea.
    ///
    /// Every step moves to an edge neighbour that is not higher than the current tile and not a
    /// river yet. The lowest neighbour is taken, except for a 1 in 4 chance of taking the second
    /// lowest. Returns `None` when the walk gets stuck, the map is left untouched in that case.
    pub fn trace_river(&mut self, source: Tile) -> Option<RiverPath> {
        let grid = self.grid();
        if source.is_impassable(&self.tile_grid) || source.has_river(&self.tile_grid) {
            return None;
        }

        let mut tile_list = vec![source];
        let mut current_tile = source;
        loop {
            let elevation = self.elevation(current_tile);
            let mut candidates: ArrayVec<Tile, 4> = current_tile
                .neighbor_tiles(grid)
                .into_iter()
                .filter(|&tile| {
                    let terrain = tile.terrain(&self.tile_grid);
                    (terrain.is_water() || !terrain.is_impassable())
                        && !tile.has_river(&self.tile_grid)
                        && !tile_list.contains(&tile)
                        && self.elevation(tile) <= elevation
                })
                .collect();
            if candidates.is_empty() {
                return None;
            }
            candidates.sort_by_key(|&tile| self.elevation(tile));

            let pick = if candidates.len() > 1 && self.random_number_generator.random_ratio(1, 4)
            {
                1
            } else {
                0
            };
            let next_tile = candidates[pick];
            if next_tile.terrain(&self.tile_grid).is_water() {
                break;
            }
            tile_list.push(next_tile);
            current_tile = next_tile;
        }

        self.meander_river(&mut tile_list);

        let delta_list = current_tile
            .neighbor_tiles(grid)
            .into_iter()
            .filter(|&tile| self.can_carve(tile, &tile_list) && tile.touches_water(&self.tile_grid))
            .collect();

        Some(RiverPath {
            tile_list,
            delta_list,
        })
    }

    /// Stamps the river onto the overlay layer.
    pub fn commit_river(&mut self, river: &RiverPath) {
        for tile in river.tiles() {
            tile.set_overlay(&mut self.tile_grid, Overlay::River);
        }
    }

    /// Breaks up straight stretches of a river course.
    ///
    /// Each run of 4 steps in one direction, `c0 → c4`, has `c1..=c3` replaced by a zig-zag that
    /// swings to one side of the run, crosses back through `c1` and returns at `c3`. A run is left
    /// alone when the zig-zag would leave the map or cross water, another river or the course
    /// itself.
    fn meander_river(&self, tile_list: &mut Vec<Tile>) {
        let grid = self.grid();
        let mut index = 0;
        while index + 4 < tile_list.len() {
            let squares: [Square; 5] =
                std::array::from_fn(|i| Square::from_offset(tile_list[index + i].to_offset(grid)));
            let Some(direction) = squares[0].direction_to(squares[1]) else {
                index += 1;
                continue;
            };
            if !squares
                .windows(2)
                .all(|pair| pair[0].direction_to(pair[1]) == Some(direction))
            {
                index += 1;
                continue;
            }

            let side = match direction {
                Direction::North | Direction::South => Square::unit(Direction::West),
                _ => Square::unit(Direction::North),
            };
            let [c0, c1, c2, c3, _] = squares;
            let zig_zag = [
                c0 + side,
                c1 + side,
                c1,
                c1 - side,
                c2 - side,
                c3 - side,
                c3,
            ];

            let replacement: Option<Vec<Tile>> = zig_zag
                .iter()
                .map(|square| Tile::from_offset(square.to_offset(), grid))
                .collect();
            let replacement = replacement.filter(|replacement| {
                replacement
                    .iter()
                    .enumerate()
                    .all(|(i, &tile)| i == 2 || i == 6 || self.can_carve(tile, &tile_list[..]))
            });

            match replacement {
                Some(replacement) => {
                    tile_list.splice(index + 1..index + 4, replacement);
                    // Resume from the relocated `c3`.
                    index += 7;
                }
                None => index += 1,
            }
        }
    }

    fn can_carve(&self, tile: Tile, tile_list: &[Tile]) -> bool {
        !tile.is_impassable(&self.tile_grid)
            && !tile.has_river(&self.tile_grid)
            && !tile_list.contains(&tile)
    }
}
