use log::debug;
use rand::Rng;

use crate::{
    grid::Direction,
    tile::Tile,
    tile_component::{Overlay, Terrain},
    tile_map::TileMap,
};

/// Islands smaller than this never get forests.
const MIN_FOREST_ISLAND_SIZE: usize = 30;

impl TileMap {
    /// Plants forests on every island large enough to hold them.
    ///
    /// Each forest starts on a random grass tile and grows 4 branches, one per edge direction.
    /// Wetter maps get more forests and longer branches.
    pub fn add_forests(&mut self, rainfall: i32) {
        let island_tile_lists: Vec<Vec<Tile>> = self
            .island_list
            .iter()
            .filter(|island| island.size() >= MIN_FOREST_ISLAND_SIZE)
            .map(|island| island.tile_list.clone())
            .collect();

        let mut forest_count = 0;
        for tile_list in island_tile_lists {
            let size = tile_list.len();
            let min_forests = ((size as f64).powf(1. / 4.) as i32).max(1);
            let max_forests = (min_forests + 2).max(((size as f64).cbrt() * 1.5) as i32);
            let mut remaining = self
                .random_number_generator
                .random_range(min_forests..=max_forests)
                .saturating_add(rainfall.saturating_sub(1).saturating_mul(3));

            // Draws that landed on something other than grass.
            let mut rejected = vec![false; size];
            let mut rejected_count = 0;
            while remaining > 0 && rejected_count < size {
                let index = self.random_number_generator.random_range(0..size);
                if rejected[index] {
                    continue;
                }
                let seed = tile_list[index];
                if seed.terrain(&self.tile_grid) != Terrain::Grass {
                    rejected[index] = true;
                    rejected_count += 1;
                    continue;
                }

                for direction in Direction::ORTHOGONAL {
                    let weight = self
                        .random_number_generator
                        .random_range(8..=12_i32)
                        .saturating_add(rainfall);
                    self.grow_forest_branch(seed, direction, weight);
                }
                remaining -= 1;
                forest_count += 1;
            }
        }

        debug!("forests: {forest_count} planted");
    }

    /// Grows a single forest branch from `start`.
    ///
    /// Trees only cover grass whose overlay is empty or already trees, any other tile ends the
    /// branch. Every step spends 1 weight and spawns up to 2 continuations, each with a 1 in 3
    /// chance of turning 90°. A branch ends when its weight reaches 1.
    pub fn grow_forest_branch(&mut self, start: Tile, direction: Direction, weight: i32) {
        let grid = self.grid();
        let mut stack = vec![(start, direction, weight)];

        while let Some((tile, direction, weight)) = stack.pop() {
            if tile.terrain(&self.tile_grid) != Terrain::Grass
                || !matches!(
                    tile.overlay(&self.tile_grid),
                    Overlay::Empty | Overlay::Trees
                )
            {
                continue;
            }
            tile.set_overlay(&mut self.tile_grid, Overlay::Trees);

            if weight <= 1 {
                continue;
            }

            let continuations = self.random_number_generator.random_range(0..=2);
            let mut new_direction = direction;
            for _ in 0..continuations {
                if self.random_number_generator.random_ratio(1, 3) {
                    new_direction = if self.random_number_generator.random_bool(0.5) {
                        direction.clockwise()
                    } else {
                        direction.counter_clockwise()
                    };
                }
                if let Some(next_tile) = tile.neighbor_tile(new_direction, grid) {
                    stack.push((next_tile, new_direction, weight - 1));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        grid::{Direction, OffsetCoordinate, Size},
        map_parameters::MapParameters,
        tile::Tile,
        tile_component::{Overlay, Terrain},
        tile_map::{TileGrid, TileMap},
    };

    fn tile_map_with(size: Size, terrain_at: impl Fn(i32, i32) -> Terrain, seed: u64) -> TileMap {
        let mut tile_map = TileMap::new(&MapParameters::default(), seed);
        tile_map.tile_grid = TileGrid::new(size);
        tile_map.elevation_list = vec![0; size.area()];
        let grid = tile_map.grid();
        for tile in tile_map.all_tiles() {
            let [x, y] = tile.to_offset(grid).to_array();
            tile.set_terrain(&mut tile_map.tile_grid, terrain_at(x, y));
        }
        tile_map.find_islands();
        tile_map
    }

    fn count_trees(tile_map: &TileMap) -> usize {
        tile_map
            .all_tiles()
            .filter(|tile| tile.overlay(&tile_map.tile_grid) == Overlay::Trees)
            .count()
    }

    #[test]
    fn trees_grow_on_grass_only() {
        let size = Size::new(24, 24);
        let mut tile_map = tile_map_with(
            size,
            |x, _| if x % 3 == 0 { Terrain::Sand } else { Terrain::Grass },
            21,
        );
        let river = Tile::from_offset(OffsetCoordinate::new(4, 4), tile_map.grid()).unwrap();
        river.set_overlay(&mut tile_map.tile_grid, Overlay::River);

        tile_map.add_forests(2);

        assert!(count_trees(&tile_map) > 0);
        for tile in tile_map.all_tiles() {
            if tile.overlay(&tile_map.tile_grid) == Overlay::Trees {
                assert_eq!(tile.terrain(&tile_map.tile_grid), Terrain::Grass);
            }
        }
        assert_eq!(river.overlay(&tile_map.tile_grid), Overlay::River);
    }

    #[test]
    fn grassless_islands_stay_bare() {
        let mut tile_map = tile_map_with(Size::new(10, 10), |_, _| Terrain::Sand, 4);
        tile_map.add_forests(3);
        assert_eq!(count_trees(&tile_map), 0);
    }

    #[test]
    fn small_islands_are_skipped() {
        let mut tile_map = tile_map_with(
            Size::new(12, 12),
            |x, y| {
                if (3..8).contains(&x) && (3..8).contains(&y) {
                    Terrain::Grass
                } else {
                    Terrain::Ocean
                }
            },
            8,
        );
        tile_map.add_forests(3);
        assert_eq!(count_trees(&tile_map), 0);
    }

    #[test]
    fn spent_branch_covers_its_start_only() {
        let mut tile_map = tile_map_with(Size::new(6, 6), |_, _| Terrain::Grass, 2);
        let start = Tile::from_offset(OffsetCoordinate::new(2, 2), tile_map.grid()).unwrap();

        tile_map.grow_forest_branch(start, Direction::East, 1);

        assert_eq!(count_trees(&tile_map), 1);
        assert_eq!(start.overlay(&tile_map.tile_grid), Overlay::Trees);
    }

    #[test]
    fn branches_stop_at_foreign_overlays() {
        let mut tile_map = tile_map_with(Size::new(6, 6), |_, _| Terrain::Grass, 2);
        let start = Tile::from_offset(OffsetCoordinate::new(2, 2), tile_map.grid()).unwrap();
        start.set_overlay(&mut tile_map.tile_grid, Overlay::Mountain);

        tile_map.grow_forest_branch(start, Direction::East, 12);

        assert_eq!(count_trees(&tile_map), 0);
    }
}
