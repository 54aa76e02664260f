use glam::IVec2;
use log::debug;
use rand::Rng;

use crate::{
    grid::OffsetCoordinate,
    tile::Tile,
    tile_component::Mineral,
    tile_map::TileMap,
};

/// Islands smaller than this never get ore veins.
const MIN_ORE_ISLAND_SIZE: usize = 30;

/// Jumps an oil field may take from each of its tiles.
const OIL_JUMPS: [IVec2; 4] = [
    IVec2::new(-2, -2),
    IVec2::new(-2, 2),
    IVec2::new(2, -2),
    IVec2::new(2, 2),
];

impl TileMap {
    /// Seeds coal veins and oil fields on every island large enough to hold them.
    ///
    /// Bigger islands and a higher `resources` setting get more veins. A vein is coal 2 times out
    /// of 3, oil otherwise.
    pub fn add_ore_veins(&mut self, resources: i32) {
        let island_tile_lists: Vec<Vec<Tile>> = self
            .island_list
            .iter()
            .filter(|island| island.size() >= MIN_ORE_ISLAND_SIZE)
            .map(|island| island.tile_list.clone())
            .collect();

        let (mut coal_count, mut oil_count) = (0, 0);
        for tile_list in island_tile_lists {
            let size = tile_list.len();
            let vein_count = ((size as f64).sqrt() / 3.) as i32;
            let vein_count = vein_count.min(4).saturating_add(resources.saturating_sub(2));

            for _ in 0..vein_count.max(0) {
                let start = tile_list[self.random_number_generator.random_range(0..size)];
                if self.random_number_generator.random_range(0..3) > 0 {
                    let weight = self.random_number_generator.random_range(4..=8);
                    coal_count += self.grow_ore_vein(start, Mineral::Coal, weight);
                } else {
                    let weight = self.random_number_generator.random_range(2..=3);
                    oil_count += self.grow_ore_vein(start, Mineral::Oil, weight);
                }
            }
        }

        debug!("ore veins: {coal_count} coal tiles, {oil_count} oil tiles");
    }

    /// Spreads `mineral` from `start`, returns the number of tiles it was seeded on.
    ///
    /// Coal creeps along a rough diagonal, every tile continues to 1 tile up-left and 1 tile
    /// down-right of itself, each offset by 0 or 1 on both axes. Oil jumps 2 tiles diagonally,
    /// each of the 4 jumps taken with a 1 in 2 chance. Tiles already holding the same mineral are
    /// crossed, a tile that can not take the mineral ends that part of the vein.
    pub fn grow_ore_vein(&mut self, start: Tile, mineral: Mineral, weight: i32) -> usize {
        let grid = self.grid();
        let mut seeded = 0;
        let mut stack = vec![(start.to_offset(grid), weight)];

        while let Some((offset_coordinate, weight)) = stack.pop() {
            if weight < 0 {
                continue;
            }
            let Some(tile) = Tile::from_offset(offset_coordinate, grid) else {
                continue;
            };

            let terrain = tile.terrain(&self.tile_grid);
            match terrain.with_mineral(mineral) {
                Some(mineral_terrain) => {
                    tile.set_terrain(&mut self.tile_grid, mineral_terrain);
                    seeded += 1;
                }
                None if terrain.mineral() == Some(mineral) => {}
                None => continue,
            }

            let position = offset_coordinate.into_inner();
            match mineral {
                Mineral::Coal => {
                    let rng = &mut self.random_number_generator;
                    let back = IVec2::new(rng.random_range(0..=1), rng.random_range(0..=1));
                    let forward = IVec2::new(rng.random_range(0..=1), rng.random_range(0..=1));
                    stack.push((OffsetCoordinate(position + forward), weight - 1));
                    stack.push((OffsetCoordinate(position - back), weight - 1));
                }
                Mineral::Oil => {
                    for jump in OIL_JUMPS {
                        if self.random_number_generator.random_bool(0.5) {
                            stack.push((OffsetCoordinate(position + jump), weight - 1));
                        }
                    }
                }
            }
        }

        seeded
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        grid::{OffsetCoordinate, Size},
        map_parameters::MapParameters,
        tile::Tile,
        tile_component::{Mineral, Terrain},
        tile_map::{TileGrid, TileMap},
    };

    fn grass_map(size: Size, seed: u64) -> TileMap {
        let mut tile_map = TileMap::new(&MapParameters::default(), seed);
        tile_map.tile_grid = TileGrid::filled(size, Terrain::Grass);
        tile_map.elevation_list = vec![0; size.area()];
        tile_map.find_islands();
        tile_map
    }

    fn tile_at(tile_map: &TileMap, x: i32, y: i32) -> Tile {
        Tile::from_offset(OffsetCoordinate::new(x, y), tile_map.grid()).unwrap()
    }

    fn terrains(tile_map: &TileMap) -> Vec<Terrain> {
        tile_map
            .all_tiles()
            .map(|tile| tile.terrain(&tile_map.tile_grid))
            .collect()
    }

    #[test]
    fn coal_veins_rewrite_the_substrate() {
        let mut tile_map = grass_map(Size::new(12, 12), 6);
        let start = tile_at(&tile_map, 6, 6);

        let seeded = tile_map.grow_ore_vein(start, Mineral::Coal, 6);

        assert!(seeded >= 1);
        assert_eq!(start.terrain(&tile_map.tile_grid), Terrain::GrassCoal);
        let coal = terrains(&tile_map)
            .into_iter()
            .filter(|&terrain| terrain == Terrain::GrassCoal)
            .count();
        assert_eq!(coal, seeded);
    }

    #[test]
    fn oil_turns_shore_into_an_offshore_field() {
        let mut tile_map = grass_map(Size::new(6, 6), 1);
        let shore = tile_at(&tile_map, 0, 0);
        shore.set_terrain(&mut tile_map.tile_grid, Terrain::Shore);
        let ocean = tile_at(&tile_map, 5, 5);
        ocean.set_terrain(&mut tile_map.tile_grid, Terrain::Ocean);

        assert_eq!(tile_map.grow_ore_vein(shore, Mineral::Oil, 0), 1);
        assert_eq!(shore.terrain(&tile_map.tile_grid), Terrain::WaterOil);
        assert_eq!(tile_map.grow_ore_vein(ocean, Mineral::Oil, 3), 0);
        assert_eq!(ocean.terrain(&tile_map.tile_grid), Terrain::Ocean);
    }

    #[test]
    fn veins_halt_on_foreign_ground() {
        let mut tile_map = grass_map(Size::new(6, 6), 1);
        let snow = tile_at(&tile_map, 2, 2);
        snow.set_terrain(&mut tile_map.tile_grid, Terrain::Snow);
        let oil = tile_at(&tile_map, 3, 3);
        oil.set_terrain(&mut tile_map.tile_grid, Terrain::GrassOil);
        let before = terrains(&tile_map);

        assert_eq!(tile_map.grow_ore_vein(snow, Mineral::Coal, 8), 0);
        assert_eq!(tile_map.grow_ore_vein(oil, Mineral::Coal, 8), 0);
        assert_eq!(terrains(&tile_map), before);
    }

    #[test]
    fn veins_near_the_edge_stay_on_the_map() {
        let mut tile_map = grass_map(Size::new(4, 4), 9);
        for (x, y) in [(0, 0), (3, 3), (0, 3), (3, 0)] {
            let corner = tile_at(&tile_map, x, y);
            tile_map.grow_ore_vein(corner, Mineral::Coal, 8);
            tile_map.grow_ore_vein(corner, Mineral::Oil, 3);
        }
        assert_eq!(terrains(&tile_map).len(), 16);
    }

    #[test]
    fn richer_settings_seed_more_islands() {
        let mut tile_map = grass_map(Size::new(20, 20), 12);
        tile_map.add_ore_veins(3);

        let minerals: Vec<Terrain> = terrains(&tile_map)
            .into_iter()
            .filter(|terrain| terrain.mineral().is_some())
            .collect();
        assert!(!minerals.is_empty());
        assert!(minerals.iter().all(|terrain| terrain.base() == Terrain::Grass));
    }

    #[test]
    fn small_islands_get_no_ore() {
        let mut tile_map = grass_map(Size::new(5, 5), 12);
        tile_map.add_ore_veins(5);
        assert!(terrains(&tile_map).iter().all(|&terrain| terrain == Terrain::Grass));
    }
}
