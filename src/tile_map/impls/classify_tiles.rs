use enum_map::EnumMap;
use log::debug;
use rand::Rng;

use crate::{
    height_map::HeightField,
    map_parameters::ElevationThresholds,
    tile_component::{Overlay, Terrain},
    tile_map::TileMap,
};

impl TileMap {
    /// Converts the height field into terrain, one band per elevation threshold.
    ///
    /// The field is resampled to the map size first. Mountains are sprinkled over ground and snow,
    /// palm trees over sand. The grey elevation of every tile is kept for the river pass.
    pub fn classify_tiles(
        &mut self,
        height_field: &HeightField,
        thresholds: &ElevationThresholds,
        desert: bool,
    ) {
        let field = height_field.resize(self.size());
        let grid = self.grid();

        for tile in self.all_tiles() {
            let [x, y] = tile.to_offset(grid).to_array();
            let elevation = field.gray(x, y);
            let terrain = thresholds.classify(elevation, desert);

            let overlay = match terrain {
                Terrain::Ground | Terrain::Snow
                    if self.random_number_generator.random_ratio(1, 41) =>
                {
                    Overlay::Mountain
                }
                Terrain::Sand if self.random_number_generator.random_ratio(1, 51) => {
                    Overlay::PalmTree
                }
                _ => Overlay::Empty,
            };

            self.elevation_list[tile.index()] = elevation;
            tile.set_terrain(&mut self.tile_grid, terrain);
            tile.set_overlay(&mut self.tile_grid, overlay);
        }

        let histogram: EnumMap<Terrain, u32> = self.tile_grid.terrain_histogram();
        debug!(
            "classified tiles: {} ocean, {} shore, {} sand, {} grass, {} ground, {} snow",
            histogram[Terrain::Ocean],
            histogram[Terrain::Shore],
            histogram[Terrain::Sand],
            histogram[Terrain::Grass],
            histogram[Terrain::Ground],
            histogram[Terrain::Snow],
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        grid::Size,
        height_map::HeightField,
        map_parameters::{ElevationThresholds, MapParameters},
        tile_component::{Overlay, Terrain},
        tile_map::TileMap,
    };

    fn tile_map(size: u32) -> TileMap {
        let map_parameters = MapParameters {
            size,
            ..Default::default()
        };
        TileMap::new(&map_parameters, 17)
    }

    fn ramp(size: Size) -> HeightField {
        let values = (0..size.area())
            .map(|index| {
                let x = index % size.width as usize;
                (x * 255 / (size.width as usize - 1)) as f64
            })
            .collect();
        HeightField::from_values(size, values).unwrap()
    }

    #[test]
    fn increasing_ramp_gives_non_decreasing_harshness() {
        for desert in [false, true] {
            let mut tile_map = tile_map(2);
            let size = tile_map.size();
            tile_map.classify_tiles(&ramp(size), &ElevationThresholds::default(), desert);

            for y in 0..size.height as i32 {
                let ranks: Vec<u8> = (0..size.width as i32)
                    .map(|x| tile_map.tile_grid.get(x, y).unwrap().terrain.harshness_rank())
                    .collect();
                assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
            }
            assert_eq!(tile_map.tile_grid.get(0, 0).unwrap().terrain, Terrain::Ocean);
            let top = if desert { Terrain::Sand } else { Terrain::Snow };
            assert_eq!(tile_map.tile_grid.get(255, 0).unwrap().terrain, top);
        }
    }

    #[test]
    fn resamples_to_the_map_size() {
        let mut tile_map = tile_map(0);
        let field = HeightField::filled(Size::new(100, 70), 150.0);
        tile_map.classify_tiles(&field, &ElevationThresholds::default(), false);

        assert_eq!(tile_map.size(), Size::new(32, 32));
        assert!(tile_map.elevation_list.iter().all(|&elevation| elevation == 150));
        assert!(
            tile_map
                .all_tiles()
                .all(|tile| tile.terrain(&tile_map.tile_grid) == Terrain::Grass)
        );
    }

    #[test]
    fn sprinkles_only_on_matching_terrain() {
        let mut tile_map = tile_map(2);
        let size = tile_map.size();
        tile_map.classify_tiles(&ramp(size), &ElevationThresholds::default(), false);

        let mut mountains = 0;
        for tile in tile_map.all_tiles() {
            let terrain = tile.terrain(&tile_map.tile_grid);
            match tile.overlay(&tile_map.tile_grid) {
                Overlay::Mountain => {
                    mountains += 1;
                    assert!(matches!(terrain, Terrain::Ground | Terrain::Snow));
                }
                Overlay::PalmTree => assert_eq!(terrain, Terrain::Sand),
                Overlay::Empty => {}
                other => panic!("unexpected overlay {other:?}"),
            }
        }
        assert!(mountains > 0);
    }
}
