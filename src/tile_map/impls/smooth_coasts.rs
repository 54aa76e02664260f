use log::debug;
use rand::Rng;

use crate::{
    tile::Tile,
    tile_component::{Overlay, Terrain},
    tile_map::TileMap,
};

impl TileMap {
    /// Softens coastlines with one pass of a cellular automaton.
    ///
    /// Every tile weighs its 3×3 neighbourhood: ocean counts -2, shore -1 and passable tiles +1.
    /// The tile itself only takes part when it is impassable. A land tile surrounded mostly by
    /// water becomes shore, a balanced neighbourhood turns the tile into sand, which sometimes
    /// grows a palm tree.
    pub fn add_beaches(&mut self) {
        let mut terrain_list = self.tile_grid.terrain_list.clone();
        let mut overlay_list = self.tile_grid.overlay_list.clone();
        let (mut shore_count, mut sand_count) = (0, 0);

        for tile in self.all_tiles() {
            let center_passable = !tile.is_impassable(&self.tile_grid);
            let (weight, count) = self
                .neighborhood(tile, center_passable)
                .fold((0, 0), |(weight, count), neighbor| {
                    let terrain = neighbor.terrain(&self.tile_grid);
                    let delta = match terrain {
                        Terrain::Ocean => -2,
                        Terrain::Shore => -1,
                        _ if !terrain.is_impassable() => 1,
                        _ => 0,
                    };
                    (weight + delta, count + 1)
                });

            let half = count / 2;
            if weight <= -half && tile.terrain(&self.tile_grid) != Terrain::Ocean {
                terrain_list[tile.index()] = Terrain::Shore;
                overlay_list[tile.index()] = Overlay::Empty;
                shore_count += 1;
            } else if -half < weight && weight < half {
                terrain_list[tile.index()] = Terrain::Sand;
                if self.random_number_generator.random_ratio(5, 101) {
                    overlay_list[tile.index()] = Overlay::PalmTree;
                }
                sand_count += 1;
            }
        }

        self.tile_grid.terrain_list = terrain_list;
        self.tile_grid.overlay_list = overlay_list;
        debug!("beaches: {shore_count} shore tiles, {sand_count} sand tiles");
    }

    /// Grows snow caps and melts lonely snow tiles.
    ///
    /// A passable tile with more than 2 snow tiles around it becomes snow. A snow tile with fewer
    /// becomes ground or grass, whichever is more common around it.
    pub fn smooth_snow(&mut self) {
        let mut terrain_list = self.tile_grid.terrain_list.clone();

        for tile in self.all_tiles() {
            let terrain = tile.terrain(&self.tile_grid);
            let center_passable = !terrain.is_impassable();
            let (snow, ground, grass) = self.neighborhood(tile, center_passable).fold(
                (0, 0, 0),
                |(snow, ground, grass), neighbor| match neighbor.terrain(&self.tile_grid) {
                    Terrain::Snow => (snow + 1, ground, grass),
                    Terrain::Ground => (snow, ground + 1, grass),
                    Terrain::Grass => (snow, ground, grass + 1),
                    _ => (snow, ground, grass),
                },
            );

            if snow > 2 && center_passable {
                terrain_list[tile.index()] = Terrain::Snow;
            } else if terrain == Terrain::Snow && snow <= 2 {
                terrain_list[tile.index()] = if ground > grass {
                    Terrain::Ground
                } else {
                    Terrain::Grass
                };
            }
        }

        self.tile_grid.terrain_list = terrain_list;
    }

    /// Tiles of the 3×3 block around `tile` that lie on the map, `tile` itself included unless
    /// `skip_center` is set.
    fn neighborhood(&self, tile: Tile, skip_center: bool) -> impl Iterator<Item = Tile> + use<> {
        let neighbors = tile.surrounding_tiles(self.grid());
        let center = (!skip_center).then_some(tile);
        neighbors.into_iter().chain(center)
    }
}
