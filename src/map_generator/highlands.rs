use crate::{
    generate_common_methods, height_map::synthesize::ShapeMode, map_parameters::MapParameters,
    tile_map::TileMap,
};

use super::Generator;

/// Land from edge to edge, rich in ore and a bit drier.
///
/// The whole map is one landmass, so there are no beaches to smooth and islands are not flood
/// filled.
pub struct Highlands(TileMap);

impl Generator for Highlands {
    generate_common_methods!();

    fn shape_mode(&self) -> ShapeMode {
        ShapeMode::Plain
    }

    fn adjust_parameters(map_parameters: &MapParameters) -> MapParameters {
        let rainfall = map_parameters.rainfall;
        MapParameters {
            resources: map_parameters.resources.saturating_add(5),
            rainfall: if rainfall > 0 { rainfall - 1 } else { rainfall },
            ..map_parameters.clone()
        }
    }

    fn add_beaches(&mut self) {}

    fn find_islands(&mut self) {
        self.tile_map_mut().define_single_landmass();
    }
}
