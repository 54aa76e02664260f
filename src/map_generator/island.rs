use crate::{
    generate_common_methods, height_map::synthesize::ShapeMode, map_parameters::MapParameters,
    tile_map::TileMap,
};

use super::Generator;

/// A single island rising from the middle of the ocean.
pub struct Island(TileMap);

impl Generator for Island {
    generate_common_methods!();

    fn shape_mode(&self) -> ShapeMode {
        ShapeMode::Radial
    }
}
