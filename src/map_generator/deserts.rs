use crate::{
    generate_common_methods, height_map::synthesize::ShapeMode, map_parameters::MapParameters,
    tile_map::TileMap,
};

use super::Generator;

/// A dry island where every land tile is sand.
///
/// Deserts grow no beaches and no forests, and the start site may sit on sand.
pub struct Deserts(TileMap);

impl Generator for Deserts {
    generate_common_methods!();

    fn shape_mode(&self) -> ShapeMode {
        ShapeMode::Radial
    }

    fn adjust_parameters(map_parameters: &MapParameters) -> MapParameters {
        MapParameters {
            rainfall: map_parameters.rainfall.saturating_sub(1),
            ..map_parameters.clone()
        }
    }

    fn is_desert(&self) -> bool {
        true
    }

    fn add_beaches(&mut self) {}

    fn add_forests(&mut self, _map_parameters: &MapParameters) {}
}

#[cfg(test)]
mod tests {
    use super::Deserts;
    use crate::{map_generator::Generator, map_parameters::MapParameters};

    #[test]
    fn deserts_are_dry() {
        let map_parameters = MapParameters {
            rainfall: 0,
            ..Default::default()
        };
        assert_eq!(Deserts::adjust_parameters(&map_parameters).rainfall, -1);
    }
}
