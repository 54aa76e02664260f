use crate::{
    generate_common_methods, height_map::synthesize::ShapeMode, map_parameters::MapParameters,
    tile_map::TileMap,
};

use super::Generator;

/// Two land masses facing each other across a diagonal strait.
pub struct Continents(TileMap);

impl Generator for Continents {
    generate_common_methods!();

    fn shape_mode(&self) -> ShapeMode {
        ShapeMode::Hyperbolic
    }

    /// Continents are wetter than the user asked for.
    fn adjust_parameters(map_parameters: &MapParameters) -> MapParameters {
        MapParameters {
            rainfall: map_parameters.rainfall.saturating_add(1),
            ..map_parameters.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Continents;
    use crate::{map_generator::Generator, map_parameters::MapParameters};

    #[test]
    fn continents_get_extra_rain() {
        let map_parameters = MapParameters {
            rainfall: 1,
            ..Default::default()
        };
        assert_eq!(Continents::adjust_parameters(&map_parameters).rainfall, 2);

        let map_parameters = MapParameters {
            rainfall: i32::MAX,
            ..map_parameters
        };
        assert_eq!(
            Continents::adjust_parameters(&map_parameters).rainfall,
            i32::MAX
        );
    }
}
