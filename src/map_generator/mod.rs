//! This module defines the `Generator` trait for map generation and provides common methods for map generators.
//!
//! Every map type runs the same pipeline. A generator picks the shape of the terrain, may tweak
//! the user settings and may replace or skip single stages by overriding them.

use crate::{
    error::{Error, Result},
    height_map::{
        HeightField,
        synthesize::{ShapeMode, TerrainSynthesizer},
    },
    map_parameters::MapParameters,
    tile_map::{GameMap, StartSite, TileMap},
};

pub mod continents;
pub mod deserts;
pub mod highlands;
pub mod island;

/// A trait that allows for the generation of a tile map.
///
/// If you want to create a new map generator, you need to implement this trait.
pub trait Generator {
    fn new(map_parameters: &MapParameters, seed: u64) -> Self;

    fn into_inner(self) -> TileMap;

    fn tile_map_mut(&mut self) -> &mut TileMap;

    /// How land is laid out on the height field.
    fn shape_mode(&self) -> ShapeMode;

    /// The settings the pipeline actually runs with, derived from the user's settings.
    fn adjust_parameters(map_parameters: &MapParameters) -> MapParameters
    where
        Self: Sized,
    {
        map_parameters.clone()
    }

    /// Desert maps classify land as sand and accept start sites on sand or snow.
    fn is_desert(&self) -> bool {
        false
    }

    fn synthesize_terrain(&mut self, map_parameters: &MapParameters) -> Result<HeightField> {
        let shape = self.shape_mode();
        let synthesizer = TerrainSynthesizer::new(map_parameters.erosion);
        synthesizer.synthesize(
            map_parameters.resolution(),
            shape,
            map_parameters.roughness,
            map_parameters.rainfall,
            &mut self.tile_map_mut().random_number_generator,
        )
    }

    fn classify_tiles(&mut self, height_field: &HeightField, map_parameters: &MapParameters) {
        let desert = self.is_desert();
        self.tile_map_mut()
            .classify_tiles(height_field, &map_parameters.thresholds, desert);
    }

    fn add_beaches(&mut self) {
        self.tile_map_mut().add_beaches();
    }

    fn smooth_snow(&mut self) {
        self.tile_map_mut().smooth_snow();
    }

    fn find_islands(&mut self) {
        self.tile_map_mut().find_islands();
    }

    fn add_rivers(&mut self, map_parameters: &MapParameters) {
        self.tile_map_mut().add_rivers(map_parameters.rainfall);
    }

    fn add_forests(&mut self, map_parameters: &MapParameters) {
        self.tile_map_mut().add_forests(map_parameters.rainfall);
    }

    fn add_ore_veins(&mut self, map_parameters: &MapParameters) {
        self.tile_map_mut().add_ore_veins(map_parameters.resources);
    }

    fn select_start_site(&mut self, map_parameters: &MapParameters) -> Option<StartSite> {
        let desert = self.is_desert();
        self.tile_map_mut()
            .select_start_site(map_parameters.viewport, desert)
    }

    /// Runs one generation attempt, drawing every random number from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StartSiteNotFound`] when the map has no room for the settlement. The
    /// attempt is lost, a new seed has to be tried.
    fn generate(map_parameters: &MapParameters, seed: u64) -> Result<GameMap>
    where
        Self: Sized,
    {
        let map_parameters = &Self::adjust_parameters(map_parameters);
        let mut map = Self::new(map_parameters, seed);
        // The order of the following methods is important. Do not change it.

        /********** Process 1: Synthesize the Terrain and Classify Tiles **********/
        let height_field = map.synthesize_terrain(map_parameters)?;

        map.classify_tiles(&height_field, map_parameters);
        /********** The End of Process 1 **********/

        /********** Process 2: Smooth the Coasts and Find Islands **********/
        map.add_beaches();

        map.smooth_snow();

        map.find_islands();
        /********** The End of Process 2 **********/

        /********** Process 3: Grow Rivers, Forests and Ore Veins **********/
        map.add_rivers(map_parameters);

        map.add_forests(map_parameters);

        map.add_ore_veins(map_parameters);
        /********** The End of Process 3 **********/

        /********** Process 4: Select the Start Site **********/
        map.select_start_site(map_parameters)
            .ok_or(Error::StartSiteNotFound)?;
        /********** The End of Process 4 **********/

        map.into_inner().into_game_map()
    }
}

/// Generates common methods for a struct.
///
/// This macro generates the following methods:
/// - `new`: Creates a new instance of the struct with the given `MapParameters` and seed.
/// - `into_inner`: Consumes the struct and returns the inner `TileMap`.
/// - `tile_map_mut`: Provides a mutable reference to the inner `TileMap`.
#[macro_export]
macro_rules! generate_common_methods {
    () => {
        /// Creates a new instance of the struct with the given `MapParameters` and seed.
        fn new(map_parameters: &MapParameters, seed: u64) -> Self {
            Self(TileMap::new(map_parameters, seed))
        }

        /// Consumes the struct and returns the inner `TileMap`.
        fn into_inner(self) -> TileMap {
            self.0
        }

        /// Provides a mutable reference to the inner `TileMap`.
        fn tile_map_mut(&mut self) -> &mut TileMap {
            &mut self.0
        }
    };
}
