//! Procedural island maps for a city builder.
//!
//! [`generate_map`] synthesizes a height field, erodes it, classifies it into terrain tiles,
//! grows rivers, forests and ore veins on the islands it finds and founds the player's first
//! settlement. The result is a [`GameMap`] that gameplay keeps editing through
//! [`TileGrid::place_building`] and [`TileGrid::bulldoze`].

pub mod error;
pub mod grid;
pub mod height_map;
pub mod map_generator;
pub mod map_parameters;
pub mod tile;
pub mod tile_component;
pub mod tile_map;

pub use error::{Error, Result};
pub use grid::*;
pub use map_parameters::{ElevationThresholds, ErosionConfig, MapParameters, MapType};
pub use tile_component::*;
pub use tile_map::{GameMap, Layer, StartSite, TileGrid, TileState, TileValue};

use log::{info, warn};
use map_generator::{
    Generator, continents::Continents, deserts::Deserts, highlands::Highlands, island::Island,
};

/// Generates a playable map.
///
/// The whole pipeline is rerun until a start site is found. Attempt `n` draws its random
/// numbers from `seed + n`, so the same parameters always give the same map.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] for malformed parameters and
/// [`Error::GenerationExhausted`] when no attempt produced a start site.
pub fn generate_map(map_parameters: &MapParameters) -> Result<GameMap> {
    map_parameters.validate()?;

    let attempts = map_parameters.max_generation_attempts;
    for attempt in 0..attempts {
        let seed = map_parameters.seed.wrapping_add(attempt as u64);
        let result = match map_parameters.map_type {
            MapType::Island => Island::generate(map_parameters, seed),
            MapType::Continents => Continents::generate(map_parameters, seed),
            MapType::Highlands => Highlands::generate(map_parameters, seed),
            MapType::Deserts => Deserts::generate(map_parameters, seed),
        };

        match result {
            Ok(game_map) => {
                let anchor = game_map.start_site.anchor;
                info!(
                    "generated {} map after {} attempt(s), town hall at ({}, {})",
                    map_parameters.map_type.name(),
                    attempt + 1,
                    anchor.x(),
                    anchor.y()
                );
                return Ok(game_map);
            }
            Err(error) if error.is_transient() => {
                warn!("attempt {} of {attempts} failed: {error}", attempt + 1);
            }
            Err(error) => return Err(error),
        }
    }

    Err(Error::GenerationExhausted { attempts })
}
