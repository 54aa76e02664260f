use std::{
    ops::RangeInclusive,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::Size,
    tile_component::Terrain,
};

/// The largest noise exponent the synthesizer accepts, the field side is at most `2^8` cells.
pub const MAX_RESOLUTION_EXPONENT: u32 = 8;

/// Accepted values of the `rainfall` and `resources` tunables.
pub const TUNABLE_RANGE: RangeInclusive<i32> = 0..=10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapParameters {
    pub map_type: MapType,
    /// Higher rainfall means more erosion, rivers and forests. The menu offers `0..=2`.
    pub rainfall: i32,
    /// Higher values seed more ore veins. The menu offers `0..=2`.
    pub resources: i32,
    /// Controls the grid resolution, see [`MapParameters::resolution`].
    pub size: u32,
    pub seed: u64,
    /// The whole pipeline is rerun until a start site is found, at most this many times.
    pub max_generation_attempts: u32,
    /// Amplitude kept per diamond-square level, in `(0, 1]`. Higher is rougher.
    pub roughness: f64,
    pub thresholds: ElevationThresholds,
    pub erosion: ErosionConfig,
    /// Visible part of the map in tiles, used to centre the camera on the start site.
    pub viewport: Size,
    /// Islands with at most this many tiles are not playable.
    /// When `None`, it is derived from the map area, see [`MapParameters::playable_island_size`].
    pub min_playable_island_size: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapType {
    /// A single island in the middle of the ocean.
    Island,
    /// Two land masses split along the diagonals.
    Continents,
    /// Land everywhere, treated as one landmass.
    Highlands,
    /// An island whose land is mostly sand.
    Deserts,
}

impl MapType {
    pub fn name(&self) -> &str {
        match self {
            MapType::Island => "Island",
            MapType::Continents => "Continents",
            MapType::Highlands => "Highlands",
            MapType::Deserts => "Deserts",
        }
    }
}

/// Grey-level boundaries between the terrain bands, each band is `[previous, boundary)`.
///
/// Elevation at or above `ground` is snow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationThresholds {
    pub ocean: i32,
    pub shore: i32,
    pub sand: i32,
    pub grass: i32,
    pub ground: i32,
}

impl Default for ElevationThresholds {
    fn default() -> Self {
        Self {
            ocean: 50,
            shore: 100,
            sand: 100,
            grass: 200,
            ground: 230,
        }
    }
}

impl ElevationThresholds {
    /// Maps a grey elevation to its terrain band.
    ///
    /// In desert mode everything from the shore band upwards becomes sand.
    pub fn classify(&self, elevation: i32, desert: bool) -> Terrain {
        if elevation < self.ocean {
            Terrain::Ocean
        } else if elevation < self.shore {
            Terrain::Shore
        } else if desert || elevation < self.sand {
            Terrain::Sand
        } else if elevation < self.grass {
            Terrain::Grass
        } else if elevation < self.ground {
            Terrain::Ground
        } else {
            Terrain::Snow
        }
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = [self.ocean, self.shore, self.sand, self.grass, self.ground];
        if bounds.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(Error::InvalidConfiguration(format!(
                "elevation thresholds must be non-decreasing, got {bounds:?}"
            )));
        }
        Ok(())
    }
}

/// Parameters of the drop-walk erosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionConfig {
    /// Drops per unit of erosion intensity.
    pub base_iterations: u32,
    /// A drop that would lower a cell below this elevation is absorbed.
    pub floor: i32,
    /// Each drop lowers its cell by `1..=max_decrement`.
    pub max_decrement: i32,
    /// A drop aborts when the mean of its neighbours exceeds the lowered cell by more than this.
    pub drill_margin: i32,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            base_iterations: 10_000,
            floor: 20,
            max_decrement: 2,
            drill_margin: 2,
        }
    }
}

impl ErosionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_decrement < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "erosion max_decrement must be at least 1, got {}",
                self.max_decrement
            )));
        }
        Ok(())
    }
}

impl MapParameters {
    /// Parses parameters from JSON, missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let map_parameters: MapParameters = serde_json::from_str(json)?;
        map_parameters.validate()?;
        Ok(map_parameters)
    }

    /// Side length of the height field and the tile grid: `2^(5 + 2 * size)`, capped at `2^8`.
    pub fn resolution(&self) -> u32 {
        let exponent = 5u32.saturating_add(self.size.saturating_mul(2));
        1 << exponent.min(MAX_RESOLUTION_EXPONENT)
    }

    pub fn map_size(&self) -> Size {
        let resolution = self.resolution();
        Size::new(resolution, resolution)
    }

    /// Minimum island size, exclusive, for an island to host the start site.
    pub fn playable_island_size(&self) -> u32 {
        const AREA_PER_PLAYABLE_TILE: usize = 40;
        self.min_playable_island_size
            .unwrap_or((self.map_size().area() / AREA_PER_PLAYABLE_TILE) as u32)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_generation_attempts == 0 {
            return Err(Error::InvalidConfiguration(
                "max_generation_attempts must be positive".to_string(),
            ));
        }
        if !(self.roughness > 0.0 && self.roughness <= 1.0) {
            return Err(Error::InvalidConfiguration(format!(
                "roughness must be in (0, 1], got {}",
                self.roughness
            )));
        }
        for (name, value) in [("rainfall", self.rainfall), ("resources", self.resources)] {
            if !TUNABLE_RANGE.contains(&value) {
                return Err(Error::InvalidConfiguration(format!(
                    "{name} must be in {TUNABLE_RANGE:?}, got {value}"
                )));
            }
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::InvalidConfiguration(
                "viewport must not be empty".to_string(),
            ));
        }
        self.thresholds.validate()?;
        self.erosion.validate()
    }
}

impl Default for MapParameters {
    fn default() -> Self {
        Self {
            map_type: MapType::Island,
            rainfall: 1,
            resources: 1,
            size: 1,
            seed: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|duration| duration.as_millis() as u64)
                .unwrap_or_default(),
            max_generation_attempts: 50,
            roughness: 0.45,
            thresholds: ElevationThresholds::default(),
            erosion: ErosionConfig::default(),
            viewport: Size::new(40, 28),
            min_playable_island_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_capped() {
        let mut map_parameters = MapParameters::default();
        let expected = [32, 128, 256, 256];
        for (size, resolution) in expected.into_iter().enumerate() {
            map_parameters.size = size as u32;
            assert_eq!(map_parameters.resolution(), resolution);
        }
        map_parameters.size = u32::MAX;
        assert_eq!(map_parameters.resolution(), 256);
    }

    #[test]
    fn playable_size_scales_with_area() {
        let map_parameters = MapParameters {
            size: 1,
            ..Default::default()
        };
        assert_eq!(map_parameters.playable_island_size(), 409);
        let map_parameters = MapParameters {
            min_playable_island_size: Some(12),
            ..map_parameters
        };
        assert_eq!(map_parameters.playable_island_size(), 12);
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let map_parameters =
            MapParameters::from_json(r#"{"map_type": "Continents", "rainfall": 2, "seed": 7}"#)
                .unwrap();
        assert_eq!(map_parameters.map_type, MapType::Continents);
        assert_eq!(map_parameters.rainfall, 2);
        assert_eq!(map_parameters.seed, 7);
        assert_eq!(map_parameters.thresholds, ElevationThresholds::default());
        assert_eq!(map_parameters.viewport, Size::new(40, 28));
    }

    #[test]
    fn malformed_configuration_is_rejected() {
        let thresholds = r#"{"thresholds": {"ocean": 120, "shore": 100}}"#;
        assert!(matches!(
            MapParameters::from_json(thresholds),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MapParameters::from_json(r#"{"roughness": 0.0}"#),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MapParameters::from_json(r#"{"rainfall": 2147483647}"#),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MapParameters::from_json(r#"{"resources": -1}"#),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MapParameters::from_json(r#"{"rainfall": "wet"}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn ramp_classification_never_gets_milder() {
        let thresholds = ElevationThresholds::default();
        for desert in [false, true] {
            let ranks: Vec<u8> = (0..=255)
                .map(|elevation| thresholds.classify(elevation, desert).harshness_rank())
                .collect();
            assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }
}
