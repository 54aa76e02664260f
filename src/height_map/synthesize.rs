use log::debug;
use rand::rngs::StdRng;

use crate::{
    error::{Error, Result},
    grid::Size,
    height_map::{
        HeightField, Mask,
        erosion::ErosionSimulator,
        fractal::{DiamondSquare, FractalFlags},
    },
    map_parameters::{ErosionConfig, MAX_RESOLUTION_EXPONENT},
};

/// Noise is projected onto `0..=NOISE_CEILING` before the contrast boost.
const NOISE_CEILING: f64 = 233.0;

/// How land is distributed over the synthesized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMode {
    /// Land concentrated around the centre.
    Radial,
    /// Two continents on opposite sides of a saddle.
    Hyperbolic,
    /// No mask, the whole field is lifted instead.
    Plain,
}

impl ShapeMode {
    pub const fn mask(&self) -> Option<Mask> {
        match self {
            ShapeMode::Radial => Some(Mask::Radial),
            ShapeMode::Hyperbolic => Some(Mask::Hyperbolic),
            ShapeMode::Plain => None,
        }
    }

    /// Contrast factor and brightness offset applied after the noise is rescaled.
    pub const fn contrast(&self) -> (f64, f64) {
        match self {
            ShapeMode::Radial => (1.4, 0.0),
            ShapeMode::Hyperbolic => (1.3, 40.0),
            ShapeMode::Plain => (1.3, 100.0),
        }
    }

    /// Erosion intensity before rainfall is added.
    pub const fn erosion_intensity(&self) -> i32 {
        match self {
            ShapeMode::Radial => 4,
            ShapeMode::Hyperbolic => 3,
            ShapeMode::Plain => 6,
        }
    }

    pub const fn fractal_flags(&self) -> FractalFlags {
        match self {
            ShapeMode::Radial => FractalFlags::POLAR.union(FractalFlags::CENTER_PEAK),
            ShapeMode::Hyperbolic => FractalFlags::POLAR,
            ShapeMode::Plain => FractalFlags::empty(),
        }
    }
}

pub struct TerrainSynthesizer {
    erosion: ErosionSimulator,
}

impl TerrainSynthesizer {
    pub fn new(erosion_config: ErosionConfig) -> Self {
        Self {
            erosion: ErosionSimulator::new(erosion_config),
        }
    }

    /// Synthesizes an eroded height field of `resolution × resolution` cells.
    ///
    /// `resolution` is capped at `2^MAX_RESOLUTION_EXPONENT`. Higher `rainfall` erodes more.
    ///
    /// # Errors
    ///
    /// Fails on a zero resolution or when the noise backend rejects its parameters. No partial
    /// field is returned.
    pub fn synthesize(
        &self,
        resolution: u32,
        shape: ShapeMode,
        roughness: f64,
        rainfall: i32,
        random: &mut StdRng,
    ) -> Result<HeightField> {
        if resolution == 0 {
            return Err(Error::InvalidConfiguration(
                "resolution must be positive".to_string(),
            ));
        }
        let resolution = resolution.min(1 << MAX_RESOLUTION_EXPONENT);

        let fractal = DiamondSquare::new(
            DiamondSquare::exponent_for(resolution),
            roughness,
            shape.fractal_flags(),
        )?;
        let mut noise = fractal.generate(random);
        noise.rescale(NOISE_CEILING);

        let mut field = noise.resize(Size::new(resolution, resolution));
        let (factor, brightness) = shape.contrast();
        field.increase_contrast(factor, brightness);
        if let Some(mask) = shape.mask() {
            field.apply_mask(mask);
        }

        let iterations = self
            .erosion
            .iterations(shape.erosion_intensity().saturating_add(rainfall));
        debug!(
            "synthesized {resolution}x{resolution} {shape:?} field, eroding with {iterations} drops"
        );
        self.erosion.erode(&mut field, iterations, random);

        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{ShapeMode, TerrainSynthesizer};
    use crate::{error::Error, map_parameters::ErosionConfig};

    fn synthesizer() -> TerrainSynthesizer {
        TerrainSynthesizer::new(ErosionConfig {
            base_iterations: 200,
            ..Default::default()
        })
    }

    #[test]
    fn produces_a_gray_field_of_the_requested_size() {
        for shape in [ShapeMode::Radial, ShapeMode::Hyperbolic, ShapeMode::Plain] {
            let mut random = StdRng::seed_from_u64(1);
            let field = synthesizer()
                .synthesize(48, shape, 0.45, 1, &mut random)
                .unwrap();
            assert_eq!(field.width(), 48);
            assert_eq!(field.height(), 48);
            assert!(
                field
                    .values()
                    .iter()
                    .all(|&value| (0.0..=255.0).contains(&value) && value.fract() == 0.0)
            );
        }
    }

    #[test]
    fn radial_fields_have_sea_at_the_corners() {
        let mut random = StdRng::seed_from_u64(2);
        let field = synthesizer()
            .synthesize(64, ShapeMode::Radial, 0.45, 1, &mut random)
            .unwrap();
        assert_eq!(field.get(0, 0), 0.0);
        assert_eq!(field.get(63, 63), 0.0);
    }

    #[test]
    fn resolution_is_capped() {
        let mut random = StdRng::seed_from_u64(3);
        let synthesizer = TerrainSynthesizer::new(ErosionConfig {
            base_iterations: 0,
            ..Default::default()
        });
        let field = synthesizer
            .synthesize(1000, ShapeMode::Plain, 0.45, 0, &mut random)
            .unwrap();
        assert_eq!(field.width(), 256);
    }

    #[test]
    fn zero_resolution_is_fatal() {
        let mut random = StdRng::seed_from_u64(4);
        assert!(matches!(
            synthesizer().synthesize(0, ShapeMode::Radial, 0.45, 1, &mut random),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            synthesizer().synthesize(32, ShapeMode::Radial, 0.0, 1, &mut random),
            Err(Error::NoiseSynthesis(_))
        ));
    }
}
