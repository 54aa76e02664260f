//! Diamond-square midpoint displacement, the noise source of the terrain synthesizer.

use bitflags::bitflags;
use rand::{Rng, rngs::StdRng};

use crate::{
    error::{Error, Result},
    grid::Size,
    height_map::HeightField,
    map_parameters::MAX_RESOLUTION_EXPONENT,
};

bitflags! {
    /// Flags for [`DiamondSquare`]. They pin some of the seed vertices before displacement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FractalFlags: u8 {
        /// The four corners start at the lowest value, so the map edges tend to be low.
        const POLAR = 0b00000001;
        /// The centre starts at the highest value.
        const CENTER_PEAK = 0b00000010;
    }
}

pub struct DiamondSquare {
    /// The field side is `2^exponent + 1`.
    exponent: u32,
    /// Displacement amplitude kept from one level to the next, in `(0, 1]`.
    roughness: f64,
    flags: FractalFlags,
}

impl DiamondSquare {
    /// Creates a generator for a `(2^exponent + 1)²` field.
    ///
    /// # Errors
    ///
    /// Fails when `exponent` is `0` or larger than [`MAX_RESOLUTION_EXPONENT`], or when `roughness`
    /// is outside `(0, 1]`.
    pub fn new(exponent: u32, roughness: f64, flags: FractalFlags) -> Result<Self> {
        if exponent == 0 || exponent > MAX_RESOLUTION_EXPONENT {
            return Err(Error::NoiseSynthesis(format!(
                "fractal exponent must be in 1..={MAX_RESOLUTION_EXPONENT}, got {exponent}"
            )));
        }
        if !(roughness > 0.0 && roughness <= 1.0) {
            return Err(Error::NoiseSynthesis(format!(
                "roughness must be in (0, 1], got {roughness}"
            )));
        }
        Ok(Self {
            exponent,
            roughness,
            flags,
        })
    }

    /// Smallest exponent whose field covers `resolution` cells per side.
    pub fn exponent_for(resolution: u32) -> u32 {
        resolution.max(2).next_power_of_two().trailing_zeros()
    }

    pub fn side(&self) -> u32 {
        (1 << self.exponent) + 1
    }

    /// Runs the displacement and shifts the result so its lowest value is `0`.
    pub fn generate(&self, random: &mut StdRng) -> HeightField {
        let side = self.side() as i32;
        let mut field = HeightField::new(Size::new(side as u32, side as u32));

        let last = side - 1;
        for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
            let value = if self.flags.contains(FractalFlags::POLAR) {
                0.0
            } else {
                random.random::<f64>()
            };
            field.set(x, y, value);
        }

        let mut step = last;
        let mut amplitude = 1.0;
        while step > 1 {
            let half = step / 2;

            // Diamond step, the centre of every square.
            for y in (half..side).step_by(step as usize) {
                for x in (half..side).step_by(step as usize) {
                    let average = HeightField::average(&[
                        field.get(x - half, y - half),
                        field.get(x + half, y - half),
                        field.get(x - half, y + half),
                        field.get(x + half, y + half),
                    ]);
                    field.set(x, y, average + random.random_range(-amplitude..amplitude));
                }
            }

            if step == last && self.flags.contains(FractalFlags::CENTER_PEAK) {
                field.set(half, half, 1.0 + amplitude);
            }

            // Square step, the midpoint of every edge. Neighbours off the field are absent.
            for y in (0..side).step_by(half as usize) {
                let first_x = if (y / half) % 2 == 0 { half } else { 0 };
                for x in (first_x..side).step_by(step as usize) {
                    let average = HeightField::average(&[
                        field.get(x - half, y),
                        field.get(x + half, y),
                        field.get(x, y - half),
                        field.get(x, y + half),
                    ]);
                    field.set(x, y, average + random.random_range(-amplitude..amplitude));
                }
            }

            step = half;
            amplitude *= self.roughness;
        }

        field.normalize();
        field
    }
}
