//! Scalar height fields and the stages that produce them.
//!
//! Heights live on the grey scale: after synthesis every value is in `0..=255`.

use image::{
    GrayImage, ImageBuffer,
    imageops::{FilterType, resize},
};

use crate::grid::Size;

pub mod erosion;
pub mod fractal;
pub mod synthesize;

/// Darkening masks that shape where land can appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    /// Falls off with the distance from the centre, leaving a single island.
    Radial,
    /// A saddle that keeps two opposite quadrants, leaving two continents.
    Hyperbolic,
}

/// A rectangular grid of heights.
///
/// Reading outside of the grid returns [`HeightField::ABSENT`] instead of failing. Writing outside
/// of the grid does nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    size: Size,
    values: Vec<f64>,
    /// Lowest value written through [`HeightField::set`] so far.
    low: f64,
    /// Highest value written through [`HeightField::set`] so far.
    high: f64,
}

impl HeightField {
    /// Marks an absent sample. It is never a valid elevation.
    pub const ABSENT: f64 = -1.0;

    /// Creates a field of zeros. Nothing has been observed yet, so [`HeightField::low`] and
    /// [`HeightField::high`] start empty.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            values: vec![0.0; size.area()],
            low: f64::INFINITY,
            high: f64::NEG_INFINITY,
        }
    }

    /// Creates a field from row-major values. Returns `None` when the length doesn't match `size`.
    pub fn from_values(size: Size, values: Vec<f64>) -> Option<Self> {
        if values.len() != size.area() {
            return None;
        }
        let mut field = Self {
            size,
            values,
            low: f64::INFINITY,
            high: f64::NEG_INFINITY,
        };
        field.recompute_bounds();
        Some(field)
    }

    pub fn filled(size: Size, value: f64) -> Self {
        let mut field = Self::new(size);
        field.values.fill(value);
        field.recompute_bounds();
        field
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            None
        } else {
            Some(y as usize * self.size.width as usize + x as usize)
        }
    }

    /// Returns the value at `(x, y)`, or [`HeightField::ABSENT`] outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f64 {
        self.index(x, y)
            .map_or(Self::ABSENT, |index| self.values[index])
    }

    /// Writes `value` at `(x, y)` and records it in the running bounds. No-op outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: f64) {
        if let Some(index) = self.index(x, y) {
            self.values[index] = value;
            self.low = self.low.min(value);
            self.high = self.high.max(value);
        }
    }

    /// Grey elevation at `(x, y)` in `0..=255`, or `-1` outside the grid.
    #[inline]
    pub fn gray(&self, x: i32, y: i32) -> i32 {
        match self.index(x, y) {
            Some(index) => self.values[index].round().clamp(0.0, 255.0) as i32,
            None => Self::ABSENT as i32,
        }
    }

    /// Mean of the samples that are not [`HeightField::ABSENT`], or `ABSENT` if none is left.
    pub fn average(values: &[f64]) -> f64 {
        let (sum, count) = values
            .iter()
            .filter(|&&value| value != Self::ABSENT)
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
        if count == 0 {
            Self::ABSENT
        } else {
            sum / count as f64
        }
    }

    /// Resets the running bounds to the actual minimum and maximum of the field.
    pub fn recompute_bounds(&mut self) {
        let (low, high) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &value| {
                (low.min(value), high.max(value))
            });
        self.low = low;
        self.high = high;
    }

    /// Shifts the field so that the lowest observed value becomes `0`.
    pub fn normalize(&mut self) {
        if !self.low.is_finite() {
            return;
        }
        let low = self.low;
        self.values.iter_mut().for_each(|value| *value -= low);
        self.recompute_bounds();
    }

    /// Linearly maps the field onto `[0, ceiling]`. A flat field becomes all zeros.
    pub fn rescale(&mut self, ceiling: f64) {
        self.recompute_bounds();
        let (low, high) = (self.low, self.high);
        let span = high - low;
        self.values.iter_mut().for_each(|value| {
            *value = if span > 0.0 {
                (*value - low) / span * ceiling
            } else {
                0.0
            };
        });
        self.recompute_bounds();
    }

    /// Stretches the values around the grey midpoint:
    /// `new = clamp(factor * (old - 128) + 128 + brightness, 0, 255)`, truncated to whole steps.
    pub fn increase_contrast(&mut self, factor: f64, brightness: f64) {
        const MIDPOINT: f64 = 128.0;
        self.values.iter_mut().for_each(|value| {
            *value = (factor * (*value - MIDPOINT) + MIDPOINT + brightness)
                .trunc()
                .clamp(0.0, 255.0);
        });
        self.recompute_bounds();
    }

    /// Multiplies every cell by the mask falloff. A masked cell never ends up brighter than it was.
    pub fn apply_mask(&mut self, mask: Mask) {
        let width = self.size.width as f64;
        let height = self.size.height as f64;
        let half_width = width / 2.0;
        let half_height = height / 2.0;

        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let falloff = match mask {
                    Mask::Radial => {
                        let distance =
                            ((x as f64 - half_width).powi(2) + (y as f64 - half_height).powi(2))
                                .sqrt();
                        (1.0 - distance / half_width).max(0.0) * 2.5
                    }
                    Mask::Hyperbolic => {
                        let u = x as f64 / half_width - 1.0;
                        let v = y as f64 / half_height - 1.0;
                        (u * u - v * v) * 2.0 + 0.5
                    }
                };
                let index = y as usize * self.size.width as usize + x as usize;
                let original = self.values[index];
                let masked = (original * falloff).max(0.0).round();
                self.values[index] = masked.min(original);
            }
        }
        self.recompute_bounds();
    }

    pub fn to_gray_image(&self) -> GrayImage {
        ImageBuffer::from_fn(self.size.width, self.size.height, |x, y| {
            image::Luma([self.gray(x as i32, y as i32) as u8])
        })
    }

    /// Resamples the field to `target` with a triangle filter, working on the grey scale.
    pub fn resize(&self, target: Size) -> HeightField {
        if target == self.size {
            return self.clone();
        }
        let resized = resize(
            &self.to_gray_image(),
            target.width,
            target.height,
            FilterType::Triangle,
        );
        let values = resized.pixels().map(|pixel| pixel[0] as f64).collect();
        let mut field = Self {
            size: target,
            values,
            low: f64::INFINITY,
            high: f64::NEG_INFINITY,
        };
        field.recompute_bounds();
        field
    }
}
