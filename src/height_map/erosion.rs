//! Drop-walk erosion.
//!
//! Drops fall on random cells, lower them a little and keep flowing into neighbours that are not
//! higher. Pending drops are kept on an explicit stack, so long grooves can't overflow the call
//! stack.

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use crate::{height_map::HeightField, map_parameters::ErosionConfig};

/// Orthogonal neighbour offsets: east, south, west, north.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub struct ErosionSimulator {
    config: ErosionConfig,
}

impl ErosionSimulator {
    pub fn new(config: ErosionConfig) -> Self {
        Self { config }
    }

    /// Number of drops for a given intensity, never negative.
    pub fn iterations(&self, intensity: i32) -> u32 {
        self.config
            .base_iterations
            .saturating_mul(intensity.max(0) as u32)
    }

    /// Drops `iterations` drops on uniformly random cells of `field`.
    pub fn erode(&self, field: &mut HeightField, iterations: u32, random: &mut StdRng) {
        let width = field.width() as i32;
        let height = field.height() as i32;
        if width == 0 || height == 0 {
            return;
        }
        for _ in 0..iterations {
            let x = random.random_range(0..width);
            let y = random.random_range(0..height);
            self.drop_step(field, x, y, random);
        }
    }

    /// Runs a single drop starting at `(x, y)` and every drop it spawns.
    ///
    /// Returns the number of cells that were lowered.
    pub fn drop_step(&self, field: &mut HeightField, x: i32, y: i32, random: &mut StdRng) -> u32 {
        let mut lowered = 0;
        let mut pending = vec![(x, y)];

        while let Some((x, y)) = pending.pop() {
            let current = field.get(x, y);
            if current == HeightField::ABSENT {
                continue;
            }

            let elevation =
                current.round() as i32 - random.random_range(1..=self.config.max_decrement);
            if elevation < self.config.floor {
                continue;
            }

            // Off-grid neighbours count as slightly higher, so drops don't run off the map edge.
            let neighbors = NEIGHBOR_OFFSETS.map(|(dx, dy)| {
                let value = field.get(x + dx, y + dy);
                if value == HeightField::ABSENT {
                    elevation + 1
                } else {
                    value.round() as i32
                }
            });

            let mean = neighbors.iter().sum::<i32>() / 4;
            if mean - self.config.drill_margin > elevation {
                continue;
            }

            field.set(x, y, elevation as f64);
            lowered += 1;

            let candidates: Vec<(i32, i32)> = NEIGHBOR_OFFSETS
                .iter()
                .zip(neighbors)
                .filter(|&(_, neighbor)| {
                    neighbor < elevation || (neighbor == elevation && random.random_bool(0.5))
                })
                .map(|(&offset, _)| offset)
                .collect();

            if candidates.is_empty() {
                continue;
            }

            let next: Vec<(i32, i32)> = if random.random_bool(0.5) {
                candidates.choose(random).into_iter().copied().collect()
            } else {
                candidates
            };

            // Reversed so the first branch is processed first.
            for (dx, dy) in next.into_iter().rev() {
                let (nx, ny) = (x + dx, y + dy);
                if field.get(nx, ny) != HeightField::ABSENT {
                    pending.push((nx, ny));
                }
            }
        }

        lowered
    }
}
