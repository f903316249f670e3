//! Decorative star field
//!
//! Generated once from a fixed seed in normalized coordinates, so the layer
//! is identical every frame and scales with the viewport.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::canvas::Canvas;
use crate::color::{channels, with_alpha};
use crate::consts::{STAR_COUNT, STAR_FIELD_SEED, STAR_RADIUS_MAX, STAR_RADIUS_MIN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Position in [0, 1)²
    pub unit_pos: Vec2,
    pub radius: f32,
    /// Relative brightness in (0, 1]
    pub brightness: f32,
}

#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
}

impl Default for StarField {
    fn default() -> Self {
        Self::new(STAR_FIELD_SEED, STAR_COUNT)
    }
}

impl StarField {
    pub fn new(seed: u64, count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                unit_pos: Vec2::new(rng.random::<f32>(), rng.random::<f32>()),
                radius: rng.random_range(STAR_RADIUS_MIN..STAR_RADIUS_MAX),
                brightness: rng.random_range(0.25..=1.0),
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn paint(&self, canvas: &mut impl Canvas, viewport: Vec2, color: u32) {
        let base_alpha = channels(color)[0] as f32 / 255.0;
        for star in &self.stars {
            canvas.fill_circle(
                star.unit_pos * viewport,
                star.radius,
                with_alpha(color, base_alpha * star.brightness),
            );
        }
    }
}
