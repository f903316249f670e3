//! Rockets flying from a launch point toward their burst point

use glam::Vec2;
use rand::Rng;

use super::trail::{Trail, Trailed};
use crate::color::{hsl, hue_of};
use crate::consts::*;
use crate::wrap_hue;

/// Fallback direction when start and target coincide
const DEGENERATE_DIRECTION: Vec2 = Vec2::NEG_Y;

/// A rocket on its way to exploding
#[derive(Debug, Clone)]
pub struct Rocket {
    position: Vec2,
    trail: Trail,
    size: f32,
    start: Vec2,
    target: Vec2,
    hue: f32,
    base_color: u32,
    velocity: Vec2,
    distance_traveled: f32,
    target_distance: f32,
}

impl Rocket {
    /// Launch a rocket with randomized speed and brightness
    pub fn new(rng: &mut impl Rng, start: Vec2, target: Vec2, size: f32, hue: f32) -> Self {
        let speed = rng.random_range(ROCKET_SPEED_MIN..ROCKET_SPEED_MAX);
        let lightness = rng.random_range(ROCKET_LIGHTNESS_MIN..=ROCKET_LIGHTNESS_MAX);
        Self::from_parts(start, target, size, hue, speed, lightness / 100.0)
    }

    /// Build a rocket from explicit speed and lightness (0-1)
    pub fn from_parts(
        start: Vec2,
        target: Vec2,
        size: f32,
        hue: f32,
        speed: f32,
        lightness: f32,
    ) -> Self {
        let hue = wrap_hue(hue);
        let direction = (target - start)
            .try_normalize()
            .unwrap_or(DEGENERATE_DIRECTION);
        // A non-finite distance could never be reached
        let target_distance = Some(start.distance(target))
            .filter(|d| d.is_finite())
            .unwrap_or(0.0);

        Self {
            position: start,
            trail: Trail::for_size(size),
            size,
            start,
            target,
            hue,
            base_color: hsl(hue, 1.0, lightness),
            velocity: direction * speed.max(ROCKET_SPEED_FLOOR),
            distance_traveled: 0.0,
            target_distance,
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Hue assigned at launch
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Displayed color (opaque ARGB)
    pub fn base_color(&self) -> u32 {
        self.base_color
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    pub fn has_arrived(&self) -> bool {
        self.distance_traveled >= self.target_distance
    }

    /// Hue the explosion is seeded with, read back from the displayed color
    pub fn explosion_hue(&self) -> f32 {
        hue_of(self.base_color)
    }
}

impl Trailed for Rocket {
    fn update(&mut self) {
        self.trail.push(self.position);
        self.position += self.velocity;
        self.distance_traveled += self.velocity.length();
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn trail(&self) -> &Trail {
        &self.trail
    }

    fn size(&self) -> f32 {
        self.size
    }
}
