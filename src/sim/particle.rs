//! Explosion particles

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::trail::{Trail, Trailed};
use crate::color::{hsl, with_alpha};
use crate::consts::*;
use crate::wrap_hue;

/// A fading spark thrown out by an explosion
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec2,
    trail: Trail,
    size: f32,
    /// Heading, fixed at birth
    angle: f32,
    /// Speed along `angle`, decays by friction each frame
    speed: f32,
    gravity: f32,
    hue: f32,
    base_color: u32,
    alpha: f32,
    alpha_decay: f32,
}

impl Particle {
    /// A randomized particle seeded from the parent rocket's hue
    pub fn new(rng: &mut impl Rng, origin: Vec2, size: f32, parent_hue: f32) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
        let hue = parent_hue + rng.random_range(-PARTICLE_HUE_SPREAD..=PARTICLE_HUE_SPREAD);
        let lightness = rng.random_range(PARTICLE_LIGHTNESS_MIN..=PARTICLE_LIGHTNESS_MAX);
        let alpha_decay = rng.random_range(PARTICLE_ALPHA_DECAY_MIN..PARTICLE_ALPHA_DECAY_MAX);

        Self::from_parts(origin, size, angle, speed, hue, lightness / 100.0, alpha_decay)
    }

    /// A particle with explicit motion and color parameters
    pub fn from_parts(
        origin: Vec2,
        size: f32,
        angle: f32,
        speed: f32,
        hue: f32,
        lightness: f32,
        alpha_decay: f32,
    ) -> Self {
        let hue = wrap_hue(hue);
        Self {
            position: origin,
            trail: Trail::for_size(size),
            size,
            angle,
            speed,
            gravity: PARTICLE_GRAVITY,
            hue,
            base_color: hsl(hue, 1.0, lightness),
            alpha: 1.0,
            // Non-positive decay would make the particle immortal
            alpha_decay: alpha_decay.max(ALPHA_EPSILON),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn base_color(&self) -> u32 {
        self.base_color
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn alpha_decay(&self) -> f32 {
        self.alpha_decay
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    /// Base color with the live opacity applied
    pub fn render_color(&self) -> u32 {
        with_alpha(self.base_color, self.alpha)
    }
}

impl Trailed for Particle {
    fn update(&mut self) {
        self.trail.push(self.position);

        self.speed *= PARTICLE_FRICTION;
        self.position += Vec2::new(
            self.angle.cos() * self.speed,
            self.angle.sin() * self.speed + self.gravity,
        );

        self.alpha -= self.alpha_decay;
        if self.alpha <= ALPHA_EPSILON {
            self.alpha = 0.0;
        }
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
