//! Show settings
//!
//! Constructor-time configuration for the simulation and the painter.
//! Persisted as JSON; every field is optional and falls back to its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{FireworksError, Result};

/// Show configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Spawning ===
    /// Automatic launch period in milliseconds (0 disables)
    pub auto_launch_interval_ms: u64,
    /// Manual launch debounce in milliseconds (0 disables manual launches)
    pub manual_spawn_timeout_ms: u64,

    // === Explosions ===
    /// Particles created per exploding rocket
    pub explosion_particle_count: usize,
    /// Particle sprite/stroke size (clamped to >= 1)
    pub particle_size: f32,
    /// Upper bound on live particles; explosions are truncated past it
    pub max_particles: usize,

    // === Decoration ===
    pub with_background: bool,
    /// Packed 0xAARRGGBB
    pub background_color: u32,
    pub with_star_field: bool,
    /// Packed 0xAARRGGBB
    pub star_color: u32,

    /// Simulation RNG seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_launch_interval_ms: DEFAULT_AUTO_LAUNCH_INTERVAL_MS,
            manual_spawn_timeout_ms: DEFAULT_MANUAL_SPAWN_TIMEOUT_MS,

            explosion_particle_count: DEFAULT_EXPLOSION_PARTICLE_COUNT,
            particle_size: DEFAULT_PARTICLE_SIZE,
            max_particles: DEFAULT_MAX_PARTICLES,

            with_background: false,
            background_color: DEFAULT_BACKGROUND_COLOR,
            with_star_field: false,
            star_color: DEFAULT_STAR_COLOR,

            seed: 0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check preconditions and apply corrections
    ///
    /// `particle_size` below the minimum is raised to it; structurally
    /// impossible configurations are rejected.
    pub fn validate(mut self) -> Result<Self> {
        if !self.particle_size.is_finite() {
            return Err(FireworksError::InvalidParticleSize(self.particle_size));
        }
        if self.particle_size < MIN_PARTICLE_SIZE {
            log::debug!(
                "particle_size {} raised to {}",
                self.particle_size,
                MIN_PARTICLE_SIZE
            );
            self.particle_size = MIN_PARTICLE_SIZE;
        }
        if self.max_particles == 0 {
            return Err(FireworksError::ZeroParticleCap);
        }
        if self.explosion_particle_count > self.max_particles {
            return Err(FireworksError::ExplosionExceedsCap {
                count: self.explosion_particle_count,
                cap: self.max_particles,
            });
        }
        Ok(self)
    }

    pub fn auto_launch_interval(&self) -> Duration {
        Duration::from_millis(self.auto_launch_interval_ms)
    }

    pub fn manual_spawn_timeout(&self) -> Duration {
        Duration::from_millis(self.manual_spawn_timeout_ms)
    }
}
