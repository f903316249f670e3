//! Fireworks - a rocket/particle fireworks display
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (rockets, particles, spawning, lifecycle)
//! - `renderer`: Draw-command generation and batched particle buffers
//! - `show`: Host-facing facade tying the simulation to a canvas
//! - `settings`: Serializable configuration with validation
//! - `color`: Packed ARGB color helpers

pub mod color;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod show;
pub mod sim;

pub use error::{FireworksError, Result};
pub use settings::Settings;
pub use show::FireworkShow;

/// Simulation and rendering tuning constants
///
/// All motion values are per frame, in logical pixels, with y growing
/// downward (screen space).
pub mod consts {
    /// Rocket speed range (pixels per frame)
    pub const ROCKET_SPEED_MIN: f32 = 6.0;
    pub const ROCKET_SPEED_MAX: f32 = 10.0;
    /// Slowest rocket `from_parts` accepts, so every rocket arrives
    pub const ROCKET_SPEED_FLOOR: f32 = 0.1;
    /// Rocket lightness range (percent)
    pub const ROCKET_LIGHTNESS_MIN: f32 = 50.0;
    pub const ROCKET_LIGHTNESS_MAX: f32 = 70.0;

    /// Particle launch speed range (pixels per frame)
    pub const PARTICLE_SPEED_MIN: f32 = 1.0;
    pub const PARTICLE_SPEED_MAX: f32 = 11.0;
    /// Multiplicative speed decay per frame
    pub const PARTICLE_FRICTION: f32 = 0.96;
    /// Constant downward drift added every frame
    pub const PARTICLE_GRAVITY: f32 = 1.0;
    /// Hue offset from the parent rocket (± degrees)
    pub const PARTICLE_HUE_SPREAD: f32 = 20.0;
    pub const PARTICLE_LIGHTNESS_MIN: f32 = 50.0;
    pub const PARTICLE_LIGHTNESS_MAX: f32 = 80.0;
    /// Per-frame opacity decay range
    pub const PARTICLE_ALPHA_DECAY_MIN: f32 = 0.015;
    pub const PARTICLE_ALPHA_DECAY_MAX: f32 = 0.03;
    /// Opacity below this is treated as fully faded
    pub const ALPHA_EPSILON: f32 = 1e-5;

    /// Global hue advance per frame (degrees)
    pub const HUE_STEP_MIN: f32 = 0.5;
    pub const HUE_STEP_MAX: f32 = 1.5;

    /// Auto-launched rockets target the upper 4/7 of the viewport
    pub const AUTO_TARGET_HEIGHT_FRACTION: f32 = 4.0 / 7.0;

    /// Trail points retained per unit of entity size
    pub const TRAIL_PER_SIZE: f32 = 1.5;
    pub const TRAIL_MIN: usize = 2;
    pub const TRAIL_MAX: usize = 24;

    /// Configuration defaults
    pub const DEFAULT_AUTO_LAUNCH_INTERVAL_MS: u64 = 1000;
    pub const DEFAULT_MANUAL_SPAWN_TIMEOUT_MS: u64 = 420;
    pub const DEFAULT_EXPLOSION_PARTICLE_COUNT: usize = 160;
    pub const DEFAULT_PARTICLE_SIZE: f32 = 3.5;
    pub const MIN_PARTICLE_SIZE: f32 = 1.0;
    pub const DEFAULT_MAX_PARTICLES: usize = 20_000;
    pub const DEFAULT_BACKGROUND_COLOR: u32 = 0xFF00_0000;
    pub const DEFAULT_STAR_COLOR: u32 = 0xFFFF_FFFF;

    /// Generated particle sprite edge length (pixels)
    pub const SPRITE_SIZE: u32 = 32;

    /// Star field layer
    pub const STAR_FIELD_SEED: u64 = 0x5EED_F1E1_D000_0001;
    pub const STAR_COUNT: usize = 140;
    pub const STAR_RADIUS_MIN: f32 = 0.4;
    pub const STAR_RADIUS_MAX: f32 = 1.4;
}

/// Wrap a hue in degrees to [0, 360)
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Trail capacity for an entity of the given size
#[inline]
pub fn trail_capacity_for(size: f32) -> usize {
    use consts::{TRAIL_MAX, TRAIL_MIN, TRAIL_PER_SIZE};
    let raw = (size * TRAIL_PER_SIZE).round();
    if raw.is_finite() && raw > 0.0 {
        (raw as usize).clamp(TRAIL_MIN, TRAIL_MAX)
    } else {
        TRAIL_MIN
    }
}
