//! Error types
//!
//! Only configuration can fail. Once a show is constructed, stepping,
//! spawning and painting are infallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FireworksError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("particle size must be finite, got {0}")]
    InvalidParticleSize(f32),

    #[error("max_particles must be greater than zero")]
    ZeroParticleCap,

    #[error("explosion particle count {count} exceeds particle cap {cap}")]
    ExplosionExceedsCap { count: usize, cap: usize },
}

pub type Result<T> = std::result::Result<T, FireworksError>;
