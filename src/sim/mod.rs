//! Fireworks simulation module
//!
//! All motion and lifecycle logic lives here. This module must stay
//! deterministic and free of rendering concerns:
//! - One `update` per entity per frame
//! - Seeded RNG only, owned by the engine
//! - Removal happens only in the engine's end-of-frame sweeps

pub mod engine;
pub mod observer;
pub mod particle;
pub mod rocket;
pub mod spawner;
pub mod trail;

pub use engine::{FrameStats, SimulationEngine};
pub use observer::{ListenerId, Listeners};
pub use particle::Particle;
pub use rocket::Rocket;
pub use spawner::{LaunchRequest, Spawner};
pub use trail::{Trail, Trailed};
