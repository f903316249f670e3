//! Host-facing facade
//!
//! A [`FireworkShow`] owns the simulation, the painter and the particle
//! sprite. Hosts drive it from a single thread: `advance` once per frame,
//! then `paint` after `advance` has returned.

use std::time::Duration;

use glam::Vec2;

use crate::consts::SPRITE_SIZE;
use crate::error::Result;
use crate::renderer::{Canvas, FireworksPainter, Sprite};
use crate::settings::Settings;
use crate::sim::{FrameStats, LaunchRequest, ListenerId, SimulationEngine};

#[derive(Debug)]
pub struct FireworkShow {
    engine: SimulationEngine,
    painter: FireworksPainter,
    sprite: Option<Sprite>,
}

impl FireworkShow {
    /// Settings are validated once, by the engine
    pub fn new(settings: Settings) -> Result<Self> {
        let engine = SimulationEngine::new(&settings)?;
        let painter = FireworksPainter::new(&settings);
        log::info!(
            "Firework show ready (background={}, stars={})",
            settings.with_background,
            settings.with_star_field
        );
        Ok(Self {
            engine,
            painter,
            sprite: None,
        })
    }

    /// Show with the default generated sprite already attached
    pub fn with_default_sprite(settings: Settings) -> Result<Self> {
        let mut show = Self::new(settings)?;
        show.attach_sprite(Sprite::radial(SPRITE_SIZE));
        Ok(show)
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.engine.set_viewport_size(width, height);
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.engine.advance(elapsed);
    }

    pub fn request_rocket(&mut self, target: Vec2, force: bool) -> LaunchRequest {
        self.engine.request_rocket(target, force)
    }

    /// Install the particle sprite and notify listeners once
    pub fn attach_sprite(&mut self, sprite: Sprite) {
        log::debug!("Sprite attached ({}x{})", sprite.width, sprite.height);
        self.sprite = Some(sprite);
        self.engine.notify_listeners();
    }

    /// Drop the sprite and the batch buffers
    pub fn release_sprite(&mut self) {
        self.sprite = None;
        self.painter.release();
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    pub fn paint(&mut self, canvas: &mut impl Canvas) {
        self.painter
            .paint(canvas, &self.engine, self.sprite.as_ref());
    }

    pub fn add_listener(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.engine.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.engine.remove_listener(id)
    }

    pub fn stats(&self) -> FrameStats {
        self.engine.stats()
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    pub fn painter(&self) -> &FireworksPainter {
        &self.painter
    }
}
