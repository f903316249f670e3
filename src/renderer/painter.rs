//! Frame painter
//!
//! Layer order: background, star field, rockets, particle batch. Rockets are
//! few, so each gets its own stroke; particles always go out as one atlas draw.

use glam::Vec2;

use super::batch::BatchRenderBuilder;
use super::canvas::{BlendMode, Canvas, Rect, Sprite};
use super::starfield::StarField;
use crate::settings::Settings;
use crate::sim::{Rocket, SimulationEngine, Trailed};

#[derive(Debug)]
pub struct FireworksPainter {
    batch: BatchRenderBuilder,
    star_field: Option<StarField>,
    background: Option<u32>,
    star_color: u32,
}

impl FireworksPainter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            batch: BatchRenderBuilder::new(),
            star_field: settings.with_star_field.then(StarField::default),
            background: settings.with_background.then_some(settings.background_color),
            star_color: settings.star_color,
        }
    }

    /// Paint one frame of `engine`'s current state
    ///
    /// Particles are skipped while no sprite is available.
    pub fn paint(
        &mut self,
        canvas: &mut impl Canvas,
        engine: &SimulationEngine,
        sprite: Option<&Sprite>,
    ) {
        let viewport = engine.viewport_size();

        if let Some(color) = self.background {
            canvas.fill_rect(Rect::from_size(viewport), color);
        }
        if let Some(star_field) = &self.star_field {
            star_field.paint(canvas, viewport, self.star_color);
        }

        for rocket in engine.rockets() {
            paint_rocket(canvas, rocket);
        }

        let Some(sprite) = sprite else {
            self.batch.clear();
            return;
        };
        let batch = self.batch.build(engine.particles(), sprite.extent());
        if !batch.is_empty() {
            canvas.draw_atlas(sprite, batch, BlendMode::Modulate);
        }
    }

    pub fn batch(&self) -> &BatchRenderBuilder {
        &self.batch
    }

    /// Free the batch buffers
    pub fn release(&mut self) {
        self.batch.release();
    }
}

/// Stroke from the oldest retained trail point to the current position
fn paint_rocket(canvas: &mut impl Canvas, rocket: &Rocket) {
    let head = rocket.position();
    let tail: Vec2 = rocket.trail().oldest().unwrap_or(head);
    canvas.stroke_line(tail, head, rocket.size(), rocket.base_color());
}
