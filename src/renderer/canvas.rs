//! Drawing surface abstraction
//!
//! The painter only ever talks to a [`Canvas`]. Hosts implement it on top of
//! their real surface (GPU, 2D context, ...).

use glam::Vec2;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn from_size(size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            size,
        }
    }
}

/// How sprite pixels combine with the per-instance color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Sprite channels multiplied by the instance color
    Modulate,
    SrcOver,
}

/// RGBA8 sprite image shared by every particle instance
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl Sprite {
    /// White disc with a smooth radial falloff to transparent
    pub fn radial(size: u32) -> Self {
        let size = size.max(1);
        let center = size as f32 / 2.0;
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);

        for y in 0..size {
            for x in 0..size {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(Vec2::splat(center));
                let t = (1.0 - d / center).clamp(0.0, 1.0);
                // Smoothstep keeps the core bright and the rim soft
                let a = t * t * (3.0 - 2.0 * t);
                pixels.extend_from_slice(&[255, 255, 255, (a * 255.0).round() as u8]);
            }
        }

        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Per-instance data for one batched sprite draw
#[derive(Debug, Clone, Copy)]
pub struct SpriteBatch<'a> {
    pub rects: &'a [super::batch::SpriteRect],
    pub transforms: &'a [super::batch::RsTransform],
    /// Packed 0xAARRGGBB
    pub colors: &'a [u32],
}

impl SpriteBatch<'_> {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Draw-command consumer
///
/// Colors are packed 0xAARRGGBB.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: u32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: u32);
    /// Draw `batch.len()` instances of `sprite` in a single call
    fn draw_atlas(&mut self, sprite: &Sprite, batch: SpriteBatch<'_>, blend: BlendMode);
}

/// A recorded draw command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: u32 },
    FillCircle { center: Vec2, radius: f32, color: u32 },
    StrokeLine { from: Vec2, to: Vec2, width: f32, color: u32 },
    Atlas { instances: usize, blend: BlendMode, colors: Vec<u32> },
}

/// Canvas that records commands instead of drawing them
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn atlas_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Atlas { .. }))
            .count()
    }

    pub fn line_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: u32) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32) {
        self.commands
            .push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: u32) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_atlas(&mut self, _sprite: &Sprite, batch: SpriteBatch<'_>, blend: BlendMode) {
        self.commands.push(DrawCommand::Atlas {
            instances: batch.len(),
            blend,
            colors: batch.colors.to_vec(),
        });
    }
}
