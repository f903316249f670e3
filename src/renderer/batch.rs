//! Particle instance buffers for a single batched sprite draw
//!
//! Three parallel, fixed-stride buffers are filled once per frame: sprite
//! source rect, RS transform and packed color. Backing storage only grows;
//! frames that stay at or below the previous peak allocate nothing.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::canvas::SpriteBatch;
use crate::sim::{Particle, Trailed};

/// Source rectangle into the sprite image (4 floats)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Rotation-scale-translate transform (4 floats)
///
/// `scos`/`ssin` are `scale * cos(rotation)` and `scale * sin(rotation)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RsTransform {
    pub scos: f32,
    pub ssin: f32,
    pub tx: f32,
    pub ty: f32,
}

impl RsTransform {
    /// Transform mapping `anchor` (sprite space) onto `translate` (canvas space)
    pub fn from_components(rotation: f32, scale: f32, anchor: Vec2, translate: Vec2) -> Self {
        let scos = rotation.cos() * scale;
        let ssin = rotation.sin() * scale;
        Self {
            scos,
            ssin,
            tx: translate.x - scos * anchor.x + ssin * anchor.y,
            ty: translate.y - ssin * anchor.x - scos * anchor.y,
        }
    }

    /// Map a sprite-space point to canvas space
    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.scos * point.x - self.ssin * point.y + self.tx,
            self.ssin * point.x + self.scos * point.y + self.ty,
        )
    }
}

/// Growth-only scratch buffers for the particle batch
#[derive(Debug, Default)]
pub struct BatchRenderBuilder {
    rects: Vec<SpriteRect>,
    transforms: Vec<RsTransform>,
    colors: Vec<u32>,
    /// Instances written by the last `build`
    len: usize,
    growths: usize,
}

impl BatchRenderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances the buffers can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.colors.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of reallocations so far
    pub fn growths(&self) -> usize {
        self.growths
    }

    /// Fill the buffers from the live particles and return the batch view
    pub fn build(&mut self, particles: &[Particle], sprite_extent: Vec2) -> SpriteBatch<'_> {
        let count = particles.len();
        self.reserve(count);

        let source = SpriteRect {
            x: 0.0,
            y: 0.0,
            w: sprite_extent.x,
            h: sprite_extent.y,
        };
        let anchor = sprite_extent / 2.0;
        let sprite_width = sprite_extent.x.max(1.0);

        for (i, particle) in particles.iter().enumerate() {
            self.rects[i] = source;
            self.transforms[i] = RsTransform::from_components(
                heading(particle),
                particle.size() / sprite_width,
                anchor,
                particle.position(),
            );
            self.colors[i] = particle.render_color();
        }
        self.len = count;

        self.batch()
    }

    /// View of the most recently built batch
    pub fn batch(&self) -> SpriteBatch<'_> {
        SpriteBatch {
            rects: &self.rects[..self.len],
            transforms: &self.transforms[..self.len],
            colors: &self.colors[..self.len],
        }
    }

    /// Source rects as a flat stride-4 float buffer
    pub fn rect_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.rects[..self.len])
    }

    /// Transforms as a flat stride-4 float buffer
    pub fn transform_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.transforms[..self.len])
    }

    /// Colors as raw bytes for upload
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors[..self.len])
    }

    /// Empty the batch view; storage is kept
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Free all backing storage
    pub fn release(&mut self) {
        *self = Self {
            growths: self.growths,
            ..Self::default()
        };
    }

    /// Reallocate all three buffers together when `count` exceeds capacity
    fn reserve(&mut self, count: usize) {
        if count <= self.capacity() {
            return;
        }
        log::debug!("Particle batch grows {} -> {count}", self.capacity());
        self.rects = vec![SpriteRect::zeroed(); count];
        self.transforms = vec![RsTransform::zeroed(); count];
        self.colors = vec![0; count];
        self.growths += 1;
    }
}

/// Direction of travel since the last frame, falling back to the launch angle
fn heading(particle: &Particle) -> f32 {
    particle
        .trail()
        .newest()
        .map(|prev| particle.position() - prev)
        .filter(|d| d.length_squared() > f32::EPSILON)
        .map_or(particle.angle(), |d| d.y.atan2(d.x))
}
