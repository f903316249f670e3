//! Rendering module
//!
//! Turns simulation state into draw commands for a host [`Canvas`]. Particles
//! are packed into reusable instance buffers and drawn with one atlas call.

pub mod batch;
pub mod canvas;
pub mod painter;
pub mod starfield;

pub use batch::{BatchRenderBuilder, RsTransform, SpriteRect};
pub use canvas::{BlendMode, Canvas, DrawCommand, Rect, RecordingCanvas, Sprite, SpriteBatch};
pub use painter::FireworksPainter;
pub use starfield::{Star, StarField};
