//! Packed ARGB color helpers
//!
//! Colors are `u32` in `0xAARRGGBB` layout, the format the batched sprite
//! draw consumes directly.

use crate::wrap_hue;

/// Pack 8-bit channels into `0xAARRGGBB`
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split `0xAARRGGBB` into `[a, r, g, b]`
#[inline]
pub const fn channels(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

/// Convert an opacity in [0, 1] to an 8-bit alpha, clamping out-of-range input
#[inline]
pub fn alpha_to_u8(alpha: f32) -> u8 {
    if alpha.is_nan() {
        return 0;
    }
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Replace the alpha channel of `color` with `alpha` (0-1, clamped)
#[inline]
pub fn with_alpha(color: u32, alpha: f32) -> u32 {
    (color & 0x00FF_FFFF) | ((alpha_to_u8(alpha) as u32) << 24)
}

/// Fully opaque color from hue (degrees), saturation and lightness (0-1)
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> u32 {
    let h = wrap_hue(hue) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    argb(255, to_u8(r), to_u8(g), to_u8(b))
}

/// Hue (degrees, [0, 360)) of a packed color; greys report 0
pub fn hue_of(color: u32) -> f32 {
    let [_, r, g, b] = channels(color);
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta <= f32::EPSILON {
        return 0.0;
    }

    let hue = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    wrap_hue(hue)
}
