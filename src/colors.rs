//! Packed ARGB8888 color constants and helpers.

pub const BACKGROUND: u32 = 0xFF000000;

/// Pack r, g, b bytes into an opaque ARGB8888 color.
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Map a luminosity in [0, 1] to an opaque grayscale color.
///
/// Callers clamp before converting; the cast itself saturates, so values
/// outside [0, 1] pin to black or white.
pub fn grayscale(lum: f32) -> u32 {
    let level = (lum * 255.0) as u8;
    pack_rgb(level, level, level)
}
