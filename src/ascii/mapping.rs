//! Pixel intensity to glyph mapping.

use image::Rgba;

use super::charset::GlyphTable;

/// Largest possible `r + g + b` sum.
pub const MAX_INTENSITY: u32 = 255 * 3;

/// Alpha-weighted channel sum of a non-premultiplied RGBA pixel.
///
/// Ranges over `0..=765`. A fully transparent pixel has intensity 0 no
/// matter what its color channels hold.
#[inline]
pub fn intensity(pixel: Rgba<u8>) -> u32 {
    let [r, g, b, a] = pixel.0;
    (r as u32 + g as u32 + b as u32) * a as u32 / 255
}

/// Index into a table of `levels` glyphs for the given pixel.
///
/// The step width is `765 / (levels - 1)` in integer arithmetic, and the
/// index is rounded half-up. The result is clamped to `levels - 1` because
/// long tables can round past the last level.
///
/// # Example
/// ```
/// use image::Rgba;
/// use termcam::ascii::glyph_index;
///
/// assert_eq!(glyph_index(Rgba([0, 0, 0, 255]), 15), 0);
/// assert_eq!(glyph_index(Rgba([255, 255, 255, 255]), 15), 14);
/// ```
pub fn glyph_index(pixel: Rgba<u8>, levels: usize) -> usize {
    if levels < 2 {
        return 0;
    }
    let precision = (MAX_INTENSITY as usize / (levels - 1)) as f64;
    let index = (intensity(pixel) as f64 / precision + 0.5).floor() as usize;
    index.min(levels - 1)
}

/// Glyph for the given pixel.
pub fn glyph_for(pixel: Rgba<u8>, table: &GlyphTable) -> char {
    table.get(glyph_index(pixel, table.len()))
}
