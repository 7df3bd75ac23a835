//! Glyph-per-pixel ASCII rendering.

use std::str::FromStr;

use image::{Rgb, Rgba, RgbaImage};

use super::charset::GlyphTable;
use super::mapping::glyph_for;
use crate::terminal::ColorProfile;

/// Single color applied to every glyph, or unset.
///
/// Zero alpha is the "unset" sentinel: glyphs then take their own pixel's
/// color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOverride(Rgba<u8>);

impl ColorOverride {
    /// No override; each glyph keeps its pixel color.
    pub const UNSET: ColorOverride = ColorOverride(Rgba([0, 0, 0, 0]));

    /// Override every glyph with `color`.
    pub fn new(color: Rgb<u8>) -> Self {
        let [r, g, b] = color.0;
        Self(Rgba([r, g, b, 255]))
    }

    pub fn is_set(&self) -> bool {
        self.0[3] > 0
    }

    /// The override color, if set.
    pub fn color(&self) -> Option<Rgb<u8>> {
        self.is_set().then(|| Rgb([self.0[0], self.0[1], self.0[2]]))
    }
}

impl Default for ColorOverride {
    fn default() -> Self {
        Self::UNSET
    }
}

/// Error returned when a hex color string can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #rgb or #rrggbb")]
pub struct ParseColorError(pub String);

impl FromStr for ColorOverride {
    type Err = ParseColorError;

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        let rgb = match hex.len() {
            6 => [channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?],
            3 => {
                let mut out = [0u8; 3];
                for (i, slot) in out.iter_mut().enumerate() {
                    // #abc expands to #aabbcc
                    *slot = channel(&hex[i..i + 1])? * 17;
                }
                out
            }
            _ => return Err(err()),
        };
        Ok(ColorOverride::new(Rgb(rgb)))
    }
}

/// Per-call rendering configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Glyph ramp, least ink first
    pub glyphs: GlyphTable,
    /// Optional single color for all glyphs
    pub color_override: ColorOverride,
    /// Active terminal color profile
    pub profile: ColorProfile,
}

impl RenderOptions {
    pub fn new(glyphs: GlyphTable, color_override: ColorOverride, profile: ColorProfile) -> Self {
        Self {
            glyphs,
            color_override,
            profile,
        }
    }
}

/// Render a `width` x `height` grid of glyphs, one per source pixel.
///
/// The image is expected to be pre-scaled to exactly `width` x `height`;
/// coordinates outside it read as fully transparent. Rows are emitted top
/// to bottom and each row, including the last, ends with `\n`.
pub fn render_ascii(width: u32, height: u32, options: &RenderOptions, image: &RgbaImage) -> String {
    if width == 0 || height == 0 {
        return String::new();
    }

    let override_color = options.color_override.color();
    let glyph_bytes = options
        .glyphs
        .glyphs()
        .iter()
        .map(|c| c.len_utf8())
        .max()
        .unwrap_or(1);
    let cell_bytes = glyph_bytes + options.profile.style_overhead(false);
    let mut out = String::with_capacity((width as usize * cell_bytes + 1) * height as usize);

    for y in 0..height {
        for x in 0..width {
            let pixel = image
                .get_pixel_checked(x, y)
                .copied()
                .unwrap_or(Rgba([0, 0, 0, 0]));
            let glyph = glyph_for(pixel, &options.glyphs);
            let fg = override_color.unwrap_or(Rgb([pixel[0], pixel[1], pixel[2]]));
            options.profile.paint(&mut out, glyph, fg, None);
        }
        out.push('\n');
    }

    out
}
