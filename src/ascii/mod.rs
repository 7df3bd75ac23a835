//! Frame-to-text renderers.
//!
//! Two output styles are available:
//!
//! 1. **ASCII** ([`render_ascii`]): one glyph per pixel, picked from a
//!    [`GlyphTable`] by alpha-weighted intensity
//! 2. **ANSI** ([`render_ansi`]): one upper-half-block cell per two
//!    vertically stacked pixels, top pixel as foreground and bottom pixel
//!    as background
//!
//! Neither renderer scales. Callers fit the frame to the grid first with
//! [`resize_to`], using [`GridSize::scaled`] to apply the zoom level.

mod charset;
mod dimensions;
mod halfblock;
mod mapping;
mod render;
mod resize;

pub use charset::{
    CharSet, GlyphTable, MAX_GLYPHS, BLOCKS_GLYPHS, CLASSIC_GLYPHS, MINIMAL_GLYPHS, STANDARD_GLYPHS,
};
pub use dimensions::{GridSize, RenderMode, Zoom, FALLBACK_TERMINAL_SIZE};
pub use halfblock::{render_ansi, UPPER_HALF_BLOCK};
pub use mapping::{glyph_for, glyph_index, intensity, MAX_INTENSITY};
pub use render::{render_ascii, ColorOverride, ParseColorError, RenderOptions};
pub use resize::resize_to;

/// Errors from building glyph tables or rendering frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A glyph table needs a distinct lightest and densest level
    #[error("glyph table needs at least 2 glyphs, got {0}")]
    GlyphTableTooShort(usize),
    /// More levels than distinct intensity steps
    #[error("glyph table can have at most {max} glyphs, got {len}")]
    GlyphTableTooLong { len: usize, max: usize },
    /// Half-block rendering consumes pixel rows in pairs
    #[error("ANSI rendering needs an even image height, got {0}")]
    OddHeight(u32),
}
