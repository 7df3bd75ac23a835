//! Glyph tables used by the ASCII renderer.

use super::mapping::MAX_INTENSITY;
use super::RenderError;

/// Longest usable table: one level per intensity step, `0..=765`.
pub const MAX_GLYPHS: usize = MAX_INTENSITY as usize + 1;

/// Classic 15-level ramp, least ink to most ink.
pub const CLASSIC_GLYPHS: &[char] = &[
    ' ', '.', ',', ':', ';', 'i', '1', 't', 'f', 'L', 'C', 'G', '0', '8', '@',
];

/// Standard ASCII density ramp (10 levels).
pub const STANDARD_GLYPHS: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Block glyphs (5 levels), space through full block.
pub const BLOCKS_GLYPHS: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Minimal glyphs (4 levels) for a clean look.
pub const MINIMAL_GLYPHS: &[char] = &[' ', '.', ':', '#'];

/// Built-in glyph table presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// 15-level ramp ending in `@`
    #[default]
    Classic,
    /// 10-level ramp
    Standard,
    /// Unicode shade blocks
    Blocks,
    /// 4-level ramp
    Minimal,
}

impl CharSet {
    /// The glyphs of this preset, ordered least ink to most ink.
    pub fn glyphs(&self) -> &'static [char] {
        match self {
            CharSet::Classic => CLASSIC_GLYPHS,
            CharSet::Standard => STANDARD_GLYPHS,
            CharSet::Blocks => BLOCKS_GLYPHS,
            CharSet::Minimal => MINIMAL_GLYPHS,
        }
    }

    /// Name as used on the command line and in the config file.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Classic => "classic",
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
        }
    }

    /// Look up a preset by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(CharSet::Classic),
            "standard" => Some(CharSet::Standard),
            "blocks" => Some(CharSet::Blocks),
            "minimal" => Some(CharSet::Minimal),
            _ => None,
        }
    }
}

/// An ordered sequence of glyphs from "least ink" to "most ink".
///
/// Always holds at least two glyphs, so there is a distinct lightest and
/// densest level. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: Vec<char>,
}

impl GlyphTable {
    /// Build a table from an explicit glyph sequence.
    ///
    /// # Errors
    /// `RenderError::GlyphTableTooShort` if fewer than two glyphs are given,
    /// `RenderError::GlyphTableTooLong` if more than [`MAX_GLYPHS`] are.
    pub fn new(glyphs: Vec<char>) -> Result<Self, RenderError> {
        if glyphs.len() < 2 {
            return Err(RenderError::GlyphTableTooShort(glyphs.len()));
        }
        if glyphs.len() > MAX_GLYPHS {
            return Err(RenderError::GlyphTableTooLong {
                len: glyphs.len(),
                max: MAX_GLYPHS,
            });
        }
        Ok(Self { glyphs })
    }

    /// Build a table from the characters of a string, e.g. `" .:#"`.
    pub fn parse(text: &str) -> Result<Self, RenderError> {
        Self::new(text.chars().collect())
    }

    /// Number of levels in the table.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Glyph at `index`, clamped to the last level.
    pub fn get(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// Lightest glyph (first level).
    pub fn lightest(&self) -> char {
        self.glyphs[0]
    }

    /// Densest glyph (last level).
    pub fn densest(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        CharSet::Classic.into()
    }
}

impl From<CharSet> for GlyphTable {
    fn from(set: CharSet) -> Self {
        Self {
            glyphs: set.glyphs().to_vec(),
        }
    }
}
