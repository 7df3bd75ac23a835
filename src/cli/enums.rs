//! CLI enum types for charset and color profile options.

use clap::ValueEnum;

use crate::ascii;
use crate::terminal::ColorProfile;

/// Glyph table preset for ASCII rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Classic,
    Standard,
    Blocks,
    Minimal,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Classic => ascii::CharSet::Classic,
            CharacterSet::Standard => ascii::CharSet::Standard,
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Minimal => ascii::CharSet::Minimal,
        }
    }
}

/// Terminal color profile, or `auto` to detect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProfileChoice {
    #[default]
    Auto,
    #[value(name = "truecolor")]
    TrueColor,
    #[value(name = "ansi256")]
    Ansi256,
    Ansi,
    Ascii,
}

impl ProfileChoice {
    /// The forced profile, or `None` for auto-detection.
    pub fn profile(&self) -> Option<ColorProfile> {
        match self {
            ProfileChoice::Auto => None,
            ProfileChoice::TrueColor => Some(ColorProfile::TrueColor),
            ProfileChoice::Ansi256 => Some(ColorProfile::Ansi256),
            ProfileChoice::Ansi => Some(ColorProfile::Ansi),
            ProfileChoice::Ascii => Some(ColorProfile::Ascii),
        }
    }
}
