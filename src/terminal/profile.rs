//! Terminal color profiles and RGB quantization.

use std::fmt::Write as _;

use crossterm::style::{style, Color, Stylize};
use image::Rgb;

/// Color capability of the output terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorProfile {
    /// 24-bit RGB escape codes
    #[default]
    TrueColor,
    /// xterm 256-color palette
    Ansi256,
    /// 16 basic colors
    Ansi,
    /// No color at all
    Ascii,
}

/// Levels of the 6x6x6 xterm color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// The 16 basic colors as (palette color, approximate RGB).
const BASIC_COLORS: [(Color, [u8; 3]); 16] = [
    (Color::Black, [0, 0, 0]),
    (Color::DarkRed, [128, 0, 0]),
    (Color::DarkGreen, [0, 128, 0]),
    (Color::DarkYellow, [128, 128, 0]),
    (Color::DarkBlue, [0, 0, 128]),
    (Color::DarkMagenta, [128, 0, 128]),
    (Color::DarkCyan, [0, 128, 128]),
    (Color::Grey, [192, 192, 192]),
    (Color::DarkGrey, [128, 128, 128]),
    (Color::Red, [255, 0, 0]),
    (Color::Green, [0, 255, 0]),
    (Color::Yellow, [255, 255, 0]),
    (Color::Blue, [0, 0, 255]),
    (Color::Magenta, [255, 0, 255]),
    (Color::Cyan, [0, 255, 255]),
    (Color::White, [255, 255, 255]),
];

impl ColorProfile {
    /// Detect the profile from the process environment.
    pub fn detect() -> Self {
        use std::io::IsTerminal;
        Self::from_env(std::io::stdout().is_terminal(), |key| std::env::var(key).ok())
    }

    /// Detect the profile from an explicit TTY flag and variable lookup.
    ///
    /// `NO_COLOR` and non-TTY output disable color. Otherwise `COLORTERM`
    /// and `TERM` decide between truecolor, 256 colors and the basic 16.
    pub fn from_env<F>(is_tty: bool, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if var("NO_COLOR").is_some_and(|v| !v.is_empty()) || !is_tty {
            return ColorProfile::Ascii;
        }

        let colorterm = var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return ColorProfile::TrueColor;
        }

        let term = var("TERM").unwrap_or_default().to_ascii_lowercase();
        if term.is_empty() || term == "dumb" {
            return ColorProfile::Ascii;
        }
        if term.ends_with("-direct") || term.contains("truecolor") {
            return ColorProfile::TrueColor;
        }
        if term.contains("256color") {
            return ColorProfile::Ansi256;
        }
        ColorProfile::Ansi
    }

    /// Parse a profile name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" => Some(ColorProfile::TrueColor),
            "ansi256" | "256" => Some(ColorProfile::Ansi256),
            "ansi" | "16" => Some(ColorProfile::Ansi),
            "ascii" | "none" => Some(ColorProfile::Ascii),
            _ => None,
        }
    }

    /// Translate an RGB color into this profile's representation.
    ///
    /// Returns `None` for the `Ascii` profile, meaning "emit no styling".
    pub fn convert(&self, color: Rgb<u8>) -> Option<Color> {
        let [r, g, b] = color.0;
        match self {
            ColorProfile::TrueColor => Some(Color::Rgb { r, g, b }),
            ColorProfile::Ansi256 => Some(Color::AnsiValue(ansi256_index(color.0))),
            ColorProfile::Ansi => Some(nearest_basic(color.0)),
            ColorProfile::Ascii => None,
        }
    }

    /// Upper bound on the escape-code bytes [`paint`](Self::paint) adds
    /// around one glyph, with or without a background color.
    pub fn style_overhead(&self, with_background: bool) -> usize {
        // longest single color code, e.g. `\x1b[38;2;255;255;255m`, plus its reset
        let per_color = match self {
            ColorProfile::TrueColor => 19 + 5,
            ColorProfile::Ansi256 | ColorProfile::Ansi => 11 + 5,
            ColorProfile::Ascii => return 0,
        };
        if with_background {
            per_color * 2
        } else {
            per_color
        }
    }

    /// Append `glyph` to `out`, styled with a foreground and optional
    /// background color in this profile.
    pub fn paint(&self, out: &mut String, glyph: char, fg: Rgb<u8>, bg: Option<Rgb<u8>>) {
        let mut content = style(glyph);
        if let Some(color) = self.convert(fg) {
            content = content.with(color);
        }
        if let Some(color) = bg.and_then(|bg| self.convert(bg)) {
            content = content.on(color);
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{}", content);
    }
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

fn cube_index(v: u8) -> usize {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        ((v - 35) / 40) as usize
    }
}

/// Closest xterm-256 palette entry, choosing between the color cube and
/// the grey ramp.
fn ansi256_index(rgb: [u8; 3]) -> u8 {
    let [ri, gi, bi] = rgb.map(cube_index);
    let cube = [CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]];
    let cube_code = 16 + 36 * ri + 6 * gi + bi;

    let avg = (rgb[0] as u32 + rgb[1] as u32 + rgb[2] as u32) / 3;
    let grey_idx = if avg > 238 {
        23
    } else {
        (avg.saturating_sub(3) / 10) as usize
    };
    let grey_level = (8 + 10 * grey_idx) as u8;
    let grey = [grey_level; 3];

    if distance_sq(rgb, cube) <= distance_sq(rgb, grey) {
        cube_code as u8
    } else {
        (232 + grey_idx) as u8
    }
}

fn nearest_basic(rgb: [u8; 3]) -> Color {
    BASIC_COLORS
        .iter()
        .min_by_key(|(_, c)| distance_sq(rgb, *c))
        .map(|(color, _)| *color)
        .unwrap_or(Color::White)
}
