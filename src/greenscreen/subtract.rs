//! Background subtraction by Lab distance.

use image::{Rgba, RgbaImage};

use super::lab::distance_lab;
use super::GreenscreenError;

/// Value written to removed pixels.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Make every foreground pixel transparent whose Lab distance to the
/// background pixel at the same coordinate is strictly below `threshold`.
///
/// Does nothing when `background` is `None`. A threshold of 0 never
/// removes anything.
///
/// # Errors
/// `GreenscreenError::DimensionMismatch` if the two images differ in size.
/// The foreground is left untouched in that case.
pub fn subtract(
    foreground: &mut RgbaImage,
    background: Option<&RgbaImage>,
    threshold: f64,
) -> Result<(), GreenscreenError> {
    let Some(background) = background else {
        return Ok(());
    };
    if foreground.dimensions() != background.dimensions() {
        return Err(GreenscreenError::DimensionMismatch {
            foreground: foreground.dimensions(),
            background: background.dimensions(),
        });
    }

    for (fg, bg) in foreground.pixels_mut().zip(background.pixels()) {
        if distance_lab(*fg, *bg) < threshold {
            *fg = TRANSPARENT;
        }
    }
    Ok(())
}
