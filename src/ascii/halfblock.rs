//! Half-block ANSI rendering: two vertically stacked pixels per cell.

use image::{Rgb, RgbaImage};

use super::RenderError;
use crate::terminal::ColorProfile;

/// Upper half block. Its foreground paints the top pixel and its
/// background paints the bottom one.
pub const UPPER_HALF_BLOCK: char = '▀';

/// Render an image as rows of upper-half-block cells.
///
/// Each output row consumes two pixel rows: pixel `(x, y)` becomes the
/// foreground and `(x, y + 1)` the background. The image must already be
/// scaled to the target size, so `height / 2` lines of `width` cells are
/// produced, each ending with `\n`.
///
/// # Errors
/// `RenderError::OddHeight` if the image height is odd.
pub fn render_ansi(profile: ColorProfile, image: &RgbaImage) -> Result<String, RenderError> {
    let (width, height) = image.dimensions();
    if height % 2 != 0 {
        return Err(RenderError::OddHeight(height));
    }

    let cell_bytes = UPPER_HALF_BLOCK.len_utf8() + profile.style_overhead(true);
    let mut out = String::with_capacity((width as usize * cell_bytes + 1) * (height as usize / 2));
    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top = image.get_pixel(x, y);
            let bottom = image.get_pixel(x, y + 1);
            profile.paint(
                &mut out,
                UPPER_HALF_BLOCK,
                Rgb([top[0], top[1], top[2]]),
                Some(Rgb([bottom[0], bottom[1], bottom[2]])),
            );
        }
        out.push('\n');
    }

    Ok(out)
}
