//! Frame conversion and transformation utilities.

use image::imageops;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;

use super::types::{CameraError, Frame};

/// Convert a nokhwa buffer to an RGB [`Frame`].
///
/// nokhwa's `decode_image` handles the camera's native format (MJPEG,
/// YUYV, NV12, ...).
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Result<Frame, CameraError> {
    let decoded = buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::Decode(e.to_string()))?;
    let resolution = buffer.resolution();

    let image = RgbImage::from_raw(resolution.width(), resolution.height(), decoded.into_raw())
        .ok_or_else(|| {
            CameraError::Decode(format!(
                "decoded buffer does not match {}x{}",
                resolution.width(),
                resolution.height()
            ))
        })?;
    Ok(Frame::new(image))
}

/// Mirror a frame horizontally (flip left-right) for selfie mode.
pub fn mirror_horizontal(frame: &mut Frame) {
    imageops::flip_horizontal_in_place(&mut frame.image);
}
