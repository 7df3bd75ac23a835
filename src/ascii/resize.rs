//! Resampling step that fits a frame to the render grid.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::dimensions::GridSize;

/// Resample `image` to exactly `size` with bilinear filtering.
///
/// Returns an empty image when either target dimension is zero. An image
/// already at the target size is cloned unchanged.
pub fn resize_to(image: &RgbaImage, size: GridSize) -> RgbaImage {
    if size.is_empty() {
        return RgbaImage::new(0, 0);
    }
    if image.dimensions() == (size.width, size.height) {
        return image.clone();
    }
    imageops::resize(image, size.width, size.height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_resize_exact_dimensions() {
        let img = RgbaImage::from_pixel(64, 48, Rgba([10, 20, 30, 255]));
        let out = resize_to(&img, GridSize::new(16, 12));
        assert_eq!(out.dimensions(), (16, 12));
    }

    #[test]
    fn test_resize_uniform_color_preserved() {
        let img = RgbaImage::from_pixel(40, 40, Rgba([200, 100, 50, 255]));
        let out = resize_to(&img, GridSize::new(10, 10));
        for p in out.pixels() {
            for (got, want) in p.0.iter().zip([200u8, 100, 50, 255]) {
                assert!(got.abs_diff(want) <= 1, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(1, 1, Rgba([1, 2, 3, 4]));
        assert_eq!(resize_to(&img, GridSize::new(3, 2)), img);
    }

    #[test]
    fn test_resize_zero_target() {
        let img = RgbaImage::new(4, 4);
        assert_eq!(resize_to(&img, GridSize::new(0, 4)).dimensions(), (0, 0));
    }
}
