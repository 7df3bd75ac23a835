//! sRGB to CIE L*a*b* conversion and perceptual distance.
//!
//! Lab values use the 0..1 lightness scale, so the distance between black
//! and white is 1.0 and useful greenscreen thresholds sit around 0.1.

use std::sync::OnceLock;

use image::Rgba;

/// D65 reference white in XYZ.
pub const D65: [f64; 3] = [0.95047, 1.00000, 1.08883];

/// A color in CIE L*a*b* (D65), lightness scaled to 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Euclidean distance to another Lab color.
    pub fn distance(&self, other: &Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

// sRGB byte -> linear light, computed once
fn linear_table() -> &'static [f64; 256] {
    static TABLE: OnceLock<[f64; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0.0f64; 256];
        for (v, slot) in table.iter_mut().enumerate() {
            let c = v as f64 / 255.0;
            *slot = if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            };
        }
        table
    })
}

#[inline]
fn srgb_to_linear(v: u8) -> f64 {
    linear_table()[v as usize]
}

fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Convert the RGB channels of a pixel to Lab. Alpha is ignored.
pub fn to_lab(pixel: Rgba<u8>) -> Lab {
    let r = srgb_to_linear(pixel[0]);
    let g = srgb_to_linear(pixel[1]);
    let b = srgb_to_linear(pixel[2]);

    let x = 0.412_390_799_265_959_5 * r + 0.357_584_339_383_878 * g + 0.180_480_788_401_834_3 * b;
    let y = 0.212_639_005_871_510_4 * r + 0.715_168_678_767_756 * g + 0.072_192_315_360_733_7 * b;
    let z = 0.019_330_818_715_591_85 * r + 0.119_194_779_794_626 * g + 0.950_532_152_249_660_6 * b;

    let fx = lab_f(x / D65[0]);
    let fy = lab_f(y / D65[1]);
    let fz = lab_f(z / D65[2]);

    Lab {
        l: 1.16 * fy - 0.16,
        a: 5.0 * (fx - fy),
        b: 2.0 * (fy - fz),
    }
}

/// Perceptual distance between two pixels in Lab space.
pub fn distance_lab(a: Rgba<u8>, b: Rgba<u8>) -> f64 {
    to_lab(a).distance(&to_lab(b))
}
