//! Greenscreen: background removal against a stored sample.
//!
//! A background frame is captured ahead of time with sample generation and
//! stored as PNG. At runtime each live frame is compared pixel by pixel to
//! that sample in Lab space, and close matches become transparent.

mod lab;
mod samples;
mod subtract;

pub use lab::{distance_lab, to_lab, Lab, D65};
pub use samples::{
    load_png, save_png, BackgroundSample, FixedIndex, LatestIndex, SampleError, SampleSelection,
    SampleStore, DEFAULT_SAMPLE_INDEX, SAMPLE_COUNT,
};
pub use subtract::{subtract, TRANSPARENT};

/// Default Lab distance below which a pixel counts as background.
pub const DEFAULT_THRESHOLD: f64 = 0.13;

/// Errors from background subtraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GreenscreenError {
    #[error(
        "background is {}x{} but frame is {}x{}",
        background.0, background.1, foreground.0, foreground.1
    )]
    DimensionMismatch {
        foreground: (u32, u32),
        background: (u32, u32),
    },
}
