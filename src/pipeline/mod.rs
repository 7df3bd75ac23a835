//! Frame pipeline: the per-frame loop and its bookkeeping.
//!
//! One thread owns capture, processing and rendering. Cancellation is
//! cooperative through [`ShutdownSignal`], observed between frames.

mod fps;
mod frame_loop;
mod shutdown;

pub use fps::{FpsCounter, FPS_WINDOW};
pub use frame_loop::{
    Pipeline, PipelineOptions, PipelineState, RunMode, RunSummary, StepOutcome,
    DEFAULT_RETRY_DELAY,
};
pub use shutdown::ShutdownSignal;

use crate::ascii::RenderError;
use crate::camera::CameraError;
use crate::greenscreen::{GreenscreenError, SampleError};

/// Errors that stop the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("terminal output failed: {0}")]
    Terminal(#[from] std::io::Error),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Greenscreen(#[from] GreenscreenError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
