//! The frame source seam between the pipeline and capture devices.

use super::types::{CameraError, Frame, Resolution};

/// Anything that yields frames one at a time.
///
/// `read_frame` may block until a frame is available. Transient failures
/// are reported as errors for which [`CameraError::is_transient`] holds,
/// and the caller is expected to retry.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<Frame, CameraError>;

    /// Dimensions of the frames this source delivers.
    fn resolution(&self) -> Resolution;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        (**self).read_frame()
    }

    fn resolution(&self) -> Resolution {
        (**self).resolution()
    }
}
