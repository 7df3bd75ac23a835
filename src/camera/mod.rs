//! Camera capture module for webcam access and frame capture.
//!
//! - Device enumeration via [`list_devices`]
//! - Frame delivery through the [`FrameSource`] trait
//! - A nokhwa-backed source in [`CameraCapture`]

mod capture;
mod device;
mod frame_utils;
mod source;
mod types;

pub use capture::CameraCapture;
pub use device::list_devices;
pub use frame_utils::mirror_horizontal;
pub use source::FrameSource;
pub use types::{CameraError, CameraInfo, CameraSettings, Frame, Resolution};
