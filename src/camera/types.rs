//! Camera types and data structures.

use std::fmt;

use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};

/// Information about an available camera device.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    /// Device index for selection
    pub index: u32,
    /// Human-readable device name
    pub name: String,
    /// Device description
    pub description: String,
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.description)
    }
}

/// Camera capture resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// 1920x1080, the default request
    pub const FULL_HD: Resolution = Resolution {
        width: 1920,
        height: 1080,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::FULL_HD
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A captured camera frame, decoded to 8-bit RGB.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Fully opaque RGBA copy, the working image for processing.
    pub fn to_rgba(&self) -> RgbaImage {
        self.image.convert()
    }
}

/// Settings for camera capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Camera device index
    pub device_index: u32,
    /// Requested capture resolution
    pub resolution: Resolution,
    /// Target FPS (actual may vary)
    pub fps: u32,
    /// Mirror horizontally (selfie mode)
    pub mirror: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            device_index: 0,
            resolution: Resolution::default(),
            fps: 30,
            mirror: false,
        }
    }
}

/// Errors that can occur during camera operations.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("Failed to query cameras: {0}")]
    QueryFailed(String),
    #[error("Failed to open camera: {0}")]
    OpenFailed(String),
    #[error(
        "Camera permission denied. On macOS, grant access in System Settings > Privacy & Security > Camera"
    )]
    PermissionDenied,
    #[error("Camera device {0} not found. Run 'list-cameras' to see available devices")]
    DeviceNotFound(u32),
    #[error("Failed to start camera stream: {0}")]
    StreamFailed(String),
    /// The device didn't deliver a frame this time
    #[error("Error reading frame: {0}")]
    FrameUnavailable(String),
    /// A frame arrived but couldn't be converted to RGB
    #[error("Failed to decode frame: {0}")]
    Decode(String),
}

impl CameraError {
    /// Whether the capture loop should retry after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, CameraError::FrameUnavailable(_) | CameraError::Decode(_))
    }
}
