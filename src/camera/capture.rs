//! nokhwa-backed camera capture.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat as NokhwaFrameFormat, RequestedFormat,
    RequestedFormatType,
};
use nokhwa::Camera;

use super::device::list_devices;
use super::frame_utils::{convert_to_rgb, mirror_horizontal};
use super::source::FrameSource;
use super::types::{CameraError, CameraSettings, Frame, Resolution};

/// An open camera stream.
///
/// Frames are read synchronously: each [`FrameSource::read_frame`] call
/// blocks until the device delivers the next frame. The stream is stopped
/// when the capture is dropped.
pub struct CameraCapture {
    camera: Camera,
    settings: CameraSettings,
    /// Resolution negotiated with the device
    resolution: Resolution,
}

impl std::fmt::Debug for CameraCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraCapture")
            .field("settings", &self.settings)
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}

impl CameraCapture {
    /// Open a camera and start its stream.
    ///
    /// # Errors
    /// * `CameraError::DeviceNotFound` - If the device index doesn't exist
    /// * `CameraError::PermissionDenied` - If camera access is denied (macOS)
    /// * `CameraError::OpenFailed` - If no format could be negotiated
    /// * `CameraError::StreamFailed` - If the stream fails to start
    pub fn open(settings: CameraSettings) -> Result<Self, CameraError> {
        let devices = list_devices()?;
        if !devices.iter().any(|d| d.index == settings.device_index) {
            return Err(CameraError::DeviceNotFound(settings.device_index));
        }

        let index = CameraIndex::Index(settings.device_index);
        let mut camera = open_camera_with_fallback(&index, &settings)?;
        camera
            .open_stream()
            .map_err(|e| CameraError::StreamFailed(e.to_string()))?;

        let res = camera.resolution();
        let resolution = Resolution::new(res.width(), res.height());
        log::info!(
            "Opened camera {} at {} ({} fps, requested {})",
            settings.device_index,
            resolution,
            camera.frame_rate(),
            settings.resolution
        );

        Ok(Self {
            camera,
            settings,
            resolution,
        })
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }
}

impl FrameSource for CameraCapture {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        let raw = self
            .camera
            .frame()
            .map_err(|e| CameraError::FrameUnavailable(e.to_string()))?;
        let mut frame = convert_to_rgb(&raw)?;
        if self.settings.mirror {
            mirror_horizontal(&mut frame);
        }
        Ok(frame)
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera stream: {}", e);
        }
    }
}

/// Try to open a camera with multiple format fallback strategies.
fn open_camera_with_fallback(
    index: &CameraIndex,
    settings: &CameraSettings,
) -> Result<Camera, CameraError> {
    let requested = nokhwa::utils::Resolution::new(
        settings.resolution.width,
        settings.resolution.height,
    );
    // In order: MJPEG (widely supported), NV12 (native on macOS), YUYV,
    // then whatever the device offers at its highest resolution.
    let format_attempts = [
        RequestedFormatType::Closest(CameraFormat::new(
            requested,
            NokhwaFrameFormat::MJPEG,
            settings.fps,
        )),
        RequestedFormatType::Closest(CameraFormat::new(
            requested,
            NokhwaFrameFormat::NV12,
            settings.fps,
        )),
        RequestedFormatType::Closest(CameraFormat::new(
            requested,
            NokhwaFrameFormat::YUYV,
            settings.fps,
        )),
        RequestedFormatType::AbsoluteHighestResolution,
    ];

    let mut last_error = String::from("no formats attempted");
    for format in format_attempts {
        match Camera::new(index.clone(), RequestedFormat::new::<RgbFormat>(format)) {
            Ok(cam) => return Ok(cam),
            Err(e) => {
                log::debug!("Camera format {:?} rejected: {}", format, e);
                last_error = e.to_string();
            }
        }
    }

    let msg = last_error.to_lowercase();
    if msg.contains("permission")
        || msg.contains("denied")
        || msg.contains("authorization")
        || msg.contains("access")
    {
        Err(CameraError::PermissionDenied)
    } else {
        Err(CameraError::OpenFailed(last_error))
    }
}
