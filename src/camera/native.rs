use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};

use crate::camera::{CameraProvider, FrameSource};
use crate::error::KioskError;
use crate::models::Frame;

const REQUESTED_FPS: u32 = 30;

/// Default video input device through nokhwa.
#[derive(Debug, Clone)]
pub struct NativeCameraProvider {
    index: u32,
    width: u32,
    height: u32,
}

impl NativeCameraProvider {
    pub fn new(index: u32, width: u32, height: u32) -> Self {
        Self { index, width, height }
    }
}

impl CameraProvider for NativeCameraProvider {
    fn describe(&self) -> String {
        format!("camera #{} at {}x{}", self.index, self.width, self.height)
    }

    fn open(&mut self) -> Result<Box<dyn FrameSource>, KioskError> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(self.width, self.height),
                FrameFormat::MJPEG,
                REQUESTED_FPS,
            ),
        ));
        let mut camera = Camera::new(CameraIndex::Index(self.index), requested)
            .map_err(|e| KioskError::DeviceUnavailable(format!("{}: {}", self.describe(), e)))?;
        camera
            .open_stream()
            .map_err(|e| KioskError::DeviceUnavailable(format!("{}: {}", self.describe(), e)))?;

        let resolution = camera.resolution();
        if (resolution.width(), resolution.height()) != (self.width, self.height) {
            log::warn!(
                "Camera #{} delivers {}x{} instead of {}x{}",
                self.index,
                resolution.width(),
                resolution.height(),
                self.width,
                self.height
            );
        }
        Ok(Box::new(NativeSource { camera }))
    }
}

struct NativeSource {
    camera: Camera,
}

impl FrameSource for NativeSource {
    fn read_frame(&mut self) -> Result<Frame, KioskError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| KioskError::FrameRead(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| KioskError::FrameRead(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());

        Frame::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| KioskError::FrameRead("camera buffer smaller than its frame".to_string()))
    }
}

impl Drop for NativeSource {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera stream: {}", e);
        }
    }
}

/// Print the capture devices nokhwa can see.
pub fn list_cameras() -> anyhow::Result<()> {
    let cameras = nokhwa::query(ApiBackend::Auto)?;
    println!("{:<5} | {:<30} | {}", "Index", "Name", "Misc");
    println!("{}", "-".repeat(60));
    for cam in cameras {
        println!("{:<5} | {:<30} | {}", cam.index(), cam.human_name(), cam.misc());
    }
    Ok(())
}
