//! Frame sources and the acquire/release policy for the single capture device.
//!
//! The device is opened at startup, released by stop and reset, re-opened
//! eagerly by reset and lazily by start or the first frame read that finds it
//! released.

#[cfg(feature = "camera")]
pub mod native;
pub mod replay;

use crate::error::KioskError;
use crate::models::Frame;

pub use replay::ReplayProvider;

/// An opened capture stream. Dropping it releases the device.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<Frame, KioskError>;
}

/// Opens the capture device on demand.
pub trait CameraProvider {
    /// Description for log output
    fn describe(&self) -> String;

    fn open(&mut self) -> Result<Box<dyn FrameSource>, KioskError>;
}

/// Exclusive owner of the capture device.
pub struct CameraDevice {
    provider: Box<dyn CameraProvider>,
    source: Option<Box<dyn FrameSource>>,
}

impl CameraDevice {
    /// Wraps `provider` without opening it.
    pub fn new(provider: Box<dyn CameraProvider>) -> Self {
        Self {
            provider,
            source: None,
        }
    }

    /// Wraps `provider` and opens it immediately.
    pub fn open(provider: Box<dyn CameraProvider>) -> Result<Self, KioskError> {
        let mut device = Self::new(provider);
        device.acquire()?;
        Ok(device)
    }

    pub fn is_acquired(&self) -> bool {
        self.source.is_some()
    }

    /// Open the device unless it is already open.
    pub fn acquire(&mut self) -> Result<(), KioskError> {
        if self.source.is_none() {
            let source = self.provider.open()?;
            log::info!("Camera acquired: {}", self.provider.describe());
            self.source = Some(source);
        }
        Ok(())
    }

    pub fn release(&mut self) {
        if self.source.take().is_some() {
            log::info!("Camera released: {}", self.provider.describe());
        }
    }

    /// Release then open again.
    pub fn reacquire(&mut self) -> Result<(), KioskError> {
        self.release();
        self.acquire()
    }

    /// Read one frame, opening the device first if it was released.
    pub fn read_frame(&mut self) -> Result<Frame, KioskError> {
        if self.source.is_none() {
            self.acquire()?;
        }
        match self.source.as_mut() {
            Some(source) => source.read_frame(),
            None => Err(KioskError::DeviceUnavailable(self.provider.describe())),
        }
    }
}
