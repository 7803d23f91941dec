use thiserror::Error;

use crate::models::SourceModel;

/// Failures the kiosk reports to the operator or swallows per tick.
#[derive(Debug, Error)]
pub enum KioskError {
    /// The capture device could not be opened.
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// A single frame could not be read. Retried on the next tick.
    #[error("failed to read frame: {0}")]
    FrameRead(String),

    /// The inference engine rejected a frame.
    #[error("{model} detection failed: {message}")]
    Detection { model: SourceModel, message: String },
}

impl KioskError {
    /// Errors that only cost one tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, KioskError::FrameRead(_) | KioskError::Detection { .. })
    }
}
