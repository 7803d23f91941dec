pub mod annotate;
pub mod camera;
pub mod config;
pub mod detection;
pub mod error;
pub mod kiosk;
pub mod models;
pub mod session;

pub use annotate::Annotator;
pub use config::{KioskConfig, YoloParams};
pub use detection::{DetectionAdapter, Detector, LabelTable, RawDetection};
pub use error::KioskError;
pub use kiosk::{Kiosk, TickOutcome};
pub use models::{BoundingBox, Detection, Frame, SourceModel};
pub use session::{Money, PaymentOutcome, SessionState, Status};

#[cfg(feature = "gui")]
pub mod gui;
