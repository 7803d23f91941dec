#![allow(dead_code)]
#![allow(unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shopia for tests
pub use shopia::{
    Annotator, BoundingBox, Detection, Kiosk, KioskError, LabelTable, Money, PaymentOutcome,
    RawDetection, SourceModel, Status, TickOutcome,
};
