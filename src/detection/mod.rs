pub mod labels;
pub mod postprocess;
pub mod preprocessing;
pub mod yolo;

use anyhow::Result;

use crate::error::KioskError;
use crate::models::{BoundingBox, Detection, Frame, SourceModel};

pub use labels::LabelTable;
pub use yolo::YoloDetector;

/// Engine output before the class index is resolved to a name.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    pub bbox: BoundingBox,
    pub class_index: usize,
    pub confidence: f32,
}

/// An object detector backed by some external inference engine.
pub trait Detector {
    /// Human-readable name (used in log output)
    fn name(&self) -> &str;

    /// Run the model on one RGB frame. An empty result is not an error.
    fn infer(&mut self, frame: &Frame) -> Result<Vec<RawDetection>>;
}

/// Binds a detector to its model's label table and tags results with their source.
pub struct DetectionAdapter {
    source: SourceModel,
    labels: LabelTable,
    detector: Box<dyn Detector>,
}

impl DetectionAdapter {
    pub fn new(source: SourceModel, labels: LabelTable, detector: Box<dyn Detector>) -> Self {
        Self {
            source,
            labels,
            detector,
        }
    }

    pub fn source(&self) -> SourceModel {
        self.source
    }

    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, KioskError> {
        let raw = self
            .detector
            .infer(frame)
            .map_err(|e| KioskError::Detection {
                model: self.source,
                message: format!("{:#}", e),
            })?;

        log::trace!(
            "{} ({}) returned {} detections",
            self.detector.name(),
            self.source,
            raw.len()
        );

        Ok(raw
            .into_iter()
            .map(|r| Detection {
                bbox: r.bbox,
                label: self.labels.name(r.class_index).into_owned(),
                confidence: r.confidence,
                source: self.source,
            })
            .collect())
    }
}
