use std::path::Path;

use anyhow::{Context, Result};
use rten::Model;
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;

use crate::config::YoloParams;
use crate::detection::postprocess::{decode_yolov8, non_max_suppression};
use crate::detection::preprocessing::{letterbox, to_chw};
use crate::detection::{Detector, RawDetection};
use crate::models::{BoundingBox, Frame};

/// YOLOv8 detection head evaluated with rten.
pub struct YoloDetector {
    model: Model,
    params: YoloParams,
    name: String,
}

impl YoloDetector {
    /// Load a converted `.rten` model from disk.
    pub fn load(path: &Path, params: YoloParams) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Model not found: {}\nConvert the YOLO export with rten-convert first.",
                path.display()
            );
        }
        let model = Model::load_file(path)
            .with_context(|| format!("Failed to load model {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "yolo".to_string());

        log::info!("Loaded model {} from {}", name, path.display());
        Ok(Self { model, params, name })
    }
}

impl Detector for YoloDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn infer(&mut self, frame: &Frame) -> Result<Vec<RawDetection>> {
        let size = self.params.input_size as usize;
        let boxed = letterbox(frame, self.params.input_size);
        let input = NdTensor::from_data([1, 3, size, size], to_chw(&boxed.image));

        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|e| anyhow::anyhow!("{} inference failed: {}", self.name, e))?;
        let output: NdTensor<f32, 3> = output
            .try_into()
            .map_err(|e| anyhow::anyhow!("{} produced an unexpected output: {:?}", self.name, e))?;

        let rows = output.size(1);
        let anchors = output.size(2);
        let data = output.to_vec();

        let candidates = decode_yolov8(&data, rows, anchors, self.params.conf_threshold);
        let kept = non_max_suppression(
            candidates,
            self.params.iou_threshold,
            self.params.max_detections,
        );

        let (width, height) = frame.dimensions();
        let detections = kept
            .into_iter()
            .filter_map(|c| {
                let (x1, y1) = boxed.to_frame(c.x1, c.y1);
                let (x2, y2) = boxed.to_frame(c.x2, c.y2);
                let bbox = BoundingBox::from_corners_clamped(x1, y1, x2, y2, width, height)?;
                Some(RawDetection {
                    bbox,
                    class_index: c.class_index,
                    confidence: c.score,
                })
            })
            .collect();

        Ok(detections)
    }
}
