use std::fmt;

use image::RgbImage;

/// Axis-aligned box in frame pixel coordinates, corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BoundingBox {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Build from floating point corners, clamped to a `width` x `height` frame.
    /// Returns `None` when the box collapses outside the frame.
    pub fn from_corners_clamped(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: u32,
        height: u32,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_x = (width - 1) as f32;
        let max_y = (height - 1) as f32;
        let clamp = |v: f32, max: f32| v.max(0.0).min(max).round() as u32;

        let (lx, hx) = (x1.min(x2), x1.max(x2));
        let (ly, hy) = (y1.min(y2), y1.max(y2));
        if hx < 0.0 || hy < 0.0 || lx > max_x || ly > max_y {
            return None;
        }

        Some(Self::new(
            clamp(lx, max_x),
            clamp(ly, max_y),
            clamp(hx, max_x),
            clamp(hy, max_y),
        ))
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1 + 1
    }
}

/// Which pretrained model produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceModel {
    Merchandise,
    Currency,
}

impl fmt::Display for SourceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceModel::Merchandise => write!(f, "merchandise"),
            SourceModel::Currency => write!(f, "currency"),
        }
    }
}

/// One object found in one frame. Never carried across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub label: String,
    pub confidence: f32,
    pub source: SourceModel,
}

/// Frames handed from the camera to the detectors are packed RGB.
pub type Frame = RgbImage;
