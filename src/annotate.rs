use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use anyhow::{Context, Result};
use image::{DynamicImage, Rgb, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::models::{Detection, Frame};

/// Bright green, shared by every model.
pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const BOX_THICKNESS: u32 = 2;

/// Distance between the text baseline and the top edge of the box.
const LABEL_GAP: i32 = 10;
const LABEL_SCALE: f32 = 16.0;

/// Fira Sans Regular (SIL Open Font License 1.1).
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/FiraSans-Regular.ttf");

/// Draws detection boxes and their labels onto frames.
pub struct Annotator {
    font: Option<FontArc>,
}

impl Annotator {
    /// Labels are drawn with the font shipped in the binary.
    pub fn new() -> Self {
        match FontArc::try_from_slice(BUNDLED_FONT) {
            Ok(font) => Self::with_font(font),
            Err(e) => {
                log::error!("Bundled label font is unreadable ({}); drawing boxes only", e);
                Self { font: None }
            }
        }
    }

    pub fn with_font(font: FontArc) -> Self {
        Self { font: Some(font) }
    }

    pub fn from_font_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| anyhow::anyhow!("Invalid font {}: {}", path.display(), e))?;
        Ok(Self::with_font(font))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Returns `frame` with every detection drawn on it.
    pub fn annotate(&self, mut frame: Frame, detections: &[Detection]) -> Frame {
        for detection in detections {
            self.draw_detection(&mut frame, detection);
        }
        frame
    }

    fn draw_detection(&self, frame: &mut Frame, detection: &Detection) {
        let bbox = detection.bbox;
        let (width, height) = (bbox.width(), bbox.height());

        for t in 0..BOX_THICKNESS {
            if width <= 2 * t || height <= 2 * t {
                break;
            }
            let rect = Rect::at((bbox.x1 + t) as i32, (bbox.y1 + t) as i32)
                .of_size(width - 2 * t, height - 2 * t);
            draw_hollow_rect_mut(frame, rect, BOX_COLOR);
        }

        if let Some(font) = &self.font {
            let top = bbox.y1 as i32 - LABEL_GAP - LABEL_SCALE as i32;
            draw_text_mut(
                frame,
                BOX_COLOR,
                bbox.x1 as i32,
                top,
                PxScale::from(LABEL_SCALE),
                font,
                &detection.label,
            );
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

/// Repack an RGB frame as RGBA for the display surface.
pub fn to_display(frame: Frame) -> RgbaImage {
    DynamicImage::ImageRgb8(frame).to_rgba8()
}
