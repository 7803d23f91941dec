use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "shopia")]
#[command(about = "Self-checkout kiosk that spots merchandise and bank notes on camera")]
pub struct KioskConfig {
    /// Capture device index
    #[arg(long, default_value_t = 0)]
    pub camera_index: u32,

    /// Requested frame width
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Requested frame height
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Capture loop interval in milliseconds
    #[arg(long, default_value_t = 10)]
    pub tick_ms: u64,

    /// Merchandise detection model (.rten)
    #[arg(long, value_name = "FILE", default_value = "models/yolov8l.rten")]
    pub merchandise_model: PathBuf,

    /// Merchandise label table, one class name per line (default: COCO)
    #[arg(long, value_name = "FILE")]
    pub merchandise_labels: Option<PathBuf>,

    /// Currency detection model (.rten)
    #[arg(long, value_name = "FILE", default_value = "models/billBank2.rten")]
    pub currency_model: PathBuf,

    /// Currency label table, one class name per line
    #[arg(long, value_name = "FILE")]
    pub currency_labels: Option<PathBuf>,

    /// Square model input size in pixels
    #[arg(long, default_value_t = 640)]
    pub input_size: u32,

    /// Minimum class score for a detection
    #[arg(long, default_value_t = 0.25)]
    pub conf_threshold: f32,

    /// Overlap above which a weaker box of the same class is suppressed
    #[arg(long, default_value_t = 0.7)]
    pub iou_threshold: f32,

    /// Upper bound on detections per model per frame
    #[arg(long, default_value_t = 300)]
    pub max_detections: usize,

    /// TrueType font for label text, replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Use an image file or a directory of images instead of a camera
    #[arg(long, value_name = "PATH")]
    pub replay: Option<PathBuf>,

    /// Run without a window and log detections
    #[arg(long)]
    pub headless: bool,

    /// Stop a headless run after this many displayed frames
    #[arg(long, value_name = "N")]
    pub max_frames: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// List capture devices and exit
    #[cfg(feature = "camera")]
    #[arg(long)]
    pub list_cameras: bool,
}

/// Inference knobs shared by both detectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoloParams {
    pub input_size: u32,
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

impl Default for YoloParams {
    fn default() -> Self {
        Self {
            input_size: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
        }
    }
}

impl KioskConfig {
    /// Reject settings that would make every tick fail.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("frame size must be non-zero, got {}x{}", self.width, self.height);
        }
        if self.tick_ms == 0 {
            bail!("--tick-ms must be at least 1");
        }
        if self.input_size == 0 || self.input_size % 32 != 0 {
            bail!("--input-size must be a positive multiple of 32, got {}", self.input_size);
        }
        if !(0.0..=1.0).contains(&self.conf_threshold) {
            bail!("--conf-threshold must be within 0..=1, got {}", self.conf_threshold);
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            bail!("--iou-threshold must be within 0..=1, got {}", self.iou_threshold);
        }
        if self.max_detections == 0 {
            bail!("--max-detections must be at least 1");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn yolo_params(&self) -> YoloParams {
        YoloParams {
            input_size: self.input_size,
            conf_threshold: self.conf_threshold,
            iou_threshold: self.iou_threshold,
            max_detections: self.max_detections,
        }
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> KioskConfig {
        let mut argv = vec!["shopia"];
        argv.extend_from_slice(args);
        KioskConfig::parse_from(argv)
    }

    #[test]
    fn defaults_match_the_kiosk_camera() {
        let config = parse(&[]);
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert_eq!(config.yolo_params(), YoloParams::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        assert!(parse(&["--conf-threshold", "1.5"]).validate().is_err());
        assert!(parse(&["--iou-threshold", "1.2"]).validate().is_err());
        assert!(parse(&["--input-size", "630"]).validate().is_err());
        assert!(parse(&["--tick-ms", "0"]).validate().is_err());
    }
}
