use std::path::{Path, PathBuf};

use image::ImageReader;
use image::imageops::{self, FilterType};

use crate::camera::{CameraProvider, FrameSource};
use crate::error::KioskError;
use crate::models::Frame;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// Stands in for a camera by looping over still images on disk.
#[derive(Debug, Clone)]
pub struct ReplayProvider {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl ReplayProvider {
    /// `path` is a single image or a directory of images. Frames are resized to `width` x `height`.
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    fn collect_images(&self) -> std::io::Result<Vec<PathBuf>> {
        if self.path.is_file() {
            return Ok(vec![self.path.clone()]);
        }
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image(p))
            .collect();
        files.sort();
        Ok(files)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl CameraProvider for ReplayProvider {
    fn describe(&self) -> String {
        format!("replay {}", self.path.display())
    }

    fn open(&mut self) -> Result<Box<dyn FrameSource>, KioskError> {
        let files = self.collect_images().map_err(|e| {
            KioskError::DeviceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        if files.is_empty() {
            return Err(KioskError::DeviceUnavailable(format!(
                "no images found in {}",
                self.path.display()
            )));
        }
        log::debug!("Replaying {} images from {}", files.len(), self.path.display());
        Ok(Box::new(ReplaySource {
            files,
            next: 0,
            width: self.width,
            height: self.height,
        }))
    }
}

struct ReplaySource {
    files: Vec<PathBuf>,
    next: usize,
    width: u32,
    height: u32,
}

impl FrameSource for ReplaySource {
    fn read_frame(&mut self) -> Result<Frame, KioskError> {
        let path = &self.files[self.next];
        self.next = (self.next + 1) % self.files.len();

        let img = ImageReader::open(path)
            .map_err(|e| KioskError::FrameRead(format!("{}: {}", path.display(), e)))?
            .decode()
            .map_err(|e| KioskError::FrameRead(format!("{}: {}", path.display(), e)))?
            .to_rgb8();

        if img.dimensions() == (self.width, self.height) {
            Ok(img)
        } else {
            Ok(imageops::resize(&img, self.width, self.height, FilterType::Triangle))
        }
    }
}
