use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Gray used by YOLO exports for padding.
const PAD_VALUE: u8 = 114;

/// A frame scaled into a square model input, with the mapping back to frame pixels.
pub struct Letterbox {
    pub image: RgbImage,
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
}

impl Letterbox {
    /// Map a point from model input space back into the source frame.
    pub fn to_frame(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pad_x) / self.scale, (y - self.pad_y) / self.scale)
    }
}

/// Resize preserving aspect ratio and pad to `size` x `size`, image centered.
pub fn letterbox(frame: &RgbImage, size: u32) -> Letterbox {
    let (width, height) = frame.dimensions();
    let scale = (size as f32 / width as f32).min(size as f32 / height as f32);
    let scaled_w = ((width as f32 * scale).round() as u32).clamp(1, size);
    let scaled_h = ((height as f32 * scale).round() as u32).clamp(1, size);

    let resized = if (scaled_w, scaled_h) == (width, height) {
        frame.clone()
    } else {
        imageops::resize(frame, scaled_w, scaled_h, FilterType::Triangle)
    };

    let left = (size - scaled_w) / 2;
    let top = (size - scaled_h) / 2;
    let mut canvas = RgbImage::from_pixel(size, size, Rgb([PAD_VALUE; 3]));
    imageops::replace(&mut canvas, &resized, left.into(), top.into());

    Letterbox {
        image: canvas,
        scale,
        pad_x: left as f32,
        pad_y: top as f32,
    }
}

/// Planar RGB in `[0, 1]`, laid out channel, row, column.
pub fn to_chw(img: &RgbImage) -> Vec<f32> {
    let (width, height) = img.dimensions();
    let plane = (width * height) as usize;
    let mut data = vec![0.0f32; plane * 3];

    for (x, y, pixel) in img.enumerate_pixels() {
        let idx = (y * width + x) as usize;
        for c in 0..3 {
            data[c * plane + idx] = pixel[c] as f32 / 255.0;
        }
    }
    data
}
