mod common;

use common::*;
use image::{ImageBuffer, Rgb};
use shopia::camera::{CameraDevice, CameraProvider, FrameSource, ReplayProvider};

fn write_image(dir: &std::path::Path, name: &str, width: u32, height: u32, color: [u8; 3]) {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb(color));
    img.save_with_format(dir.join(name), image::ImageFormat::Png)
        .expect("Failed to save test image");
}

#[test]
fn replays_directory_in_name_order_and_loops() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    write_image(dir.path(), "b.png", 20, 10, [0, 0, 255]);
    write_image(dir.path(), "a.png", 40, 30, [255, 0, 0]);
    std::fs::write(dir.path().join("notes.txt"), "not a frame")?;

    let mut device = CameraDevice::open(Box::new(ReplayProvider::new(dir.path(), 32, 24)))?;

    let first = device.read_frame()?;
    let second = device.read_frame()?;
    let third = device.read_frame()?;

    assert_eq!(first.dimensions(), (32, 24));
    assert_eq!(second.dimensions(), (32, 24));
    assert_eq!(first.get_pixel(16, 12), &Rgb([255, 0, 0]));
    assert_eq!(second.get_pixel(16, 12), &Rgb([0, 0, 255]));
    assert_eq!(third, first);
    Ok(())
}

#[test]
fn single_file_replays_forever() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    write_image(dir.path(), "shelf.png", 32, 24, [10, 20, 30]);

    let mut provider = ReplayProvider::new(dir.path().join("shelf.png"), 32, 24);
    let mut source = provider.open()?;
    for _ in 0..3 {
        assert_eq!(source.read_frame()?.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }
    Ok(())
}

#[test]
fn empty_directory_is_an_unavailable_device() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let result = CameraDevice::open(Box::new(ReplayProvider::new(dir.path(), 32, 24)));
    assert!(matches!(result, Err(KioskError::DeviceUnavailable(_))));

    let missing = dir.path().join("nope");
    let result = CameraDevice::open(Box::new(ReplayProvider::new(missing, 32, 24)));
    assert!(matches!(result, Err(KioskError::DeviceUnavailable(_))));
    Ok(())
}

#[test]
fn label_table_loads_from_file() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("billBank2.labels");
    std::fs::write(&path, "# bank notes\n1 dollar\n5 dollars\n10 dollars\n")?;

    let table = LabelTable::load(&path)?;
    assert_eq!(table.len(), 3);
    assert_eq!(table.name(2), "10 dollars");

    assert!(LabelTable::load(&dir.path().join("missing.labels")).is_err());
    Ok(())
}
