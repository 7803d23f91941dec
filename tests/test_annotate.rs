mod common;

use common::*;
use image::{Rgb, RgbImage};
use shopia::annotate::{BOX_COLOR, to_display};

fn detection(x1: u32, y1: u32, x2: u32, y2: u32) -> Detection {
    Detection {
        bbox: BoundingBox::new(x1, y1, x2, y2),
        label: "bottle".to_string(),
        confidence: 0.8,
        source: SourceModel::Merchandise,
    }
}

#[test]
fn no_detections_leave_frame_untouched() {
    let frame = test_frame();
    let annotated = Annotator::new().annotate(frame.clone(), &[]);
    assert_eq!(annotated, frame);
}

#[test]
fn box_is_two_pixels_thick() {
    let annotated = Annotator::new().annotate(test_frame(), &[detection(5, 5, 25, 25)]);

    for (x, y) in [(5, 5), (6, 6), (25, 25), (24, 24), (15, 5), (15, 6), (5, 15), (25, 15)] {
        assert_eq!(annotated.get_pixel(x, y), &BOX_COLOR, "pixel ({}, {})", x, y);
    }
    for (x, y) in [(7, 7), (15, 15), (4, 4), (26, 26), (15, 7)] {
        assert_ne!(annotated.get_pixel(x, y), &BOX_COLOR, "pixel ({}, {})", x, y);
    }
}

#[test]
fn boxes_touching_the_frame_edge_are_clipped() {
    let last_x = FRAME_WIDTH - 1;
    let last_y = FRAME_HEIGHT - 1;
    let annotated = Annotator::new().annotate(
        test_frame(),
        &[detection(0, 0, last_x, last_y), detection(3, 3, 3, 3)],
    );

    assert_eq!(annotated.get_pixel(0, 0), &BOX_COLOR);
    assert_eq!(annotated.get_pixel(last_x, last_y), &BOX_COLOR);
    assert_eq!(annotated.get_pixel(3, 3), &BOX_COLOR);
}

#[test]
fn label_is_drawn_just_above_the_box() {
    let frame = RgbImage::new(FRAME_WIDTH, FRAME_HEIGHT);
    let bbox = detection(6, 40, 50, 47);
    let annotator = Annotator::new();
    assert!(annotator.has_font());

    let annotated = annotator.annotate(frame, &[bbox]);

    let black = Rgb([0, 0, 0]);
    let mut label_pixels = 0;
    for (x, y, pixel) in annotated.enumerate_pixels() {
        if y >= 40 || *pixel == black {
            continue;
        }
        label_pixels += 1;
        assert!(y >= 14, "label pixel ({}, {}) too far above the box", x, y);
        assert!(x >= 6, "label pixel ({}, {}) left of the box", x, y);
        assert_eq!(pixel[0], 0, "label pixel ({}, {}) is not green", x, y);
        assert_eq!(pixel[2], 0, "label pixel ({}, {}) is not green", x, y);
    }
    assert!(label_pixels > 0, "no label text above the box");

    for y in 42..46 {
        for x in 8..49 {
            assert_eq!(annotated.get_pixel(x, y), &black, "interior pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn custom_font_file_must_exist() {
    let missing = std::path::Path::new("/nonexistent/label-font.ttf");
    assert!(Annotator::from_font_file(missing).is_err());
}

#[test]
fn display_conversion_adds_opaque_alpha() {
    let frame = test_frame();
    let rgba = to_display(frame.clone());

    assert_eq!(rgba.dimensions(), frame.dimensions());
    let src = frame.get_pixel(7, 9);
    assert_eq!(rgba.get_pixel(7, 9).0, [src[0], src[1], src[2], 255]);
}

#[test]
fn clamped_boxes_stay_inside_the_frame() {
    let bbox = BoundingBox::from_corners_clamped(-12.0, 5.4, 70.2, 100.0, 64, 48)
        .expect("overlaps frame");
    assert_eq!(bbox, BoundingBox::new(0, 5, 63, 47));
    assert_eq!((bbox.width(), bbox.height()), (64, 43));

    assert!(BoundingBox::from_corners_clamped(80.0, 0.0, 90.0, 10.0, 64, 48).is_none());
}
