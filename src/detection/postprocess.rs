use std::cmp::Ordering;

/// A scored box in model input coordinates, before label lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
    pub class_index: usize,
}

impl Candidate {
    fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }
}

/// Decode a YOLOv8 head laid out `[4 + classes, anchors]` (batch already dropped).
///
/// Rows 0..4 hold `cx, cy, w, h`; the remaining rows hold one score per class.
/// Only the best class per anchor is kept, and only if it reaches `conf_threshold`.
pub fn decode_yolov8(data: &[f32], rows: usize, anchors: usize, conf_threshold: f32) -> Vec<Candidate> {
    if rows <= 4 || data.len() < rows * anchors {
        return Vec::new();
    }
    let at = |row: usize, anchor: usize| data[row * anchors + anchor];

    let mut candidates = Vec::new();
    for a in 0..anchors {
        let (class_index, score) = (4..rows)
            .map(|r| (r - 4, at(r, a)))
            .max_by(|l, r| l.1.partial_cmp(&r.1).unwrap_or(Ordering::Equal))
            .unwrap_or((0, 0.0));
        if score < conf_threshold || !score.is_finite() {
            continue;
        }

        let (cx, cy, w, h) = (at(0, a), at(1, a), at(2, a), at(3, a));
        candidates.push(Candidate {
            x1: cx - w / 2.0,
            y1: cy - h / 2.0,
            x2: cx + w / 2.0,
            y2: cy + h / 2.0,
            score,
            class_index,
        });
    }
    candidates
}

/// Intersection over union of two boxes, 0 when either is empty.
pub fn iou(a: &Candidate, b: &Candidate) -> f32 {
    let ix = (a.x2.min(b.x2) - a.x1.max(b.x1)).max(0.0);
    let iy = (a.y2.min(b.y2) - a.y1.max(b.y1)).max(0.0);
    let inter = ix * iy;
    let union = a.area() + b.area() - inter;
    if union <= 0.0 { 0.0 } else { inter / union }
}

/// Greedy per-class suppression, highest score first, capped at `max_detections`.
pub fn non_max_suppression(
    mut candidates: Vec<Candidate>,
    iou_threshold: f32,
    max_detections: usize,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if kept.len() >= max_detections {
            break;
        }
        let suppressed = kept.iter().any(|k| {
            k.class_index == candidate.class_index && iou(k, &candidate) > iou_threshold
        });
        if !suppressed {
            kept.push(candidate);
        }
    }
    kept
}
