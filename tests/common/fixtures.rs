use std::cell::RefCell;
use std::rc::Rc;

use image::{Rgb, RgbImage};
use shopia::camera::{CameraDevice, CameraProvider, FrameSource};
use shopia::{
    Annotator, BoundingBox, DetectionAdapter, Detector, Frame, Kiosk, KioskError, LabelTable,
    RawDetection, SourceModel,
};

pub const FRAME_WIDTH: u32 = 64;
pub const FRAME_HEIGHT: u32 = 48;

/// Gradient frame with no pure green pixels, so drawn boxes are easy to spot.
pub fn test_frame() -> Frame {
    RgbImage::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |x, y| {
        Rgb([(x * 3) as u8, (y * 4) as u8, 100])
    })
}

/// Shared knobs and counters for a [`FakeCamera`].
#[derive(Debug, Default)]
pub struct CameraScript {
    pub opens: usize,
    pub reads: usize,
    pub fail_opens: bool,
    pub failing_reads: usize,
}

pub type CameraHandle = Rc<RefCell<CameraScript>>;

pub struct FakeCamera {
    script: CameraHandle,
}

impl CameraProvider for FakeCamera {
    fn describe(&self) -> String {
        "fake camera".to_string()
    }

    fn open(&mut self) -> Result<Box<dyn FrameSource>, KioskError> {
        let mut script = self.script.borrow_mut();
        if script.fail_opens {
            return Err(KioskError::DeviceUnavailable("fake camera unplugged".to_string()));
        }
        script.opens += 1;
        Ok(Box::new(FakeSource {
            script: self.script.clone(),
        }))
    }
}

struct FakeSource {
    script: CameraHandle,
}

impl FrameSource for FakeSource {
    fn read_frame(&mut self) -> Result<Frame, KioskError> {
        let mut script = self.script.borrow_mut();
        script.reads += 1;
        if script.failing_reads > 0 {
            script.failing_reads -= 1;
            return Err(KioskError::FrameRead("fake read hiccup".to_string()));
        }
        Ok(test_frame())
    }
}

/// Detector that replays a fixed answer, or fails when told to.
pub struct FakeDetector {
    answer: Rc<RefCell<Result<Vec<RawDetection>, String>>>,
}

impl Detector for FakeDetector {
    fn name(&self) -> &str {
        "fake"
    }

    fn infer(&mut self, _frame: &Frame) -> anyhow::Result<Vec<RawDetection>> {
        match &*self.answer.borrow() {
            Ok(found) => Ok(found.clone()),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

pub type DetectorHandle = Rc<RefCell<Result<Vec<RawDetection>, String>>>;

pub fn raw(x1: u32, y1: u32, x2: u32, y2: u32, class_index: usize) -> RawDetection {
    RawDetection {
        bbox: BoundingBox::new(x1, y1, x2, y2),
        class_index,
        confidence: 0.9,
    }
}

pub fn merchandise_labels() -> LabelTable {
    LabelTable::new(vec!["bottle".to_string(), "apple".to_string()])
}

pub fn currency_labels() -> LabelTable {
    LabelTable::new(vec!["10 dollars".to_string(), "20 dollars".to_string()])
}

/// A kiosk wired to fakes, plus the handles that steer them.
pub struct TestKiosk {
    pub kiosk: Kiosk,
    pub camera: CameraHandle,
    pub merchandise: DetectorHandle,
    pub currency: DetectorHandle,
}

pub fn create_test_kiosk() -> TestKiosk {
    let camera: CameraHandle = Rc::new(RefCell::new(CameraScript::default()));
    let merchandise: DetectorHandle = Rc::new(RefCell::new(Ok(Vec::new())));
    let currency: DetectorHandle = Rc::new(RefCell::new(Ok(Vec::new())));

    let device = CameraDevice::open(Box::new(FakeCamera {
        script: camera.clone(),
    }))
    .expect("fake camera opens");

    let kiosk = Kiosk::new(
        device,
        DetectionAdapter::new(
            SourceModel::Merchandise,
            merchandise_labels(),
            Box::new(FakeDetector {
                answer: merchandise.clone(),
            }),
        ),
        DetectionAdapter::new(
            SourceModel::Currency,
            currency_labels(),
            Box::new(FakeDetector {
                answer: currency.clone(),
            }),
        ),
        Annotator::new(),
    );

    TestKiosk {
        kiosk,
        camera,
        merchandise,
        currency,
    }
}
