use anyhow::Result;
use image::RgbaImage;

use crate::annotate::{Annotator, to_display};
use crate::camera::{CameraDevice, CameraProvider, ReplayProvider};
use crate::config::KioskConfig;
use crate::detection::{DetectionAdapter, LabelTable, YoloDetector};
use crate::error::KioskError;
use crate::models::{Detection, SourceModel};
use crate::session::{Money, PaymentOutcome, SessionState};

/// What a single capture loop tick did.
#[derive(Debug)]
pub enum TickOutcome {
    /// Detection is off; nothing was read.
    Idle,
    /// No frame this tick. State is unchanged and the next tick retries.
    Skipped(KioskError),
    /// A new annotated frame replaced the display surface.
    Displayed {
        detections: Vec<Detection>,
        failed_models: Vec<SourceModel>,
    },
}

/// Single owner of the session, the camera and both detectors.
///
/// Command handlers and [`Kiosk::tick`] all take `&mut self`, so a tick
/// always finishes before the next command is applied.
pub struct Kiosk {
    session: SessionState,
    camera: CameraDevice,
    merchandise: DetectionAdapter,
    currency: DetectionAdapter,
    annotator: Annotator,
    display: Option<RgbaImage>,
}

impl Kiosk {
    pub fn new(
        camera: CameraDevice,
        merchandise: DetectionAdapter,
        currency: DetectionAdapter,
        annotator: Annotator,
    ) -> Self {
        Self {
            session: SessionState::default(),
            camera,
            merchandise,
            currency,
            annotator,
            display: None,
        }
    }

    /// Load both models and open the camera. Any failure here is fatal.
    pub fn from_config(config: &KioskConfig) -> Result<Self> {
        let params = config.yolo_params();

        let merchandise_labels = match &config.merchandise_labels {
            Some(path) => LabelTable::load(path)?,
            None => LabelTable::coco(),
        };
        let currency_labels = match &config.currency_labels {
            Some(path) => LabelTable::load(path)?,
            None => {
                log::warn!("No currency label table given; notes will be labelled by class index");
                LabelTable::default()
            }
        };

        let merchandise = DetectionAdapter::new(
            SourceModel::Merchandise,
            merchandise_labels,
            Box::new(YoloDetector::load(&config.merchandise_model, params)?),
        );
        let currency = DetectionAdapter::new(
            SourceModel::Currency,
            currency_labels,
            Box::new(YoloDetector::load(&config.currency_model, params)?),
        );

        let annotator = match &config.font {
            Some(path) => Annotator::from_font_file(path)?,
            None => Annotator::new(),
        };

        let camera = CameraDevice::open(camera_provider(config)?)?;

        Ok(Self::new(camera, merchandise, currency, annotator))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Latest annotated frame, RGBA.
    pub fn display(&self) -> Option<&RgbaImage> {
        self.display.as_ref()
    }

    pub fn camera_acquired(&self) -> bool {
        self.camera.is_acquired()
    }

    /// Begin detecting. The flag is set even when the camera cannot be
    /// opened right now; ticks keep retrying the device.
    pub fn start(&mut self) -> Result<(), KioskError> {
        self.session.start();
        log::info!("Detection started");
        self.camera.acquire()
    }

    pub fn stop(&mut self) {
        self.session.stop();
        self.camera.release();
        self.display = None;
        log::info!("Camera stopped");
    }

    /// Clear the checkout and cycle the camera.
    pub fn reset(&mut self) -> Result<(), KioskError> {
        self.session.reset();
        self.display = None;
        log::info!("Session reset");
        self.camera.reacquire()
    }

    pub fn process_payment(&self) -> PaymentOutcome {
        let outcome = self.session.payment_outcome();
        log::info!(
            "Payment check: price {} balance {} -> {:?}",
            self.session.accumulated_price,
            self.session.total_balance,
            outcome
        );
        outcome
    }

    pub fn add_price(&mut self, amount: Money) {
        self.session.add_price(amount);
    }

    pub fn add_cash(&mut self, amount: Money) {
        self.session.add_balance(amount);
    }

    /// One capture loop iteration.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.session.detection_active {
            return TickOutcome::Idle;
        }

        let frame = match self.camera.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("Skipping tick: {}", e);
                return TickOutcome::Skipped(e);
            }
        };

        let mut detections = Vec::new();
        let mut failed_models = Vec::new();
        for adapter in [&mut self.merchandise, &mut self.currency] {
            match adapter.detect(&frame) {
                Ok(found) => detections.extend(found),
                Err(e) => {
                    log::warn!("{}", e);
                    failed_models.push(adapter.source());
                }
            }
        }

        let annotated = self.annotator.annotate(frame, &detections);
        self.display = Some(to_display(annotated));

        TickOutcome::Displayed {
            detections,
            failed_models,
        }
    }
}

fn camera_provider(config: &KioskConfig) -> Result<Box<dyn CameraProvider>, KioskError> {
    if let Some(path) = &config.replay {
        return Ok(Box::new(ReplayProvider::new(path, config.width, config.height)));
    }

    #[cfg(feature = "camera")]
    {
        Ok(Box::new(crate::camera::native::NativeCameraProvider::new(
            config.camera_index,
            config.width,
            config.height,
        )))
    }

    #[cfg(not(feature = "camera"))]
    {
        Err(KioskError::DeviceUnavailable(
            "built without camera support; pass --replay <PATH>".to_string(),
        ))
    }
}
