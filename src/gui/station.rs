use std::time::Duration;

use iced::{
    Alignment::Center,
    Element, Length, Subscription, Task,
    widget::{self, button, column, container, image::Handle, row, text, text_input},
};
use rfd::MessageLevel;

use crate::error::KioskError;
use crate::gui::{
    Message, dialog,
    widgets::{status_badge, video_placeholder},
};
use crate::kiosk::{Kiosk, TickOutcome};
use crate::session::Money;

/// The checkout screen: live video, commands and totals.
pub struct Station {
    kiosk: Kiosk,
    tick_interval: Duration,
    frame: Option<Handle>,
    price_input: String,
    cash_input: String,
    camera_notice: Option<String>,
    input_notice: Option<String>,
}

impl Station {
    pub fn new(kiosk: Kiosk, tick_interval: Duration) -> Self {
        Self {
            kiosk,
            tick_interval,
            frame: None,
            price_input: String::new(),
            cash_input: String::new(),
            camera_notice: None,
            input_notice: None,
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(self.tick_interval).map(|_| Message::Tick)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                match self.kiosk.tick() {
                    TickOutcome::Displayed { .. } => {
                        self.frame = self.kiosk.display().map(|img| {
                            Handle::from_rgba(img.width(), img.height(), img.as_raw().clone())
                        });
                        self.camera_notice = None;
                    }
                    TickOutcome::Skipped(e @ KioskError::DeviceUnavailable(_)) => {
                        self.camera_notice = Some(e.to_string());
                    }
                    TickOutcome::Skipped(_) | TickOutcome::Idle => {}
                }
                Task::none()
            }
            Message::StartDetection => match self.kiosk.start() {
                Ok(()) => {
                    self.camera_notice = None;
                    Task::none()
                }
                Err(e) => self.camera_error(e),
            },
            Message::StopCamera => {
                self.kiosk.stop();
                self.frame = None;
                Task::none()
            }
            Message::Reset => {
                self.frame = None;
                self.price_input.clear();
                self.cash_input.clear();
                self.camera_notice = None;
                self.input_notice = None;
                match self.kiosk.reset() {
                    Ok(()) => Task::none(),
                    Err(e) => self.camera_error(e),
                }
            }
            Message::ProcessPayment => {
                let outcome = self.kiosk.process_payment();
                dialog::notify("Payment", outcome.message(), MessageLevel::Info)
            }
            Message::PriceInputChanged(value) => {
                self.price_input = value;
                Task::none()
            }
            Message::CashInputChanged(value) => {
                self.cash_input = value;
                Task::none()
            }
            Message::AddPrice => {
                if let Some(amount) = self.take_amount(Field::Price) {
                    self.kiosk.add_price(amount);
                }
                Task::none()
            }
            Message::AddCash => {
                if let Some(amount) = self.take_amount(Field::Cash) {
                    self.kiosk.add_cash(amount);
                }
                Task::none()
            }
            Message::DialogClosed | Message::Exit => Task::none(),
        }
    }

    fn camera_error(&mut self, error: KioskError) -> Task<Message> {
        log::error!("{}", error);
        self.camera_notice = Some(error.to_string());
        dialog::notify("Camera error", error.to_string(), MessageLevel::Error)
    }

    /// Parse and clear an entry field. Bad input leaves the field as typed.
    fn take_amount(&mut self, field: Field) -> Option<Money> {
        let input = match field {
            Field::Price => &mut self.price_input,
            Field::Cash => &mut self.cash_input,
        };
        match input.parse::<Money>() {
            Ok(amount) => {
                input.clear();
                self.input_notice = None;
                Some(amount)
            }
            Err(e) => {
                self.input_notice = Some(format!("{}: {}", field.name(), e));
                None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let session = self.kiosk.session();

        let video: Element<'_, Message> = match &self.frame {
            Some(handle) => widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None if session.detection_active => video_placeholder("Waiting for camera..."),
            None => video_placeholder("Press Start Detection"),
        };

        let commands = row![
            button("Start Detection").on_press(Message::StartDetection),
            button("Process Payment").on_press(Message::ProcessPayment),
            button("Stop Camera").on_press(Message::StopCamera),
            button("Reset").on_press(Message::Reset),
        ]
        .spacing(10);

        let entry = row![
            text_input("Price", &self.price_input)
                .on_input(Message::PriceInputChanged)
                .on_submit(Message::AddPrice)
                .width(Length::Fixed(140.0)),
            button("Add to price").on_press(Message::AddPrice),
            text_input("Cash", &self.cash_input)
                .on_input(Message::CashInputChanged)
                .on_submit(Message::AddCash)
                .width(Length::Fixed(140.0)),
            button("Add cash").on_press(Message::AddCash),
        ]
        .spacing(10)
        .align_y(Center);

        let summary = row![
            status_badge(session.status),
            text(format!("Price: {}", session.accumulated_price)),
            text(format!("Cash: {}", session.total_balance)),
            text(
                self.camera_notice
                    .as_deref()
                    .or(self.input_notice.as_deref())
                    .unwrap_or_default()
            ),
        ]
        .spacing(20)
        .align_y(Center);

        column![
            container(video).height(Length::Fill),
            commands,
            entry,
            summary,
        ]
        .spacing(12)
        .padding(12)
        .align_x(Center)
        .into()
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Price,
    Cash,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Price => "Price",
            Field::Cash => "Cash",
        }
    }
}
