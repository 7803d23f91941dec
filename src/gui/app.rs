use iced::{
    Alignment::Center,
    Element, Length, Size, Subscription, Task,
    widget::{button, column, container, text},
};
use rfd::MessageLevel;

use super::{Message, Station, dialog};
use crate::config::KioskConfig;
use crate::kiosk::Kiosk;

/// Room below the video for the command rows.
const CONTROLS_HEIGHT: f32 = 200.0;

pub enum KioskApp {
    Running(Station),
    StartupFailed { error: String },
}

impl KioskApp {
    fn boot(config: &KioskConfig) -> (Self, Task<Message>) {
        match Kiosk::from_config(config) {
            Ok(kiosk) => (
                KioskApp::Running(Station::new(kiosk, config.tick_interval())),
                Task::none(),
            ),
            Err(e) => {
                let error = format!("{:#}", e);
                log::error!("Startup failed: {}", error);
                let task = dialog::notify("Startup failed", error.clone(), MessageLevel::Error);
                (KioskApp::StartupFailed { error }, task)
            }
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match (self, message) {
            (_, Message::Exit) => iced::exit(),
            (KioskApp::Running(station), message) => station.update(message),
            (KioskApp::StartupFailed { .. }, _) => Task::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match self {
            KioskApp::Running(station) => station.view(),
            KioskApp::StartupFailed { error } => {
                let content = column![
                    text("ShopIA could not start").size(32),
                    text(error),
                    button("Exit").on_press(Message::Exit),
                ]
                .spacing(20)
                .padding(20)
                .align_x(Center);

                container(content)
                    .center_x(Length::Fill)
                    .center_y(Length::Fill)
                    .into()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        match self {
            KioskApp::Running(station) => station.subscription(),
            KioskApp::StartupFailed { .. } => Subscription::none(),
        }
    }
}

/// Open the kiosk window and block until it closes.
pub fn run(config: KioskConfig) -> anyhow::Result<()> {
    let window = Size::new(config.width as f32, config.height as f32 + CONTROLS_HEIGHT);

    iced::application(
        move || KioskApp::boot(&config),
        KioskApp::update,
        KioskApp::view,
    )
    .title("ShopIA")
    .subscription(KioskApp::subscription)
    .window_size(window)
    .run()?;

    Ok(())
}
