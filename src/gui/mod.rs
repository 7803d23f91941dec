mod app;
mod dialog;
mod message;
mod station;
mod widgets;

pub use app::{KioskApp, run};
pub use message::Message;
pub use station::Station;
