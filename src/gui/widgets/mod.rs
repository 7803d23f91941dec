use iced::{
    Color, Element, Length, Theme, border,
    widget::{container, container::Style, text},
};
use iced_widget::container::bordered_box;

use crate::session::Status;

impl Status {
    fn style(self) -> impl Fn(&Theme) -> Style {
        move |theme: &Theme| {
            let style = bordered_box(theme).border(border::width(2));
            match self {
                Status::Ready => style.background(theme.palette().background),
                Status::DetectionActive => style.background(Color::from_rgb8(0x1f, 0x7a, 0x3a)),
                Status::CameraStopped => style.background(Color::from_rgb8(0x7a, 0x2b, 0x1f)),
            }
        }
    }
}

/// Colored badge for the status indicator.
pub fn status_badge<'a, Message>(status: Status) -> Element<'a, Message>
where
    Message: 'a,
{
    container(text(status.to_string()))
        .padding(8)
        .style(status.style())
        .into()
}

/// Shown in place of the video while no frame has been published.
pub fn video_placeholder<'a, Message>(caption: &'a str) -> Element<'a, Message>
where
    Message: 'a,
{
    container(text(caption).size(24))
        .style(bordered_box)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
