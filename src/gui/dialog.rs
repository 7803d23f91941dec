use iced::Task;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::gui::Message;

/// Show a modal message box; resolves to `Message::DialogClosed`.
pub fn notify(title: &str, description: impl Into<String>, level: MessageLevel) -> Task<Message> {
    let dialog = AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok);

    Task::perform(dialog.show(), |_| Message::DialogClosed)
}
