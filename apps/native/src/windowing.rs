use iced::{window, Size, Task};

use crate::{Message, WINDOW_HEIGHT, WINDOW_WIDTH};

pub(crate) fn native_window_settings(visible: bool) -> window::Settings {
    let mut settings = window::Settings::default();
    settings.size = Size::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    settings.min_size = Some(Size::new(480.0, 360.0));
    settings.position = window::Position::Centered;
    settings.resizable = true;
    settings.visible = visible;
    // Closing the window only hides it; the tray menu owns exit.
    settings.exit_on_close_request = false;

    #[cfg(target_os = "windows")]
    {
        settings.platform_specific.drag_and_drop = false;
    }

    settings
}

pub(crate) fn show_window() -> Task<Message> {
    window::latest().then(move |maybe_id| {
        if let Some(id) = maybe_id {
            Task::batch(vec![
                window::set_mode(id, window::Mode::Windowed),
                window::gain_focus(id),
            ])
        } else {
            Task::none()
        }
    })
}

pub(crate) fn hide_window() -> Task<Message> {
    window::latest().then(move |maybe_id| {
        if let Some(id) = maybe_id {
            hide_window_by_id(id)
        } else {
            Task::none()
        }
    })
}

pub(crate) fn hide_window_by_id(id: window::Id) -> Task<Message> {
    window::set_mode(id, window::Mode::Hidden)
}
