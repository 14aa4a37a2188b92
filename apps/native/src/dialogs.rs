use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

pub(crate) fn pick_folder(start: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title("Select a directory to scan");
    let start = Path::new(start.trim());
    if !start.as_os_str().is_empty() && start.is_dir() {
        dialog = dialog.set_directory(start);
    }
    dialog.pick_folder()
}

pub(crate) fn show_warning(message: &str) {
    show(MessageLevel::Warning, "Error", message);
}

pub(crate) fn show_error(message: &str) {
    show(MessageLevel::Error, "Error", message);
}

pub(crate) fn show_info(title: &str, message: &str) {
    show(MessageLevel::Info, title, message);
}

fn show(level: MessageLevel, title: &str, message: &str) {
    let _ = MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
