#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod dialogs;
mod logging;
mod tray;
mod ui;
mod update;
mod windowing;

use std::collections::HashSet;
use std::env;
use std::time::Duration;

use iced::widget::text_editor;
use iced::{window, Subscription, Task, Theme};
use mdtrayd::{AppService, ScanReport, Theme as AppTheme};

use tray::Tray;

const APP_TITLE: &str = "MarkdownTray";
const WINDOW_WIDTH: f32 = 760.0;
const WINDOW_HEIGHT: f32 = 620.0;
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const TREE_INDENT: f32 = 18.0;
const LABEL_FONT_SIZE: u32 = 14;

fn main() -> iced::Result {
    logging::init_logging();

    let start_visible = should_start_visible_from_args();
    tracing::info!("starting {} (visible: {})", APP_TITLE, start_visible);

    iced::application(
        || (App::default(), Task::none()),
        update::update,
        ui::view,
    )
    .title(APP_TITLE)
    .theme(theme)
    .window(windowing::native_window_settings(start_visible))
    .subscription(subscription)
    .run()
}

fn should_start_visible_from_args() -> bool {
    env::args().any(|arg| arg == "--show")
}

#[derive(Debug, Clone)]
enum Message {
    TabSelected(Tab),
    ThemeSelected(AppTheme),
    DirectoryChanged(String),
    BrowseDirectory,
    FilenamesEdited(text_editor::Action),
    ScanClicked,
    SaveClicked,
    HideToTray,
    ExitClicked,
    ToggleNode(Vec<usize>),
    ExpandAll,
    CollapseAll,
    PollTray,
    CloseRequested(window::Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Settings,
    Results,
}

struct App {
    service: AppService,
    filenames: text_editor::Content,
    tab: Tab,
    last_report: Option<ScanReport>,
    expanded: HashSet<Vec<usize>>,
    tray: Option<Tray>,
}

impl Default for App {
    fn default() -> Self {
        let tray = match tray::init_tray() {
            Ok(tray) => Some(tray),
            Err(err) => {
                tracing::warn!("tray icon unavailable: {:#}", err);
                None
            }
        };

        let service = AppService::default();
        tracing::debug!(
            "settings loaded from {}",
            service.settings_path().display()
        );
        let filenames = text_editor::Content::with_text(&service.settings.filenames);

        Self {
            service,
            filenames,
            tab: Tab::Settings,
            last_report: None,
            expanded: HashSet::new(),
            tray,
        }
    }
}

fn theme(app: &App) -> Theme {
    match app.service.settings.theme {
        AppTheme::Dark => Theme::TokyoNight,
        AppTheme::Light => Theme::Light,
    }
}

fn subscription(_app: &App) -> Subscription<Message> {
    Subscription::batch(vec![
        iced::time::every(POLL_INTERVAL).map(|_| Message::PollTray),
        window::close_requests().map(Message::CloseRequested),
    ])
}
