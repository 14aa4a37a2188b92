use std::collections::HashSet;

use iced::widget::{
    button, column, container, radio, row, scrollable, text, text_editor, text_input, Column,
};
use iced::{Alignment, Color, Element, Fill, Length, Padding};
use mdtrayd::{NodeKind, OutlineNode, Theme as AppTheme};

use crate::{App, Message, Tab, LABEL_FONT_SIZE, TREE_INDENT};

pub(crate) fn view(app: &App) -> Element<'_, Message> {
    let tabs = row![
        tab_button("Settings", Tab::Settings, app.tab),
        tab_button("Results", Tab::Results, app.tab),
    ]
    .spacing(4);

    let body = match app.tab {
        Tab::Settings => settings_view(app),
        Tab::Results => results_view(app),
    };

    container(column![tabs, body].spacing(10))
        .padding(12)
        .width(Fill)
        .height(Fill)
        .into()
}

fn tab_button(label: &'static str, tab: Tab, active: Tab) -> Element<'static, Message> {
    let style = if tab == active {
        button::primary
    } else {
        button::secondary
    };
    button(text(label))
        .padding([6, 14])
        .style(style)
        .on_press(Message::TabSelected(tab))
        .into()
}

fn settings_view(app: &App) -> Element<'_, Message> {
    let settings = &app.service.settings;

    let theme_choice = AppTheme::ALL.iter().fold(
        row![text("Theme").width(Length::Fixed(90.0))]
            .spacing(16)
            .align_y(Alignment::Center),
        |row, theme| {
            row.push(radio(
                theme.label(),
                *theme,
                Some(settings.theme),
                Message::ThemeSelected,
            ))
        },
    );

    let directory = row![
        text("Directory").width(Length::Fixed(90.0)),
        text_input("Folder to scan...", &settings.directory)
            .on_input(Message::DirectoryChanged)
            .on_submit(Message::ScanClicked)
            .padding(8)
            .width(Fill),
        button(text("Browse...")).on_press(Message::BrowseDirectory),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let filenames = column![
        text("Filenames (one name or pattern per line)"),
        text_editor(&app.filenames)
            .placeholder("README.md")
            .on_action(Message::FilenamesEdited)
            .height(Length::Fixed(180.0)),
    ]
    .spacing(6);

    let actions = row![
        button(text("Scan")).on_press(Message::ScanClicked),
        button(text("Save Settings")).on_press(Message::SaveClicked),
        button(text("Hide to Tray"))
            .style(button::secondary)
            .on_press(Message::HideToTray),
        button(text("Exit"))
            .style(button::danger)
            .on_press(Message::ExitClicked),
    ]
    .spacing(8);

    column![theme_choice, directory, filenames, actions]
        .spacing(14)
        .into()
}

fn results_view(app: &App) -> Element<'_, Message> {
    let summary = match &app.last_report {
        Some(report) if report.is_empty() => format!(
            "{} files matched, none with headings, bullets or tasks",
            report.files_matched
        ),
        Some(report) => format!(
            "{} files matched, {} with outlines, {} errors",
            report.files_matched, report.files_with_outline, report.errors
        ),
        None => "No scan yet. Use Scan on the Settings tab or the tray menu.".to_string(),
    };

    let toolbar = row![
        text(summary).size(13).width(Fill),
        button(text("Expand all"))
            .style(button::secondary)
            .on_press(Message::ExpandAll),
        button(text("Collapse all"))
            .style(button::secondary)
            .on_press(Message::CollapseAll),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut rows = Vec::new();
    outline_rows(app.results(), &app.expanded, &mut Vec::new(), &mut rows);

    column![
        toolbar,
        container(scrollable(Column::with_children(rows).spacing(2).padding(6)))
            .style(container::bordered_box)
            .width(Fill)
            .height(Fill),
    ]
    .spacing(8)
    .into()
}

fn outline_rows<'a>(
    nodes: &'a [OutlineNode],
    expanded: &HashSet<Vec<usize>>,
    path: &mut Vec<usize>,
    rows: &mut Vec<Element<'a, Message>>,
) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        let is_open = expanded.contains(path.as_slice());
        rows.push(outline_row(node, path, is_open));
        if is_open {
            outline_rows(&node.children, expanded, path, rows);
        }
        path.pop();
    }
}

fn outline_row<'a>(node: &'a OutlineNode, path: &[usize], is_open: bool) -> Element<'a, Message> {
    let depth = path.len().saturating_sub(1) as f32;

    let toggle: Element<'a, Message> = if node.has_children() {
        button(text(if is_open { "▾" } else { "▸" }).size(LABEL_FONT_SIZE))
            .padding(0)
            .style(button::text)
            .on_press(Message::ToggleNode(path.to_vec()))
            .into()
    } else {
        text("").into()
    };

    let label = match node.task {
        Some(true) => format!("☑ {}", node.label),
        Some(false) => format!("☐ {}", node.label),
        None => node.label.clone(),
    };

    let mut label = text(label).size(LABEL_FONT_SIZE);
    if let Some(color) = label_color(node) {
        label = label.color(color);
    }

    row![
        container(toggle).width(Length::Fixed(TREE_INDENT)),
        label
    ]
    .spacing(4)
    .align_y(Alignment::Center)
    .padding(Padding {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: depth * TREE_INDENT,
    })
    .into()
}

fn label_color(node: &OutlineNode) -> Option<Color> {
    match node.kind {
        NodeKind::Error => Some(Color::from_rgb8(235, 72, 72)),
        NodeKind::Placeholder => Some(Color::from_rgb8(145, 150, 160)),
        NodeKind::Task if node.is_done() => Some(Color::from_rgb8(117, 160, 120)),
        _ => None,
    }
}
