use std::collections::HashSet;

use iced::Task;
use mdtrayd::{node_at, render_tree, NodeKind, OutlineNode};

use crate::tray::TrayCommand;
use crate::{dialogs, windowing, App, Message, Tab};

pub(crate) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::TabSelected(tab) => {
            app.tab = tab;
        }
        Message::ThemeSelected(theme) => {
            tracing::debug!("theme changed to {}", theme);
            app.service.set_theme(theme);
        }
        Message::DirectoryChanged(directory) => {
            app.service.set_directory(directory);
        }
        Message::BrowseDirectory => {
            if let Some(path) = dialogs::pick_folder(&app.service.settings.directory) {
                app.service.set_directory(path.display().to_string());
            }
        }
        Message::FilenamesEdited(action) => {
            let is_edit = action.is_edit();
            app.filenames.perform(action);
            if is_edit {
                app.sync_filenames();
            }
        }
        Message::ScanClicked => {
            if app.run_scan() {
                app.tab = Tab::Results;
            }
        }
        Message::SaveClicked => {
            app.sync_filenames();
            match app.service.save() {
                Ok(()) => dialogs::show_info("Success", "Settings saved successfully!"),
                Err(err) => {
                    tracing::warn!("saving settings failed: {}", err);
                    dialogs::show_error(&format!("Error saving settings: {}", err));
                }
            }
        }
        Message::HideToTray => {
            return windowing::hide_window();
        }
        Message::ExitClicked => {
            return iced::exit();
        }
        Message::ToggleNode(path) => {
            let is_branch = node_at(app.results(), &path).is_some_and(OutlineNode::has_children);
            if is_branch && !app.expanded.remove(&path) {
                app.expanded.insert(path);
            }
        }
        Message::ExpandAll => {
            app.expanded = branch_paths(app.results());
        }
        Message::CollapseAll => {
            app.expanded.clear();
        }
        Message::PollTray => {
            let commands = match &app.tray {
                Some(tray) => tray.poll(),
                None => Vec::new(),
            };

            let mut tasks = Vec::new();
            for command in commands {
                match command {
                    TrayCommand::Open => {
                        tasks.push(windowing::show_window());
                    }
                    TrayCommand::Scan => {
                        if app.run_scan() {
                            app.tab = Tab::Results;
                            tasks.push(windowing::show_window());
                        }
                    }
                    TrayCommand::Exit => return iced::exit(),
                }
            }

            if !tasks.is_empty() {
                return Task::batch(tasks);
            }
        }
        Message::CloseRequested(id) => {
            tracing::info!("window closed, application minimized to tray");
            return windowing::hide_window_by_id(id);
        }
    }

    Task::none()
}

impl App {
    pub(crate) fn results(&self) -> &[OutlineNode] {
        self.last_report
            .as_ref()
            .map(|report| report.nodes.as_slice())
            .unwrap_or(&[])
    }

    fn sync_filenames(&mut self) {
        let text = self.filenames.text();
        self.service.set_filenames(text.trim_end());
    }

    /// Rebuilds the result tree from the current settings. Returns `false`
    /// when the scan was rejected and a warning was shown.
    pub(crate) fn run_scan(&mut self) -> bool {
        self.sync_filenames();
        self.expanded.clear();
        self.last_report = None;

        match self.service.scan() {
            Ok(report) => {
                tracing::debug!("scan result:\n{}", render_tree(&report.nodes));
                self.expanded = initial_expanded(&report.nodes);
                self.last_report = Some(report);
                true
            }
            Err(err) => {
                tracing::debug!("scan rejected: {}", err);
                dialogs::show_warning(&err.to_string());
                false
            }
        }
    }
}

/// File roots open, everything below them collapsed.
pub(crate) fn initial_expanded(nodes: &[OutlineNode]) -> HashSet<Vec<usize>> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind == NodeKind::File && node.has_children())
        .map(|(index, _)| vec![index])
        .collect()
}

/// Index paths of every node that has children.
pub(crate) fn branch_paths(nodes: &[OutlineNode]) -> HashSet<Vec<usize>> {
    fn walk(nodes: &[OutlineNode], path: &mut Vec<usize>, out: &mut HashSet<Vec<usize>>) {
        for (index, node) in nodes.iter().enumerate() {
            if !node.has_children() {
                continue;
            }
            path.push(index);
            out.insert(path.clone());
            walk(&node.children, path, out);
            path.pop();
        }
    }

    let mut out = HashSet::new();
    walk(nodes, &mut Vec::new(), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdtrayd::parse_text;

    fn sample() -> Vec<OutlineNode> {
        let first = OutlineNode::file(
            "📄 TODO.md",
            parse_text("# Week\n  - chores\n    [ ] dishes\n# Later"),
        );
        vec![first, OutlineNode::error("❌ Error reading x: denied")]
    }

    #[test]
    fn initial_expansion_opens_file_roots_only() {
        let expanded = initial_expanded(&sample());
        assert_eq!(expanded.len(), 1);
        assert!(expanded.contains(&vec![0]));
    }

    #[test]
    fn branch_paths_cover_every_parent() {
        let paths = branch_paths(&sample());
        let expected: HashSet<Vec<usize>> =
            [vec![0], vec![0, 0], vec![0, 0, 0]].into_iter().collect();
        assert_eq!(paths, expected);
    }
}
