use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

pub const BULLET_GLYPH: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Heading,
    Bullet,
    Task,
    File,
    Error,
    Placeholder,
}

/// One entry of the rendered tree.
///
/// Nodes produced by the parser keep the line they came from in
/// `source_line`; nodes synthesized by the scanner (file roots, read errors,
/// the empty-result placeholder) have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub label: String,
    pub kind: NodeKind,
    pub children: Vec<OutlineNode>,
    pub task: Option<bool>,
    pub source_line: Option<String>,
}

impl OutlineNode {
    fn parsed(kind: NodeKind, label: String, line: &str) -> Self {
        Self {
            label,
            kind,
            children: Vec::new(),
            task: None,
            source_line: Some(line.to_string()),
        }
    }

    fn synthetic(kind: NodeKind, label: String) -> Self {
        Self {
            label,
            kind,
            children: Vec::new(),
            task: None,
            source_line: None,
        }
    }

    pub fn heading(label: impl Into<String>, line: &str) -> Self {
        Self::parsed(NodeKind::Heading, label.into(), line)
    }

    pub fn bullet(label: impl AsRef<str>, line: &str) -> Self {
        Self::parsed(
            NodeKind::Bullet,
            format!("{} {}", BULLET_GLYPH, label.as_ref()),
            line,
        )
    }

    pub fn task(label: impl Into<String>, done: bool, line: &str) -> Self {
        let mut node = Self::parsed(NodeKind::Task, label.into(), line);
        node.task = Some(done);
        node
    }

    pub fn file(label: impl Into<String>, children: Vec<OutlineNode>) -> Self {
        let mut node = Self::synthetic(NodeKind::File, label.into());
        node.children = children;
        node
    }

    pub fn error(label: impl Into<String>) -> Self {
        Self::synthetic(NodeKind::Error, label.into())
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::synthetic(NodeKind::Placeholder, label.into())
    }

    pub fn is_task(&self) -> bool {
        self.task.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.task == Some(true)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }
}

/// Looks up a node by its index path from the given roots.
pub fn node_at<'a>(nodes: &'a [OutlineNode], path: &[usize]) -> Option<&'a OutlineNode> {
    let (first, rest) = path.split_first()?;
    let mut node = nodes.get(*first)?;
    for index in rest {
        node = node.children.get(*index)?;
    }
    Some(node)
}

/// Splits `text` into lines, drops blank ones and parses the rest.
pub fn parse_text(text: &str) -> Vec<OutlineNode> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    parse_lines(&lines)
}

/// Builds the outline tree from non-blank lines, grouping by leading
/// whitespace depth.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<OutlineNode> {
    let mut cursor = 0usize;
    // No line is shallower than level 0, so this consumes every line.
    parse_level(lines, &mut cursor, 0)
}

fn parse_level<S: AsRef<str>>(lines: &[S], cursor: &mut usize, level: usize) -> Vec<OutlineNode> {
    let mut nodes: Vec<OutlineNode> = Vec::new();
    // Indent each entry of `nodes` was parsed at; hoisted runs keep their own.
    let mut indents: Vec<usize> = Vec::new();

    while let Some(line) = lines.get(*cursor) {
        let line = line.as_ref();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            *cursor += 1;
            continue;
        }

        let indent = indent_width(line);
        if indent < level {
            return nodes;
        }

        if indent > level {
            let nested = parse_level(lines, cursor, indent);
            let parent_indent = indents.last().copied();
            match nodes.last_mut() {
                Some(parent) if parent_indent.is_some_and(|p| p < indent) => {
                    parent.children.extend(nested);
                }
                // No shallower sibling to hang the run on: keep it at this level.
                _ => {
                    indents.extend(std::iter::repeat(indent).take(nested.len()));
                    nodes.extend(nested);
                }
            }
            continue;
        }

        *cursor += 1;
        if let Some(node) = classify_line(line, trimmed, indent) {
            nodes.push(node);
            indents.push(indent);
        }
    }

    nodes
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}

fn classify_line(line: &str, trimmed: &str, indent: usize) -> Option<OutlineNode> {
    if trimmed.starts_with('#') {
        let label = trimmed.trim_start_matches('#').trim();
        return Some(OutlineNode::heading(label, line));
    }

    if let Some((done, label)) = strip_checkbox(trimmed) {
        return Some(OutlineNode::task(label, done, line));
    }

    if let Some(rest) = trimmed.strip_prefix('-') {
        return Some(OutlineNode::bullet(rest.trim(), line));
    }

    if indent == 0 {
        return Some(OutlineNode::heading(trimmed, line));
    }

    None
}

fn strip_checkbox(trimmed: &str) -> Option<(bool, &str)> {
    let body = trimmed
        .strip_prefix('-')
        .map(str::trim_start)
        .unwrap_or(trimmed);

    for (marker, done) in [("[ ]", false), ("[x]", true), ("[X]", true)] {
        if let Some(rest) = body.strip_prefix(marker) {
            return Some((done, rest.trim()));
        }
    }

    None
}

/// Renders nodes as indented plain text, two spaces per level.
pub fn render_tree(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(&mut out, node, 0);
    }
    out
}

fn render_node(out: &mut String, node: &OutlineNode, depth: usize) {
    let marker = match node.task {
        Some(true) => "[x] ",
        Some(false) => "[ ] ",
        None => "",
    };
    let _ = writeln!(out, "{}{}{}", "  ".repeat(depth), marker, node.label);
    for child in &node.children {
        render_node(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_line_becomes_heading() {
        let nodes = parse_lines(&["# Title"]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].label, "Title");
        assert_eq!(nodes[0].kind, NodeKind::Heading);
        assert_eq!(nodes[0].task, None);
        assert_eq!(nodes[0].source_line.as_deref(), Some("# Title"));
    }

    #[test]
    fn all_leading_hashes_are_stripped() {
        let nodes = parse_lines(&["###   Deep heading  "]);
        assert_eq!(nodes[0].label, "Deep heading");
    }

    #[test]
    fn nested_bullet_attaches_to_heading() {
        let nodes = parse_lines(&["# Title", "  - item"]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].label, "• item");
        assert_eq!(nodes[0].children[0].kind, NodeKind::Bullet);
    }

    #[test]
    fn checkbox_markers_set_completion() {
        let nodes = parse_lines(&["[x] done", "[ ] todo", "[X] also done"]);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].label, "done");
        assert_eq!(nodes[0].task, Some(true));
        assert_eq!(nodes[1].label, "todo");
        assert_eq!(nodes[1].task, Some(false));
        assert!(nodes[2].is_done());
    }

    #[test]
    fn dashed_checkbox_is_a_task_not_a_bullet() {
        let nodes = parse_lines(&["- [x] shipped", "- [ ] pending"]);
        assert_eq!(nodes[0].kind, NodeKind::Task);
        assert_eq!(nodes[0].label, "shipped");
        assert!(nodes[0].is_done());
        assert_eq!(nodes[1].label, "pending");
        assert!(!nodes[1].is_done());
    }

    #[test]
    fn heading_wins_over_other_markers() {
        let nodes = parse_lines(&["# [x] not a task"]);
        assert_eq!(nodes[0].kind, NodeKind::Heading);
        assert_eq!(nodes[0].label, "[x] not a task");
    }

    #[test]
    fn shallower_line_ends_sibling_run() {
        let lines = [
            "# One",
            "  - a",
            "    - a1",
            "  - b",
            "# Two",
        ];
        let nodes = parse_lines(&lines);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children.len(), 2);
        assert_eq!(nodes[0].children[0].children.len(), 1);
        assert_eq!(nodes[0].children[1].label, "• b");
        assert!(nodes[0].children[1].children.is_empty());
        assert_eq!(nodes[1].label, "Two");
        assert!(nodes[1].children.is_empty());
    }

    #[test]
    fn plain_text_at_top_level_is_heading() {
        let nodes = parse_lines(&["Shopping", "  - milk"]);
        assert_eq!(nodes[0].kind, NodeKind::Heading);
        assert_eq!(nodes[0].label, "Shopping");
        assert_eq!(nodes[0].children[0].label, "• milk");
    }

    #[test]
    fn nested_plain_text_is_skipped() {
        let nodes = parse_lines(&["# Notes", "  just prose", "  - point"]);
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].label, "• point");
    }

    #[test]
    fn indented_first_line_is_hoisted() {
        let nodes = parse_lines(&["  - orphan", "# Top"]);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].label, "• orphan");
        assert_eq!(nodes[1].label, "Top");
    }

    #[test]
    fn hoisted_deep_run_does_not_adopt_shallower_lines() {
        let nodes = parse_lines(&["    - deep", "  - mid"]);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].label, "• deep");
        assert!(nodes[0].children.is_empty());
        assert_eq!(nodes[1].label, "• mid");
    }

    #[test]
    fn line_under_hoisted_run_attaches_when_deeper() {
        let nodes = parse_lines(&["  - first", "    - child", "# Top"]);
        assert_eq!(render_tree(&nodes), "• first\n  • child\nTop\n");
    }

    #[test]
    fn dedent_to_unopened_level_attaches_to_parent_sibling() {
        let lines = ["# A", "    - deep", "  - mid"];
        let nodes = parse_lines(&lines);
        assert_eq!(nodes.len(), 1);
        let labels: Vec<&str> = nodes[0]
            .children
            .iter()
            .map(|node| node.label.as_str())
            .collect();
        assert_eq!(labels, vec!["• deep", "• mid"]);
    }

    #[test]
    fn tabs_count_as_indent() {
        let nodes = parse_lines(&["# A", "\t- tabbed"]);
        assert_eq!(nodes[0].children[0].label, "• tabbed");
    }

    #[test]
    fn parse_text_skips_blank_lines() {
        let nodes = parse_text("# A\n\n   \n  - x\r\n# B\n");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children.len(), 1);
    }

    #[test]
    fn node_at_follows_index_path() {
        let nodes = parse_text("# A\n  - x\n    - y\n# B");
        assert_eq!(node_at(&nodes, &[0, 0, 0]).map(|n| n.label.as_str()), Some("• y"));
        assert_eq!(node_at(&nodes, &[1]).map(|n| n.label.as_str()), Some("B"));
        assert!(node_at(&nodes, &[0, 3]).is_none());
        assert!(node_at(&nodes, &[]).is_none());
    }

    #[test]
    fn node_count_includes_self() {
        let nodes = parse_text("# A\n  - x\n    - y\n  [ ] z");
        assert_eq!(nodes[0].node_count(), 4);
    }

    #[test]
    fn render_tree_indents_children_and_marks_tasks() {
        let nodes = parse_text("# A\n  - x\n  [x] done\n  [ ] todo");
        assert_eq!(
            render_tree(&nodes),
            "A\n  • x\n  [x] done\n  [ ] todo\n"
        );
    }
}
