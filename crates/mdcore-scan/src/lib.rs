use std::path::{Path, PathBuf};

use mdcore_outline::{parse_text, NodeKind, OutlineNode};
use walkdir::WalkDir;

pub const NO_MATCHES_LABEL: &str = "No matching files found.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("Please select a valid directory.")]
    InvalidDirectory,
    #[error("Please enter at least one filename to search.")]
    NoPatterns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub directory: PathBuf,
    pub patterns: Vec<FilePattern>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub nodes: Vec<OutlineNode>,
    pub files_matched: usize,
    pub files_with_outline: usize,
    pub errors: usize,
}

impl ScanReport {
    /// Adds a scanned node: errors are always kept, files only when they
    /// produced an outline.
    pub fn push(&mut self, node: OutlineNode) {
        match node.kind {
            NodeKind::Error => {
                self.errors += 1;
                self.nodes.push(node);
            }
            _ if node.has_children() => {
                self.files_with_outline += 1;
                self.nodes.push(node);
            }
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files_with_outline == 0 && self.errors == 0
    }
}

/// File-name pattern with `*` and `?` wildcards, matched ASCII
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    raw: String,
    lowered: String,
}

impl FilePattern {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let lowered = raw.to_ascii_lowercase();
        Self { raw, lowered }
    }

    pub fn has_wildcards(&self) -> bool {
        self.lowered.contains(['*', '?'])
    }

    pub fn matches(&self, file_name: &str) -> bool {
        if self.has_wildcards() {
            wildcard_match_ascii_insensitive(&self.lowered, file_name)
        } else {
            file_name.eq_ignore_ascii_case(&self.raw)
        }
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn wildcard_match_ascii_insensitive(pattern_lower_ascii: &str, text: &str) -> bool {
    let p: Vec<char> = pattern_lower_ascii.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star_pi: Option<usize> = None;
    let mut star_ti = 0usize;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == t[ti].to_ascii_lowercase() || p[pi] == '?') {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star_pi = Some(pi);
            pi += 1;
            star_ti = ti;
        } else if let Some(sp) = star_pi {
            pi = sp + 1;
            star_ti += 1;
            ti = star_ti;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }

    pi == p.len()
}

/// Checks the directory and pattern list before a scan.
pub fn validate<S: AsRef<str>>(directory: &str, patterns: &[S]) -> Result<ScanRequest, ScanError> {
    if directory.trim().is_empty() {
        return Err(ScanError::InvalidDirectory);
    }

    let directory = PathBuf::from(directory.trim());
    if !directory.is_dir() {
        return Err(ScanError::InvalidDirectory);
    }

    let patterns: Vec<FilePattern> = patterns
        .iter()
        .map(|pattern| pattern.as_ref().trim())
        .filter(|pattern| !pattern.is_empty())
        .map(FilePattern::new)
        .collect();

    if patterns.is_empty() {
        return Err(ScanError::NoPatterns);
    }

    Ok(ScanRequest {
        directory,
        patterns,
    })
}

/// Recursively lists files under `root` whose name matches `pattern`.
/// Entries that cannot be read are skipped.
pub fn find_files(root: &Path, pattern: &FilePattern) -> Vec<PathBuf> {
    tracing::debug!(
        "searching for all \"{}\" files inside \"{}\"",
        pattern,
        root.display()
    );

    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if pattern.matches(&name) {
            found.push(entry.into_path());
        }
    }

    tracing::debug!("pattern \"{}\" matched {} files", pattern, found.len());
    found
}

pub fn file_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("📄 {} ({})", name, path.display())
}

pub fn error_label(path: &Path, message: &str) -> String {
    format!("❌ Error reading {}: {}", path.display(), message)
}

/// Reads a file and wraps its parsed outline in a file node. A read failure
/// produces an error node instead.
pub fn outline_file(path: &Path) -> OutlineNode {
    match std::fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            OutlineNode::file(file_label(path), parse_text(&text))
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {}", path.display(), err);
            OutlineNode::error(error_label(path, &err.to_string()))
        }
    }
}

pub fn scan(request: &ScanRequest) -> ScanReport {
    let mut report = ScanReport::default();

    for pattern in &request.patterns {
        for path in find_files(&request.directory, pattern) {
            report.files_matched += 1;
            report.push(outline_file(&path));
        }
    }

    if report.nodes.is_empty() {
        report.nodes.push(OutlineNode::placeholder(NO_MATCHES_LABEL));
    }

    tracing::info!(
        "scan of {} finished: {} matched, {} with outline, {} errors",
        request.directory.display(),
        report.files_matched,
        report.files_with_outline,
        report.errors
    );
    report
}
