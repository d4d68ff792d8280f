//! Utilities for summarizing and printing stored patches

use owo_colors::OwoColorize;

/// Per-file counts taken from a `git diff` patch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileStat {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
    pub binary: bool,
}

/// Whole-patch counts; display only, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatchStats {
    pub files: Vec<FileStat>,
}

impl PatchStats {
    /// Parse the output of `git diff`
    ///
    /// Anything that does not look like a git patch yields empty stats.
    pub fn parse(patch: &str) -> Self {
        let mut files: Vec<FileStat> = Vec::new();
        let mut in_hunk = false;

        for line in patch.lines() {
            if let Some(header) = line.strip_prefix("diff --git ") {
                files.push(FileStat {
                    path: path_from_header(header),
                    ..FileStat::default()
                });
                in_hunk = false;
                continue;
            }

            let Some(current) = files.last_mut() else {
                continue;
            };

            if line.starts_with("@@") {
                in_hunk = true;
            } else if !in_hunk {
                if line.starts_with("Binary files ") || line == "GIT binary patch" {
                    current.binary = true;
                } else if let Some(path) = line.strip_prefix("+++ b/") {
                    current.path = path.to_string();
                } else if let Some(path) = line.strip_prefix("rename to ") {
                    current.path = path.to_string();
                }
            } else if line.starts_with('+') {
                current.insertions += 1;
            } else if line.starts_with('-') {
                current.deletions += 1;
            }
        }

        Self { files }
    }

    pub fn files_changed(&self) -> usize {
        self.files.len()
    }

    pub fn insertions(&self) -> usize {
        self.files.iter().map(|f| f.insertions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.files.iter().map(|f| f.deletions).sum()
    }

    /// One-line summary in `git diff --stat` wording
    pub fn summary(&self) -> String {
        let files = self.files_changed();
        let mut parts = vec![format!(
            "{} file{} changed",
            files,
            if files == 1 { "" } else { "s" }
        )];

        let insertions = self.insertions();
        if insertions > 0 {
            parts.push(format!(
                "{} insertion{}(+)",
                insertions,
                if insertions == 1 { "" } else { "s" }
            ));
        }

        let deletions = self.deletions();
        if deletions > 0 {
            parts.push(format!(
                "{} deletion{}(-)",
                deletions,
                if deletions == 1 { "" } else { "s" }
            ));
        }

        parts.join(", ")
    }

    /// Per-file table followed by the summary line
    pub fn render(&self, color: bool) -> String {
        let width = self.files.iter().map(|f| f.path.chars().count()).max().unwrap_or(0);
        let mut output = String::new();

        for file in &self.files {
            let changes = if file.binary {
                "Bin".to_string()
            } else {
                let plus = "+".repeat(file.insertions.min(40));
                let minus = "-".repeat(file.deletions.min(40));
                let bar = if color {
                    format!("{}{}", plus.green(), minus.red())
                } else {
                    format!("{}{}", plus, minus)
                };
                format!("{} {}", file.insertions + file.deletions, bar)
            };
            output.push_str(&format!(" {:<width$} | {}\n", file.path, changes, width = width));
        }

        output.push_str(&format!(" {}\n", self.summary()));
        output
    }
}

/// `a/src/x.rs b/src/x.rs` -> `src/x.rs`
fn path_from_header(header: &str) -> String {
    match header.rsplit_once(" b/") {
        Some((_, path)) => path.to_string(),
        None => header.to_string(),
    }
}

/// Colorize a patch: additions green, deletions red, hunk headers cyan
pub fn colorize_patch(patch: &str) -> String {
    let mut output = String::with_capacity(patch.len() + patch.len() / 4);
    let mut in_hunk = false;

    for line in patch.split_inclusive('\n') {
        let (text, newline) = match line.strip_suffix('\n') {
            Some(text) => (text, "\n"),
            None => (line, ""),
        };

        if text.starts_with("diff --git ") {
            in_hunk = false;
            output.push_str(&text.bold().to_string());
        } else if text.starts_with("@@") {
            in_hunk = true;
            output.push_str(&text.cyan().to_string());
        } else if !in_hunk {
            if text.starts_with("+++") || text.starts_with("---") {
                output.push_str(&text.bold().to_string());
            } else {
                output.push_str(text);
            }
        } else if text.starts_with('+') {
            output.push_str(&text.green().to_string());
        } else if text.starts_with('-') {
            output.push_str(&text.red().to_string());
        } else {
            output.push_str(text);
        }
        output.push_str(newline);
    }

    output
}
