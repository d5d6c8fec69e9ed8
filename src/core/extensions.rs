//! Extension allow-list
//!
//! Built once from a comma-separated string such as `.py,.js`. An empty set
//! matches every file.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    exts: BTreeSet<String>,
}

impl ExtensionSet {
    /// Parse a comma-separated list. Entries are trimmed, empties dropped, and
    /// a missing leading `.` is added (`py` is the same as `.py`).
    pub fn parse(list: &str) -> Self {
        let exts = list
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|e| {
                if e.starts_with('.') {
                    e.to_string()
                } else {
                    format!(".{}", e)
                }
            })
            .collect();
        Self { exts }
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }

    /// Whether a file at `path` passes the filter. Comparison is case-sensitive
    /// and uses only the final extension (`a.tar.gz` has `.gz`).
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_empty() {
            return true;
        }
        match extension_of(path) {
            Some(ext) => self.exts.contains(&ext),
            None => false,
        }
    }
}

/// Text from the last `.` of the file name on, dot included.
///
/// Dotfiles count as their own extension (`.env` is `.env`).
fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    name.rfind('.').map(|idx| name[idx..].to_string())
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "*");
        }
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(","))
    }
}
