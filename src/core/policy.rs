//! Inclusion/exclusion policy
//!
//! Directories can be *pruned* (the whole subtree is skipped). Files can be
//! *skipped* (only that entry is dropped). Everything else is accepted:
//! accepted directories are descended into, accepted files are aggregated.

use std::fmt;
use std::path::PathBuf;

use crate::core::extensions::ExtensionSet;
use crate::core::paths::is_hidden_name;

/// Package-manager module caches.
pub const DEPENDENCY_CACHE_DIRS: &[&str] = &[
    "node_modules",
    "bower_components",
    "jspm_packages",
    "__pycache__",
];

/// Lock files and module manifests.
pub const BUILD_METADATA_FILES: &[&str] = &[
    "go.mod",
    "go.sum",
    "package-lock.json",
    "npm-shrinkwrap.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "Gemfile.lock",
    "poetry.lock",
    "composer.lock",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    /// Regular file, or a symlink resolving to one.
    File { executable: bool },
    /// Fifo, socket, device node, or a symlink to a directory.
    Other,
}

/// One entry visited during the walk. Lives for a single decision.
#[derive(Debug, Clone)]
pub struct WalkNode {
    /// Absolute path as walked.
    pub path: PathBuf,
    /// Symlink-resolved absolute path (same as `path` for non-links).
    pub resolved: PathBuf,
    pub name: String,
    pub kind: NodeKind,
    /// Distance from the walk root (root = 0).
    pub depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    Hidden,
    DependencyCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    OutputSink,
    BuildMetadata,
    Executable,
    ExtensionMismatch,
    NotRegular,
}

impl PruneReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PruneReason::Hidden => "hidden",
            PruneReason::DependencyCache => "dependency-cache",
        }
    }
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::OutputSink => "output-sink",
            SkipReason::BuildMetadata => "build-metadata",
            SkipReason::Executable => "executable",
            SkipReason::ExtensionMismatch => "extension-mismatch",
            SkipReason::NotRegular => "not-regular",
        }
    }
}

impl fmt::Display for PruneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Prune(PruneReason),
    Skip(SkipReason),
}

/// Policy applied to every node of the walk.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    extensions: ExtensionSet,
    output_path: Option<PathBuf>,
}

impl FilterPolicy {
    pub fn new(extensions: ExtensionSet) -> Self {
        Self {
            extensions,
            output_path: None,
        }
    }

    /// Resolved absolute path of the output sink, which must never be read back.
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn decide(&self, node: &WalkNode) -> Decision {
        match node.kind {
            NodeKind::Directory => self.decide_dir(node),
            NodeKind::File { executable } => self.decide_file(node, executable),
            NodeKind::Other => Decision::Skip(SkipReason::NotRegular),
        }
    }

    fn decide_dir(&self, node: &WalkNode) -> Decision {
        // The root is whatever the user asked for, even `./.config`
        if node.depth == 0 {
            return Decision::Accept;
        }
        if is_hidden_name(&node.name) {
            return Decision::Prune(PruneReason::Hidden);
        }
        if DEPENDENCY_CACHE_DIRS.contains(&node.name.as_str()) {
            return Decision::Prune(PruneReason::DependencyCache);
        }
        Decision::Accept
    }

    fn decide_file(&self, node: &WalkNode, executable: bool) -> Decision {
        if self.output_path.as_deref() == Some(node.resolved.as_path()) {
            return Decision::Skip(SkipReason::OutputSink);
        }
        if BUILD_METADATA_FILES.contains(&node.name.as_str()) {
            return Decision::Skip(SkipReason::BuildMetadata);
        }
        if executable {
            return Decision::Skip(SkipReason::Executable);
        }
        if !self.extensions.matches(&node.path) {
            return Decision::Skip(SkipReason::ExtensionMismatch);
        }
        Decision::Accept
    }
}
