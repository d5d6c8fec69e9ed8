//! Traversal filter
//!
//! Uses walkdir for a depth-first, lexically sorted walk. Each entry is turned
//! into a [`WalkNode`], run through the [`FilterPolicy`], and either pruned
//! (`skip_current_dir`), skipped, or yielded as a candidate path.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::core::error::FlattenError;
use crate::core::paths::{absolutize, is_executable};
use crate::core::policy::{Decision, FilterPolicy, NodeKind, WalkNode};

/// Lazy sequence of files that passed every rule.
///
/// Stops for good after the first error: there is no skip-and-continue for
/// filesystem failures.
pub struct CandidateWalker {
    inner: walkdir::IntoIter,
    policy: FilterPolicy,
    failed: bool,
}

impl CandidateWalker {
    pub fn new(root: &Path, policy: FilterPolicy) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self {
            inner,
            policy,
            failed: false,
        }
    }

    fn fail(&mut self, err: FlattenError) -> Option<Result<PathBuf, FlattenError>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl Iterator for CandidateWalker {
    type Item = Result<PathBuf, FlattenError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return self.fail(err.into()),
            };

            let node = match walk_node(&entry) {
                Ok(node) => node,
                Err(err) => return self.fail(err),
            };

            match self.policy.decide(&node) {
                Decision::Prune(reason) => {
                    debug!(path = %node.path.display(), reason = %reason, "pruned directory");
                    self.inner.skip_current_dir();
                }
                Decision::Skip(reason) => {
                    debug!(path = %node.path.display(), reason = %reason, "skipped file");
                }
                Decision::Accept => {
                    if node.kind == NodeKind::Directory {
                        continue;
                    }
                    debug!(path = %node.path.display(), "accepted file");
                    return Some(Ok(node.path));
                }
            }
        }
    }
}

/// Stat one entry into a node. Symlinks are resolved to their target; a
/// dangling link is a traversal error.
fn walk_node(entry: &DirEntry) -> Result<WalkNode, FlattenError> {
    let path = entry.path().to_path_buf();
    let file_type = entry.file_type();

    let (kind, resolved) = if file_type.is_dir() {
        (NodeKind::Directory, path.clone())
    } else if file_type.is_symlink() {
        let target = fs::metadata(&path).map_err(|e| FlattenError::traversal(&path, e))?;
        let resolved = absolutize(&path).map_err(|e| FlattenError::traversal(&path, e))?;
        (kind_of(&target), resolved)
    } else {
        let meta = entry.metadata()?;
        (kind_of(&meta), path.clone())
    };

    Ok(WalkNode {
        name: entry.file_name().to_string_lossy().into_owned(),
        depth: entry.depth(),
        path,
        resolved,
        kind,
    })
}

fn kind_of(meta: &Metadata) -> NodeKind {
    if meta.is_file() {
        NodeKind::File {
            executable: is_executable(meta),
        }
    } else {
        // Directories reached through a link are never descended
        NodeKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extensions::ExtensionSet;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn names(root: &Path, policy: FilterPolicy) -> Vec<String> {
        CandidateWalker::new(root, policy)
            .map(|r| r.unwrap())
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    fn all() -> FilterPolicy {
        FilterPolicy::new(ExtensionSet::default())
    }

    #[test]
    fn test_walk_lexical_preorder() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("b.txt"), "b");
        write_file(&dir.path().join("a/z.txt"), "z");
        write_file(&dir.path().join("a/m/k.txt"), "k");
        write_file(&dir.path().join("a.txt"), "a");
        write_file(&dir.path().join("c/d.txt"), "d");

        assert_eq!(
            names(dir.path(), all()),
            vec!["a/m/k.txt", "a/z.txt", "a.txt", "b.txt", "c/d.txt"]
        );
    }

    #[test]
    fn test_walk_prunes_hidden_and_cache_dirs() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join(".git/config"), "x");
        write_file(&dir.path().join(".hidden/c.py"), "x");
        write_file(&dir.path().join("node_modules/left-pad/index.js"), "x");
        write_file(&dir.path().join("src/node_modules/x.js"), "x");
        write_file(&dir.path().join("src/main.py"), "x");
        write_file(&dir.path().join(".env"), "x");

        assert_eq!(names(dir.path(), all()), vec![".env", "src/main.py"]);
    }

    #[test]
    fn test_walk_skips_metadata_files() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("go.mod"), "module x");
        write_file(&dir.path().join("go.sum"), "x");
        write_file(&dir.path().join("main.go"), "package main");

        assert_eq!(names(dir.path(), all()), vec!["main.go"]);
    }

    #[test]
    fn test_walk_applies_extension_set() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("a.py"), "print(1)");
        write_file(&dir.path().join("b.txt"), "x y");
        write_file(&dir.path().join("sub/c.js"), "x");

        let policy = FilterPolicy::new(ExtensionSet::parse(".py,.js"));
        assert_eq!(names(dir.path(), policy), vec!["a.py", "sub/c.js"]);
    }

    #[test]
    fn test_walk_skips_output_sink() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        write_file(&root.join("combined_code.txt"), "old output");
        write_file(&root.join("notes.txt"), "keep");

        let policy = FilterPolicy::new(ExtensionSet::parse(".txt"))
            .with_output_path(root.join("combined_code.txt"));
        assert_eq!(names(&root, policy), vec!["notes.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_executables() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("run.py"), "#!/usr/bin/env python");
        write_file(&dir.path().join("lib.py"), "x = 1");
        fs::set_permissions(
            dir.path().join("run.py"),
            fs::Permissions::from_mode(0o755),
        )
        .unwrap();

        let policy = FilterPolicy::new(ExtensionSet::parse(".py"));
        assert_eq!(names(dir.path(), policy), vec!["lib.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_follows_file_symlinks_but_not_dir_symlinks() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("real/a.txt"), "a");
        std::os::unix::fs::symlink(dir.path().join("real/a.txt"), dir.path().join("link.txt"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("zlinkdir")).unwrap();

        assert_eq!(names(dir.path(), all()), vec!["link.txt", "real/a.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_dangling_symlink_aborts() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("a.txt"), "a");
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("b.txt")).unwrap();
        write_file(&dir.path().join("c.txt"), "c");

        let results: Vec<_> = CandidateWalker::new(dir.path(), all()).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].as_ref().unwrap().ends_with("a.txt"));
        assert!(matches!(
            results[1],
            Err(FlattenError::Traversal { .. })
        ));
    }

    #[test]
    fn test_walk_missing_root_is_traversal_error() {
        let dir = TempDir::new().unwrap();
        let results: Vec<_> = CandidateWalker::new(&dir.path().join("gone"), all()).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(FlattenError::Traversal { .. })));
    }
}
