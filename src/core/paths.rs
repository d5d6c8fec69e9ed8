//! Path and permission helpers

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// File or directory name without its parent path.
///
/// Falls back to the full path for roots like `/` that have no name.
pub fn base_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

/// Bytes of a name exactly as the filesystem stores them.
#[cfg(unix)]
pub fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
pub fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Check if an entry name is hidden (starts with '.')
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Any of the owner/group/other execute bits is set.
#[cfg(unix)]
pub fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
pub fn is_executable(_metadata: &Metadata) -> bool {
    false
}

/// Resolve to an absolute path with symlinks and `..` removed.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    path.canonicalize()
}
