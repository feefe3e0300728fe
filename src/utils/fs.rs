//! Filesystem helpers for generation output.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `relative_path` - lexical relative path between two absolute paths
//! - `write_if_changed` - skip writes whose bytes are already on disk
//! - `prune_empty_dirs` - remove directories emptied by stale-output cleanup

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Lexical relative path from `from_dir` to `to`.
///
/// Both paths must be absolute (or share the same base); no filesystem access.
///
/// ```ignore
/// relative_path("/p/src/app/(i18n)/en", "/p/src/_app/page.tsx")
///     -> "../../../_app/page.tsx"
/// ```
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from_dir.components().collect();
    let target: Vec<Component<'_>> = to.components().collect();

    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from.len() {
        result.push("..");
    }
    for component in &target[common..] {
        result.push(component.as_os_str());
    }
    result
}

/// Convert a path to a forward-slash string, as used in module specifiers.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Write `content` to `path` unless the file already holds exactly those bytes.
///
/// Parent directories are created as needed. Returns `true` if the file was written.
pub fn write_if_changed(path: &Path, content: &[u8]) -> io::Result<bool> {
    if let Ok(existing) = fs::read(path)
        && existing == content
    {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(true)
}

/// Remove `dir` and its ancestors while they are empty, stopping at `stop`.
pub fn prune_empty_dirs(dir: &Path, stop: &Path) {
    let mut current = Some(dir);
    while let Some(path) = current {
        if path == stop || !path.starts_with(stop) {
            break;
        }
        let is_empty = fs::read_dir(path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if !is_empty || fs::remove_dir(path).is_err() {
            break;
        }
        current = path.parent();
    }
}

/// Remove a directory tree, treating "not found" as success.
pub fn remove_dir_all(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
