//! Repository tree walk

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names skipped by default: version control and dependencies
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", "node_modules"];

/// Enumerate every file under `root`, hidden entries included.
///
/// Subtrees whose directory name is in `skip_dirs` are never entered.
/// Order is not guaranteed; callers sort before presenting.
pub fn walk_files(root: &Path, skip_dirs: &[String]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, skip_dirs))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}

fn is_skipped(entry: &DirEntry, skip_dirs: &[String]) -> bool {
    let skipped = entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| skip_dirs.iter().any(|s| s == name));
    if skipped {
        debug!(path = %entry.path().display(), "Skipping directory");
    }
    skipped
}

/// Path of `path` relative to `root`, `/`-separated
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
