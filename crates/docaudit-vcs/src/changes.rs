//! Parsing VCS output into change sets
//!
//! Parsers are defensive: lines that do not fit the expected shape are
//! skipped rather than reported.

use docaudit_types::ChangeSet;
use tracing::{debug, warn};

use crate::VersionControl;

/// Parse `diff --name-status` output (`<status>\t<path>` per line).
///
/// Renames and copies are skipped.
pub fn parse_name_status(output: &str) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for line in output.lines() {
        let Some((status, path)) = line.split_once('\t') else {
            continue;
        };
        let path = unquote(path.trim());
        if path.is_empty() {
            continue;
        }

        match status.chars().next() {
            Some('A') => changes.add_added(path),
            Some('M') => changes.add_modified(path),
            Some('D') => changes.add_deleted(path),
            _ => debug!(line, "Skipping name-status line"),
        }
    }

    changes
}

/// Parse short-form `status --porcelain` output (`XY <path>` per line).
///
/// Untracked (`??`) and index-added (`A`) paths count as added; paths
/// with `M` in either column count as modified.
pub fn parse_porcelain(output: &str) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for line in output.lines() {
        let (Some(code), Some(path)) = (line.get(..2), line.get(3..)) else {
            continue;
        };
        let path = porcelain_path(path);
        if path.is_empty() {
            continue;
        }

        let mut columns = code.chars();
        let index = columns.next().unwrap_or(' ');
        let worktree = columns.next().unwrap_or(' ');

        if code == "??" || index == 'A' {
            changes.add_added(path);
        } else if index == 'M' || worktree == 'M' {
            changes.add_modified(path);
        }
    }

    changes
}

/// Keep the destination of a rename and undo git's quoting
fn porcelain_path(raw: &str) -> String {
    unquote(raw.rsplit(" -> ").next().unwrap_or(raw).trim())
}

/// Decode a C-style quoted path (`"caf\303\251.md"`); unquoted paths pass
/// through unchanged
fn unquote(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"').and_then(|p| p.strip_suffix('"')) else {
        return raw.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut rest = inner.bytes().peekable();
    while let Some(byte) = rest.next() {
        if byte != b'\\' {
            bytes.push(byte);
            continue;
        }
        match rest.next() {
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b't') => bytes.push(b'\t'),
            Some(b'n') => bytes.push(b'\n'),
            Some(b'v') => bytes.push(0x0b),
            Some(b'f') => bytes.push(0x0c),
            Some(b'r') => bytes.push(b'\r'),
            Some(first @ b'0'..=b'7') => {
                let mut value = u32::from(first - b'0');
                for _ in 0..2 {
                    let Some(digit) = rest.next_if(|d| matches!(*d, b'0'..=b'7')) else {
                        break;
                    };
                    value = value * 8 + u32::from(digit - b'0');
                }
                bytes.push(u8::try_from(value).unwrap_or(u8::MAX));
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Re-root top-level paths under `prefix`, dropping those outside it
fn strip_prefix(changes: ChangeSet, prefix: &str) -> ChangeSet {
    if prefix.is_empty() {
        return changes;
    }
    let strip = |paths: Vec<String>| -> Vec<String> {
        paths
            .into_iter()
            .filter_map(|path| path.strip_prefix(prefix).map(str::to_string))
            .collect()
    };
    ChangeSet {
        added: strip(changes.added),
        modified: strip(changes.modified),
        deleted: strip(changes.deleted),
    }
}

/// Collect changes since `base_ref` plus working-tree changes, with every
/// path relative to the VCS working directory.
///
/// Best effort: a failed query contributes nothing and is logged.
pub async fn collect_changes(vcs: &impl VersionControl, base_ref: &str) -> ChangeSet {
    let mut changes = ChangeSet::default();

    match vcs.diff_name_status(base_ref).await {
        Ok(output) => changes.merge(parse_name_status(&output)),
        Err(e) => warn!("Committed diff unavailable: {e}"),
    }

    let prefix = match vcs.path_prefix().await {
        Ok(prefix) => prefix,
        Err(e) => {
            debug!("Path prefix unavailable: {e}");
            String::new()
        }
    };

    match vcs.working_tree_status().await {
        Ok(output) => changes.merge(strip_prefix(parse_porcelain(&output), &prefix)),
        Err(e) => warn!("Working-tree status unavailable: {e}"),
    }

    debug!(
        added = changes.added.len(),
        modified = changes.modified.len(),
        deleted = changes.deleted.len(),
        "Collected changes"
    );
    changes
}
