//! docaudit Inventory
//!
//! Lists agents, commands and skills found in a repository and flags
//! documentation that may lag behind newly added resources.
//!
//! Discovery is deliberately looser than the audit: pluralized directory
//! names are accepted and any document with a frontmatter description
//! counts.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod report;
pub mod scan;

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use docaudit_vcs::{collect_changes, VersionControl};
use tracing::debug;

pub use report::{DocStatus, InventoryReport};
pub use scan::{classify_resource, scan_resources, Inventory};

/// Inventory settings
#[derive(Debug, Clone)]
pub struct InventoryOptions {
    /// Directory names the walker never enters
    pub skip_dirs: Vec<String>,
    /// Path prefixes left out of the scan
    pub exclude: Vec<String>,
    /// Upstream reference for the committed diff
    pub base_ref: String,
    /// Root documentation file, relative to the root
    pub readme: String,
    /// Cap on the other-changes preview
    pub preview_limit: usize,
}

/// Scan `root`, query `vcs` for changes and build the report
pub async fn run_inventory(
    root: &Path,
    vcs: &impl VersionControl,
    options: &InventoryOptions,
) -> Result<InventoryReport> {
    let inventory = scan_resources(root, &options.skip_dirs, &options.exclude);
    let changes = collect_changes(vcs, &options.base_ref).await;

    let readme_path = root.join(&options.readme);
    let readme_text = match std::fs::read(&readme_path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %readme_path.display(), "No root README");
            String::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", readme_path.display()))
        }
    };

    Ok(InventoryReport::analyze(
        root,
        inventory,
        &changes,
        &readme_text,
        &options.base_ref,
        options.preview_limit,
    ))
}
