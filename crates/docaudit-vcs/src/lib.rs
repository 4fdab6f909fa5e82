//! docaudit VCS
//!
//! Read-only version-control queries used to detect newly added documents.
//!
//! Two operations sit behind [`VersionControl`]: the committed diff against
//! an upstream reference and the working-tree status. [`GitCli`] runs them
//! through the `git` binary with a per-query timeout; tests substitute
//! canned output. [`collect_changes`] merges both into one change set and
//! never fails.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod changes;
pub mod error;
pub mod git;

pub use changes::{collect_changes, parse_name_status, parse_porcelain};
pub use error::VcsError;
pub use git::GitCli;

/// Read-only queries against a version-control system
#[allow(async_fn_in_trait)]
pub trait VersionControl {
    /// `<status>\t<path>` lines for changes between `base_ref` and `HEAD`,
    /// relative to the working directory
    async fn diff_name_status(&self, base_ref: &str) -> error::Result<String>;

    /// Short-form working-tree status (`XY <path>` lines), relative to the
    /// repository top level
    async fn working_tree_status(&self) -> error::Result<String>;

    /// Working directory relative to the repository top level, `/`-terminated
    /// (empty at the top level)
    async fn path_prefix(&self) -> error::Result<String> {
        Ok(String::new())
    }
}
