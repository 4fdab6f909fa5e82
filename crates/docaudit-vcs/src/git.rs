//! Git command-line backend

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, VcsError};
use crate::VersionControl;

/// Default per-query timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runs read-only `git` queries in a working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    working_dir: PathBuf,
    timeout: Duration,
}

impl GitCli {
    /// Create a runner for `working_dir` with the default timeout
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the per-query timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        debug!(command = %command, dir = %self.working_dir.display(), "Running git query");

        let child = Command::new("git")
            .args(args)
            .current_dir(&self.working_dir)
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| VcsError::Timeout {
                command: command.clone(),
                timeout: self.timeout.as_secs(),
            })?
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    async fn diff_name_status(&self, base_ref: &str) -> Result<String> {
        let range = format!("{base_ref}...HEAD");
        self.run(&["diff", "--relative", "--name-status", &range]).await
    }

    async fn working_tree_status(&self) -> Result<String> {
        self.run(&["status", "--porcelain", "--untracked-files=all", "--", "."]).await
    }

    async fn path_prefix(&self) -> Result<String> {
        let prefix = self.run(&["rev-parse", "--show-prefix"]).await?;
        Ok(prefix.trim().to_string())
    }
}
