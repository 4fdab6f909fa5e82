//! Error types for version-control queries

use thiserror::Error;

/// Version-control query errors
#[derive(Debug, Error)]
pub enum VcsError {
    /// The VCS binary could not be started
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        /// Command line that failed
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The query did not finish in time
    #[error("'{command}' timeout after {timeout}s")]
    Timeout {
        /// Command line that timed out
        command: String,
        /// Timeout in seconds
        timeout: u64,
    },

    /// The query exited with a non-zero status
    #[error("'{command}' exited with {status}: {stderr}")]
    Failed {
        /// Command line that failed
        command: String,
        /// Exit status description
        status: String,
        /// Captured stderr
        stderr: String,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, VcsError>;
