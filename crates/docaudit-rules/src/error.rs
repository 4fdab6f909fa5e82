//! Error types for document rule evaluation

use std::path::PathBuf;
use thiserror::Error;

/// Rule evaluation errors
#[derive(Debug, Error)]
pub enum RuleError {
    /// Document does not open with a `---` delimited block
    #[error("Missing or malformed YAML frontmatter (no --- delimiters)")]
    MissingFrontmatter,

    /// Document could not be read
    #[error("Error reading file: {source}")]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A built-in pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, RuleError>;
