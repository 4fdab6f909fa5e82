//! docaudit Rules
//!
//! Convention checks for agent, command and skill definition documents.
//!
//! ## Pipeline
//!
//! - Walk: enumerate every file under the root, hidden directories included
//! - Classify: map each path to a resource kind, or skip it
//! - Validate: apply the kind's frontmatter and body rules
//! - Report: collect errors and warnings per path and decide the exit status
//!
//! Frontmatter values are read with line rules, not a YAML parser.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod audit;
pub mod classify;
pub mod error;
pub mod frontmatter;
pub mod markup;
pub mod validate;
pub mod walker;

pub use audit::{AuditOptions, AuditReport, AuditStatus, Auditor};
pub use error::RuleError;
pub use frontmatter::{FieldValue, Frontmatter};
pub use validate::Validator;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{AuditOptions, AuditReport, AuditStatus, Auditor, Frontmatter, Validator};
}
