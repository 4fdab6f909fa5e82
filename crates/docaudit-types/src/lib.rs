//! docaudit Types - Core types shared by the audit and inventory tools
//!
//! This module defines the data model: resource kinds, per-document
//! validation results, inventory entries and version-control change sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a tracked resource document.
///
/// Files that are not tracked resources are represented as `None` by the
/// classifiers rather than by a dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Agent definition (`.opencode/agent/*.md`)
    Agent,
    /// Slash command definition (`.opencode/command/*.md`)
    Command,
    /// Skill definition (`**/skill/<name>/SKILL.md`)
    Skill,
}

impl ResourceKind {
    /// All kinds, in report order
    pub const ALL: [ResourceKind; 3] = [Self::Agent, Self::Command, Self::Skill];

    /// Lowercase singular name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Command => "command",
            Self::Skill => "skill",
        }
    }

    /// Lowercase plural name, used in report headings
    pub fn plural(self) -> &'static str {
        match self {
            Self::Agent => "agents",
            Self::Command => "commands",
            Self::Skill => "skills",
        }
    }

    /// Name of the authoring skill that documents this kind's conventions
    pub fn authoring_skill(self) -> &'static str {
        match self {
            Self::Agent => "agent-architect",
            Self::Command => "command-creator",
            Self::Skill => "skill-creator",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors (blocking) and warnings (advisory) collected for one document.
///
/// Both lists keep append order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Blocking issues
    pub errors: Vec<String>,
    /// Advisory issues
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Result holding a single error
    pub fn from_error(message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.error(message);
        result
    }

    /// Record a blocking issue
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record an advisory issue
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// True if neither errors nor warnings were recorded
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// A resource discovered by the inventory scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Resource kind
    pub kind: ResourceKind,
    /// Path relative to the scanned root, `/`-separated
    pub path: String,
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
}

/// Files changed relative to an upstream reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Newly added (committed, staged or untracked)
    pub added: Vec<String>,
    /// Modified
    pub modified: Vec<String>,
    /// Deleted
    pub deleted: Vec<String>,
}

impl ChangeSet {
    /// Record an added path, ignoring duplicates
    pub fn add_added(&mut self, path: impl Into<String>) {
        push_unique(&mut self.added, path.into());
    }

    /// Record a modified path, ignoring duplicates
    pub fn add_modified(&mut self, path: impl Into<String>) {
        push_unique(&mut self.modified, path.into());
    }

    /// Record a deleted path, ignoring duplicates
    pub fn add_deleted(&mut self, path: impl Into<String>) {
        push_unique(&mut self.deleted, path.into());
    }

    /// Merge another change set into this one, keeping first-seen order
    pub fn merge(&mut self, other: ChangeSet) {
        for path in other.added {
            self.add_added(path);
        }
        for path in other.modified {
            self.add_modified(path);
        }
        for path in other.deleted {
            self.add_deleted(path);
        }
    }

    /// True if no change was recorded
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, path: String) {
    if !list.contains(&path) {
        list.push(path);
    }
}
