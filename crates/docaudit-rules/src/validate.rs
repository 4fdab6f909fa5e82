//! Kind-specific document validators

use std::path::Path;

use docaudit_types::{ResourceKind, ValidationResult};
use tracing::debug;

use crate::error::Result;
use crate::frontmatter::{count_words, FieldValue, Frontmatter};
use crate::markup::Markup;

/// Declared agent modes
pub const AGENT_MODES: &[&str] = &["primary", "all", "subagent"];

/// Required word count for primary agent descriptions
const PRIMARY_DESCRIPTION_WORDS: usize = 3;
/// Command descriptions above this word count are flagged
const COMMAND_MAX_WORDS: usize = 7;
/// Minimum number of trigger examples in a description
const MIN_EXAMPLES: usize = 2;
/// Length of the description preview quoted in errors
const PREVIEW_CHARS: usize = 50;

/// Applies the convention rules for each resource kind
#[derive(Debug, Clone)]
pub struct Validator {
    markup: Markup,
}

impl Validator {
    /// Build a validator, compiling its patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            markup: Markup::new()?,
        })
    }

    /// Validate a full document of the given kind.
    ///
    /// A document without frontmatter yields exactly one error and no
    /// further checks.
    pub fn validate(&self, kind: ResourceKind, path: &Path, content: &str) -> ValidationResult {
        let frontmatter = match Frontmatter::extract(content) {
            Ok(fm) => fm,
            Err(e) => {
                debug!(path = %path.display(), "{e}");
                return ValidationResult::from_error(e.to_string());
            }
        };

        match kind {
            ResourceKind::Agent => self.validate_agent(&frontmatter),
            ResourceKind::Command => self.validate_command(&frontmatter),
            ResourceKind::Skill => self.validate_skill(path, &frontmatter),
        }
    }

    /// Agent rules: description shape by mode, mode enum, body markup
    pub fn validate_agent(&self, fm: &Frontmatter) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Some(description) = fm.non_empty_field("description") else {
            result.error("Missing 'description' field");
            return result;
        };
        let mode = fm.non_empty_field("mode").map(|m| m.text);

        if mode.as_deref() == Some("primary") {
            let words = count_words(&description.text);
            if words != PRIMARY_DESCRIPTION_WORDS {
                result.error(format!(
                    "Primary agent description MUST be exactly 3 words, got {words}: \"{}\"",
                    preview(&description.text)
                ));
            }
        } else {
            if needs_literal_block(&description) {
                result.warn("Multiline description SHOULD use '|-' literal block scalar");
            }

            let lower = description.text.to_lowercase();
            if !(lower.contains("use when") || lower.contains("use for")) {
                result.warn("Non-primary agent SHOULD include 'Use when...' trigger contexts");
            }

            let examples = self.markup.count_user_examples(&description.text);
            if examples < MIN_EXAMPLES {
                result.warn(format!(
                    "Non-primary agent SHOULD include trigger examples (user: \"...\" → action) (found {examples})"
                ));
            }
        }

        if let Some(mode) = mode.filter(|m| !AGENT_MODES.contains(&m.as_str())) {
            result.error(format!(
                "Invalid mode '{mode}'. Allowed: {}",
                AGENT_MODES.join(", ")
            ));
        }

        if !self.markup.has_structural_tags(fm.body()) {
            result.warn("Missing XML tags (expected: <role>, <instructions>, <workflow>, etc.)");
        }
        if !self.markup.has_rfc_keywords(fm.body()) {
            result.warn("Missing RFC 2119 keywords (expected: MUST, SHOULD, MAY, etc.)");
        }

        result
    }

    /// Command rules: concise single-line description
    pub fn validate_command(&self, fm: &Frontmatter) -> ValidationResult {
        let mut result = ValidationResult::new();

        let Some(description) = fm.non_empty_field("description") else {
            result.error("Missing 'description' field");
            return result;
        };

        if needs_literal_block(&description) {
            result.warn("Multiline description SHOULD use '|-' literal block scalar");
        }

        let words = count_words(&description.text);
        if words > COMMAND_MAX_WORDS {
            result.warn(format!(
                "Command description SHOULD be concise (3-5 words), got {words}"
            ));
        }

        result
    }

    /// Skill rules: name and description, trigger clauses, directory match
    pub fn validate_skill(&self, path: &Path, fm: &Frontmatter) -> ValidationResult {
        let mut result = ValidationResult::new();

        let name = fm.non_empty_field("name").map(|n| n.text);
        if name.is_none() {
            result.error("Missing 'name' field");
        }

        let Some(description) = fm.non_empty_field("description") else {
            result.error("Missing 'description' field");
            return result;
        };

        if needs_literal_block(&description) {
            result.error("Skill description MUST use '|-' literal block scalar for multiline content");
        }

        let lower = description.text.to_lowercase();
        if !["use for", "use when", "use proactively"]
            .iter()
            .any(|clause| lower.contains(clause))
        {
            result.warn(
                "Skill description SHOULD include 'Use for...' or 'Use proactively when...' triggers",
            );
        }

        let examples = self.markup.count_arrow_examples(&description.text);
        if examples < MIN_EXAMPLES {
            result.warn(format!(
                "Skill description SHOULD include 3-5 examples (found {examples})"
            ));
        }

        let dir_name = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if let Some(name) = name.filter(|n| n != dir_name) {
            result.warn(format!(
                "Skill name '{name}' doesn't match directory name '{dir_name}'"
            ));
        }

        if !self.markup.has_structural_tags(fm.body()) {
            result.warn("Missing XML tags in body");
        }

        result
    }
}

fn needs_literal_block(value: &FieldValue) -> bool {
    value.is_multiline() && !value.literal_block
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
