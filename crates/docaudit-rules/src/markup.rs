//! Detectors for structural markup in document text
//!
//! Patterns are compiled once when a [`Markup`] is built and reused for
//! every document.

use regex::Regex;

use crate::error::Result;

/// Structural section tags recognised in prompt bodies
pub const STRUCTURAL_TAGS: &[&str] = &[
    "role",
    "instructions",
    "workflow",
    "constraints",
    "examples",
    "context",
    "reference",
    "rules",
    "guidelines",
    "format",
    "core_approach",
    "overview",
    "checklist",
    "best_practices",
];

/// RFC 2119 keywords; longer forms first so alternation prefers them
pub const RFC_KEYWORDS: &[&str] = &[
    "MUST NOT",
    "MUST",
    "SHALL NOT",
    "SHALL",
    "SHOULD NOT",
    "SHOULD",
    "REQUIRED",
    "RECOMMENDED",
    "MAY",
    "OPTIONAL",
];

/// Compiled markup patterns
#[derive(Debug, Clone)]
pub struct Markup {
    fenced_code: Regex,
    inline_code: Regex,
    tags: Vec<Regex>,
    rfc_keyword: Regex,
    user_example: Regex,
    arrow_example: Regex,
}

impl Markup {
    /// Compile all patterns
    pub fn new() -> Result<Self> {
        let tags = STRUCTURAL_TAGS
            .iter()
            .map(|tag| Regex::new(&format!(r"(?is)<{tag}[^>]*>.*?</{tag}>")))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            fenced_code: Regex::new(r"(?s)```.*?```")?,
            inline_code: Regex::new(r"`[^`]+`")?,
            tags,
            rfc_keyword: Regex::new(&format!(r"\b(?:{})\b", RFC_KEYWORDS.join("|")))?,
            user_example: Regex::new(r#"(?i)user:\s*["'].+?["']\s*(?:→|->)"#)?,
            arrow_example: Regex::new(r"\S[^\n]*?(?:→|->)")?,
        })
    }

    /// True if the text holds at least one recognised tag pair outside code
    pub fn has_structural_tags(&self, text: &str) -> bool {
        let no_fenced = self.fenced_code.replace_all(text, "");
        let no_code = self.inline_code.replace_all(&no_fenced, "");
        self.tags.iter().any(|tag| tag.is_match(&no_code))
    }

    /// True if the text uses an uppercase RFC 2119 keyword outside fenced code
    pub fn has_rfc_keywords(&self, text: &str) -> bool {
        let no_fenced = self.fenced_code.replace_all(text, "");
        self.rfc_keyword.is_match(&no_fenced)
    }

    /// Count `user: "..." → action` trigger examples
    pub fn count_user_examples(&self, text: &str) -> usize {
        self.user_example.find_iter(text).count()
    }

    /// Count `<trigger> → action` examples; only the arrow is required
    pub fn count_arrow_examples(&self, text: &str) -> usize {
        self.arrow_example.find_iter(text).count()
    }
}
