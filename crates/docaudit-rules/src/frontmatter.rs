//! Frontmatter extraction and field lookup
//!
//! Documents open with a `---` delimited block of `field: value` lines.
//! Values are read with line rules rather than a YAML parser: the field set
//! is small and fixed by convention.

use crate::error::{Result, RuleError};

/// Characters removed before counting description words
const WORD_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// The leading delimited block of a document and the text after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    raw: String,
    body: String,
}

/// A field value read from frontmatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Value text; multi-line values keep their line breaks
    pub text: String,
    /// True if the value was written as a `|` literal block scalar
    pub literal_block: bool,
}

impl FieldValue {
    fn scalar(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            literal_block: false,
        }
    }

    /// True if the value spans more than one line
    pub fn is_multiline(&self) -> bool {
        self.text.contains('\n')
    }

    /// First line of the value
    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}

impl Frontmatter {
    /// Extract the frontmatter block from a full document.
    ///
    /// The first line must be `---`; the block ends at the next `---` line.
    pub fn extract(content: &str) -> Result<Self> {
        let mut lines = content.split_inclusive('\n');
        let opening = lines.next().ok_or(RuleError::MissingFrontmatter)?;
        if opening.trim_end() != "---" {
            return Err(RuleError::MissingFrontmatter);
        }

        let start = opening.len();
        let mut offset = start;
        for line in lines {
            if line.trim_end() == "---" {
                let raw = content[start..offset].trim_end_matches(['\r', '\n']);
                return Ok(Self {
                    raw: raw.to_string(),
                    body: content[offset + line.len()..].to_string(),
                });
            }
            offset += line.len();
        }

        Err(RuleError::MissingFrontmatter)
    }

    /// Raw text between the delimiters
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Document text after the closing delimiter
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Look up a top-level field. Returns `None` if the field is absent.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let prefix = format!("{name}:");
        let lines: Vec<&str> = self.raw.lines().collect();
        let index = lines.iter().position(|line| line.starts_with(&prefix))?;
        let inline = lines[index][prefix.len()..].trim();

        // Lines indented deeper than the (top-level) field line belong to it
        let continuation: Vec<&str> = lines[index + 1..]
            .iter()
            .take_while(|line| line.trim().is_empty() || line.starts_with([' ', '\t']))
            .copied()
            .collect();

        if is_block_marker(inline, '|') {
            return Some(FieldValue {
                text: dedent(&continuation),
                literal_block: true,
            });
        }

        if is_block_marker(inline, '>') {
            return Some(FieldValue::scalar(dedent(&continuation)));
        }

        let folded = dedent(&continuation);
        let text = match (inline.is_empty(), folded.is_empty()) {
            (_, true) => inline.to_string(),
            (true, false) => folded,
            (false, false) => format!("{inline}\n{folded}"),
        };
        Some(FieldValue::scalar(strip_quotes(&text)))
    }

    /// Look up a field, treating an empty value as absent
    pub fn non_empty_field(&self, name: &str) -> Option<FieldValue> {
        self.field(name).filter(|value| !value.text.is_empty())
    }
}

/// `|`, `|-`, `|+`, `|2-` and friends (same for `>`)
fn is_block_marker(value: &str, marker: char) -> bool {
    value
        .strip_prefix(marker)
        .is_some_and(|rest| rest.chars().all(|c| matches!(c, '-' | '+' | '0'..='9')))
}

fn dedent(lines: &[&str]) -> String {
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min();

    let Some(indent) = indent else {
        return String::new();
    };

    lines
        .iter()
        .map(|line| if line.trim().is_empty() { *line } else { &line[indent..] })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Count words on the first line of a description, ignoring punctuation
pub fn count_words(text: &str) -> usize {
    let first_line = text.lines().next().unwrap_or("");
    first_line
        .replace(WORD_PUNCTUATION, "")
        .split_whitespace()
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(raw: &str) -> Frontmatter {
        Frontmatter::extract(&format!("---\n{raw}\n---\nbody\n")).unwrap()
    }

    #[test]
    fn test_extract_splits_raw_and_body() {
        let doc = "---\nname: review\ndescription: Review code\n---\n\n# Review\n";
        let parsed = Frontmatter::extract(doc).unwrap();
        assert_eq!(parsed.raw(), "name: review\ndescription: Review code");
        assert_eq!(parsed.body(), "\n# Review\n");
    }

    #[test]
    fn test_extract_requires_leading_delimiter() {
        assert!(matches!(
            Frontmatter::extract("# Title\n---\nname: x\n---\n"),
            Err(RuleError::MissingFrontmatter)
        ));
        assert!(matches!(
            Frontmatter::extract("---\nname: x\n"),
            Err(RuleError::MissingFrontmatter)
        ));
        assert!(matches!(
            Frontmatter::extract(""),
            Err(RuleError::MissingFrontmatter)
        ));
    }

    #[test]
    fn test_extract_accepts_crlf() {
        let parsed = Frontmatter::extract("---\r\nmode: primary\r\n---\r\nbody").unwrap();
        assert_eq!(parsed.field("mode").unwrap().text, "primary");
        assert_eq!(parsed.body(), "body");
    }

    #[test]
    fn test_single_line_field_strips_quotes() {
        let parsed = fm("name: \"quoted\"\nother: 'single'\nplain:   spaced value  ");
        assert_eq!(parsed.field("name").unwrap().text, "quoted");
        assert_eq!(parsed.field("other").unwrap().text, "single");
        assert_eq!(parsed.field("plain").unwrap().text, "spaced value");
        assert!(!parsed.field("plain").unwrap().is_multiline());
    }

    #[test]
    fn test_mismatched_quotes_are_kept() {
        let parsed = fm("name: \"half'");
        assert_eq!(parsed.field("name").unwrap().text, "\"half'");
    }

    #[test]
    fn test_missing_field_is_none() {
        let parsed = fm("name: x");
        assert!(parsed.field("description").is_none());
        // prefix of another field name does not count
        let parsed = fm("descriptions: x");
        assert!(parsed.field("description").is_none());
    }

    #[test]
    fn test_literal_block_is_dedented() {
        let parsed = fm("description: |-\n    Reviews code.\n      Use when asked.\n\n    Examples:\nmode: subagent");
        let value = parsed.field("description").unwrap();
        assert!(value.literal_block);
        assert_eq!(value.text, "Reviews code.\n  Use when asked.\n\nExamples:");
        assert_eq!(value.first_line(), "Reviews code.");
        assert_eq!(parsed.field("mode").unwrap().text, "subagent");
    }

    #[test]
    fn test_blank_literal_block_is_empty() {
        let parsed = fm("description: |-\n\n\nname: x");
        let value = parsed.field("description").unwrap();
        assert_eq!(value.text, "");
        assert!(parsed.non_empty_field("description").is_none());
    }

    #[test]
    fn test_plain_continuation_is_multiline_without_block() {
        let parsed = fm("description: First line\n  second line\nname: x");
        let value = parsed.field("description").unwrap();
        assert!(value.is_multiline());
        assert!(!value.literal_block);
        assert_eq!(value.text, "First line\nsecond line");
    }

    #[test]
    fn test_folded_block_is_not_literal() {
        let parsed = fm("description: >-\n  One\n  Two");
        let value = parsed.field("description").unwrap();
        assert!(!value.literal_block);
        assert_eq!(value.text, "One\nTwo");
    }

    #[test]
    fn test_empty_field_is_empty_not_next_line() {
        let parsed = fm("description:\nname: x");
        assert_eq!(parsed.field("description").unwrap().text, "");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("Fix, the bug!"), 3);
        assert_eq!(count_words("Orchestrates complex work\nUse when things"), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" : ; "), 0);
    }
}
