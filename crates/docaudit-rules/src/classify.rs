//! Path classification into resource kinds

use docaudit_types::ResourceKind;

/// Root configuration directory holding agents and commands
pub const CONFIG_DIR: &str = ".opencode";

/// Canonical skill document file name
pub const SKILL_FILE: &str = "SKILL.md";

const MARKDOWN_EXT: &str = ".md";

/// Strict classification used by the audit.
///
/// - `.opencode/agent/**.md` is an agent
/// - `.opencode/command/**.md` is a command
/// - `**/skill/**/SKILL.md` is a skill
pub fn classify(path: &str) -> Option<ResourceKind> {
    let parts = segments(path);
    let (file, dirs) = parts.split_last()?;

    if file.ends_with(MARKDOWN_EXT) {
        if follows(dirs, CONFIG_DIR, "agent") {
            return Some(ResourceKind::Agent);
        }
        if follows(dirs, CONFIG_DIR, "command") {
            return Some(ResourceKind::Command);
        }
    }

    if *file == SKILL_FILE && dirs.contains(&"skill") {
        return Some(ResourceKind::Skill);
    }

    None
}

/// Permissive classification used for inventory discovery.
///
/// Accepts pluralized directory names anywhere in the path and any
/// `SKILL.*` file. Agent and command candidates still need a frontmatter
/// description before they count; that check needs file content and is
/// left to the caller.
pub fn classify_loose(path: &str) -> Option<ResourceKind> {
    let parts = segments(path);
    let (file, dirs) = parts.split_last()?;
    let in_dir = |names: &[&str]| dirs.iter().any(|d| names.contains(d));

    if file.ends_with(MARKDOWN_EXT) && in_dir(&["agent", "agents"]) {
        Some(ResourceKind::Agent)
    } else if file.ends_with(MARKDOWN_EXT) && in_dir(&["command", "commands"]) {
        Some(ResourceKind::Command)
    } else if in_dir(&["skill"]) && (*file == SKILL_FILE || file.starts_with("SKILL.")) {
        Some(ResourceKind::Skill)
    } else {
        None
    }
}

/// True if the path names a markdown file
pub fn is_markdown(path: &str) -> bool {
    path.ends_with(MARKDOWN_EXT)
}

fn segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

fn follows(dirs: &[&str], parent: &str, child: &str) -> bool {
    dirs.windows(2).any(|pair| pair[0] == parent && pair[1] == child)
}
