//! Permissive resource discovery

use std::fs;
use std::path::Path;

use docaudit_rules::classify::classify_loose;
use docaudit_rules::walker::{relative_path, walk_files};
use docaudit_rules::Frontmatter;
use docaudit_types::{ResourceEntry, ResourceKind};
use serde::Serialize;
use tracing::{debug, info, warn};

const NO_DESCRIPTION: &str = "No description";
const MAX_SKILL_DESCRIPTION: usize = 80;

/// Resources discovered under a root, by kind
#[derive(Debug, Clone, Default, Serialize)]
pub struct Inventory {
    /// Agent definitions
    pub agents: Vec<ResourceEntry>,
    /// Command definitions
    pub commands: Vec<ResourceEntry>,
    /// Skill definitions
    pub skills: Vec<ResourceEntry>,
}

impl Inventory {
    fn push(&mut self, entry: ResourceEntry) {
        match entry.kind {
            ResourceKind::Agent => self.agents.push(entry),
            ResourceKind::Command => self.commands.push(entry),
            ResourceKind::Skill => self.skills.push(entry),
        }
    }

    /// Entries of every kind, in report order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.agents
            .iter()
            .chain(&self.commands)
            .chain(&self.skills)
    }

    fn sort(&mut self) {
        for list in [&mut self.agents, &mut self.commands, &mut self.skills] {
            list.sort_by(|a, b| a.path.cmp(&b.path));
        }
    }
}

/// Walk `root` and collect every resource the permissive rules accept.
///
/// `exclude` holds path prefixes (relative to `root`) to leave out.
pub fn scan_resources(root: &Path, skip_dirs: &[String], exclude: &[String]) -> Inventory {
    let mut inventory = Inventory::default();

    for path in walk_files(root, skip_dirs) {
        let relative = relative_path(root, &path);
        if is_excluded(&relative, exclude) {
            debug!(path = %relative, "Excluded from inventory");
            continue;
        }
        if let Some(entry) = read_entry(root, &relative) {
            inventory.push(entry);
        }
    }

    inventory.sort();
    info!(
        agents = inventory.agents.len(),
        commands = inventory.commands.len(),
        skills = inventory.skills.len(),
        "Inventory scan complete"
    );
    inventory
}

/// Classify a (possibly changed) path with the permissive rules
pub fn classify_resource(root: &Path, relative: &str) -> Option<ResourceKind> {
    match classify_loose(relative)? {
        ResourceKind::Skill => Some(ResourceKind::Skill),
        kind => {
            let frontmatter = read_frontmatter(&root.join(relative))?;
            frontmatter.field("description").map(|_| kind)
        }
    }
}

fn read_entry(root: &Path, relative: &str) -> Option<ResourceEntry> {
    let kind = classify_loose(relative)?;
    let path = root.join(relative);
    let frontmatter = read_frontmatter(&path);

    let (name, description) = match kind {
        ResourceKind::Agent | ResourceKind::Command => {
            let description = frontmatter.as_ref()?.field("description")?;
            (file_stem(&path), summary(Some(description.first_line())))
        }
        ResourceKind::Skill => {
            let field = |name: &str| frontmatter.as_ref().and_then(|fm| fm.non_empty_field(name));
            let name = field("name").map_or_else(|| parent_name(&path), |n| n.text);
            let description = field("description");
            let description = summary(description.as_ref().map(|d| d.first_line()));
            (name, truncate(&description, MAX_SKILL_DESCRIPTION))
        }
    };

    Some(ResourceEntry {
        kind,
        path: relative.to_string(),
        name,
        description,
    })
}

fn read_frontmatter(path: &Path) -> Option<Frontmatter> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), "Failed to read: {e}");
            return None;
        }
    };
    Frontmatter::extract(&String::from_utf8_lossy(&bytes)).ok()
}

fn is_excluded(relative: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|prefix| {
        let prefix = prefix.trim_end_matches('/');
        relative == prefix
            || relative
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn summary(first_line: Option<&str>) -> String {
    match first_line.map(str::trim) {
        Some(line) if !line.is_empty() => line.to_string(),
        _ => NO_DESCRIPTION.to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parent_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
