//! Inventory report: new resources versus documentation

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use docaudit_rules::classify::is_markdown;
use docaudit_types::{ChangeSet, ResourceKind};
use serde::Serialize;

use crate::scan::{classify_resource, Inventory};

const README: &str = "README.md";

/// Documentation state derived from the change set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// No new agents, commands or skills
    NoNewResources,
    /// New resources exist and the root README already mentions them all
    Documented,
    /// New resources exist that the root README does not mention
    NeedsUpdate,
}

/// Result of comparing the inventory with recent changes
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    /// Reference the committed diff was taken against
    pub base_ref: String,
    /// Everything discovered in the tree
    pub inventory: Inventory,
    /// Documentation state
    pub status: DocStatus,
    /// Newly added agent paths
    pub new_agents: Vec<String>,
    /// Newly added command paths
    pub new_commands: Vec<String>,
    /// Newly added skill paths
    pub new_skills: Vec<String>,
    /// Category directories lacking their own README
    pub readme_needed: Vec<String>,
    /// Changed markdown files that are not resources
    pub other_doc_changes: Vec<String>,
    /// Maximum number of other changes to print
    pub preview_limit: usize,
}

impl InventoryReport {
    /// Analyse `changes` against the tree under `root` and its README text
    pub fn analyze(
        root: &Path,
        inventory: Inventory,
        changes: &ChangeSet,
        readme_text: &str,
        base_ref: &str,
        preview_limit: usize,
    ) -> Self {
        let mut new_agents = Vec::new();
        let mut new_commands = Vec::new();
        let mut new_skills = Vec::new();
        for path in &changes.added {
            match classify_resource(root, path) {
                Some(ResourceKind::Agent) => new_agents.push(path.clone()),
                Some(ResourceKind::Command) => new_commands.push(path.clone()),
                Some(ResourceKind::Skill) => new_skills.push(path.clone()),
                None => {}
            }
        }

        let new_resources: Vec<&String> = new_agents
            .iter()
            .chain(&new_commands)
            .chain(&new_skills)
            .collect();

        let status = if new_resources.is_empty() {
            DocStatus::NoNewResources
        } else if new_resources
            .iter()
            .all(|path| readme_text.contains(top_segment(path)))
        {
            DocStatus::Documented
        } else {
            DocStatus::NeedsUpdate
        };

        let readme_needed: BTreeSet<String> = new_resources
            .iter()
            .filter_map(|path| category_dir(path))
            .filter(|dir| !root.join(dir).join(README).exists())
            .collect();

        let other_doc_changes = changes
            .added
            .iter()
            .chain(&changes.modified)
            .filter(|path| is_markdown(path) && classify_resource(root, path).is_none())
            .cloned()
            .collect();

        Self {
            base_ref: base_ref.to_string(),
            inventory,
            status,
            new_agents,
            new_commands,
            new_skills,
            readme_needed: readme_needed.into_iter().collect(),
            other_doc_changes,
            preview_limit,
        }
    }

    /// Render the console report; `list` adds every discovered resource
    pub fn render(&self, list: bool) -> String {
        let mut out = String::new();
        let heavy = "=".repeat(50);
        let light = "-".repeat(50);

        let _ = writeln!(out, "Repository Inventory Report");
        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "Agents:   {}", self.inventory.agents.len());
        let _ = writeln!(out, "Commands: {}", self.inventory.commands.len());
        let _ = writeln!(out, "Skills:   {}", self.inventory.skills.len());

        if list {
            let _ = writeln!(out);
            for entry in self.inventory.iter() {
                let _ = writeln!(out, "{}\t{}\t{}", entry.kind, entry.name, entry.description);
            }
        }

        if self.status == DocStatus::Documented {
            let _ = writeln!(out, "\n{heavy}");
            self.render_up_to_date(&mut out);
            return out;
        }

        if self.status == DocStatus::NeedsUpdate {
            let _ = writeln!(out, "\n{light}\nNEW RESOURCES DETECTED\n{light}");
            for (kind, paths) in self.new_by_kind() {
                if !paths.is_empty() {
                    let _ = writeln!(out, "\n🆕 New {} ({}):", kind.plural(), paths.len());
                    for path in paths {
                        let _ = writeln!(out, "  + {path}");
                    }
                }
            }

            let _ = writeln!(out, "\n{light}\nDOCUMENTATION ACTIONS REQUIRED\n{light}");
            if !self.readme_needed.is_empty() {
                let _ = writeln!(out, "\n📄 These directories need a README.md:");
                for dir in &self.readme_needed {
                    let _ = writeln!(out, "  → {dir}/README.md");
                }
            }

            let _ = writeln!(out, "\n📝 Main README.md may need updating to reflect:");
            for (kind, paths) in self.new_by_kind() {
                if !paths.is_empty() {
                    let _ = writeln!(out, "  - {} new {}(s)", paths.len(), kind);
                }
            }
        }

        if !self.other_doc_changes.is_empty() {
            let _ = writeln!(
                out,
                "\n📋 Other documentation changes ({}):",
                self.other_doc_changes.len()
            );
            for path in self.other_doc_changes.iter().take(self.preview_limit) {
                let _ = writeln!(out, "  - {path}");
            }
            if self.other_doc_changes.len() > self.preview_limit {
                let _ = writeln!(
                    out,
                    "  ... and {} more",
                    self.other_doc_changes.len() - self.preview_limit
                );
            }
        }

        let _ = writeln!(out, "\n{heavy}");
        if self.status == DocStatus::NeedsUpdate {
            let _ = writeln!(out, "ACTION: Update documentation for new resources listed above.");
            let _ = writeln!(out, "Run `git diff {}` for full change details.", self.base_ref);
        } else {
            self.render_up_to_date(&mut out);
        }

        out
    }

    fn render_up_to_date(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "No new agents/commands/skills detected. Documentation likely up to date."
        );
        let _ = writeln!(out, "Run `git diff {}` for full change details.", self.base_ref);
    }

    fn new_by_kind(&self) -> [(ResourceKind, &Vec<String>); 3] {
        [
            (ResourceKind::Agent, &self.new_agents),
            (ResourceKind::Command, &self.new_commands),
            (ResourceKind::Skill, &self.new_skills),
        ]
    }
}

fn top_segment(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}

/// `agents/<category>` for paths below a category directory
fn category_dir(path: &str) -> Option<String> {
    let parts: Vec<&str> = path.split('/').collect();
    let index = parts.iter().position(|part| *part == "agents")?;
    // the category must be a directory, not the file itself
    (index + 2 < parts.len()).then(|| parts[..index + 2].join("/"))
}
