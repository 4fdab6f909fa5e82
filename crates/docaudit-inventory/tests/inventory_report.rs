//! Inventory runs over fixture trees with canned VCS output

use docaudit_inventory::{run_inventory, scan_resources, DocStatus, InventoryOptions};
use docaudit_vcs::error::Result;
use docaudit_vcs::{GitCli, VcsError, VersionControl};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

struct CannedVcs {
    diff: &'static str,
    status: &'static str,
}

impl VersionControl for CannedVcs {
    async fn diff_name_status(&self, _base_ref: &str) -> Result<String> {
        Ok(self.diff.to_string())
    }

    async fn working_tree_status(&self) -> Result<String> {
        Ok(self.status.to_string())
    }
}

struct BrokenVcs;

impl VersionControl for BrokenVcs {
    async fn diff_name_status(&self, base_ref: &str) -> Result<String> {
        Err(VcsError::Timeout {
            command: format!("git diff --name-status {base_ref}...HEAD"),
            timeout: 10,
        })
    }

    async fn working_tree_status(&self) -> Result<String> {
        Err(VcsError::Failed {
            command: "git status --porcelain".into(),
            status: "exit status: 128".into(),
            stderr: "fatal: not a git repository".into(),
        })
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn options() -> InventoryOptions {
    InventoryOptions {
        skip_dirs: vec![".git".into(), "node_modules".into()],
        exclude: vec![".opencode/skill/repo-maintenance".into()],
        base_ref: "origin/master".into(),
        readme: "README.md".into(),
        preview_limit: 5,
    }
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "agents/infra/.opencode/agent/deploy.md",
        "---\ndescription: |-\n  Deploys services.\n  Use when shipping.\nmode: subagent\n---\nbody\n",
    );
    write(
        root,
        ".opencode/command/test.md",
        "---\ndescription: \"Run all tests\"\n---\n",
    );
    write(root, ".opencode/agents/notes.md", "no frontmatter here\n");
    write(
        root,
        ".opencode/skill/review/SKILL.md",
        "---\ndescription: Reviews code\n---\n",
    );
    write(
        root,
        ".opencode/skill/repo-maintenance/SKILL.md",
        "---\nname: repo-maintenance\ndescription: Maintains the repo\n---\n",
    );
    tmp
}

#[test]
fn test_scan_applies_permissive_rules() {
    let tmp = fixture();
    let skip = options().skip_dirs;
    let inventory = scan_resources(tmp.path(), &skip, &options().exclude);

    assert_eq!(inventory.agents.len(), 1);
    assert_eq!(inventory.agents[0].name, "deploy");
    assert_eq!(inventory.agents[0].description, "Deploys services.");

    assert_eq!(inventory.commands.len(), 1);
    assert_eq!(inventory.commands[0].description, "Run all tests");

    // name falls back to the directory; the maintenance skill is excluded
    assert_eq!(inventory.skills.len(), 1);
    assert_eq!(inventory.skills[0].name, "review");
    assert_eq!(inventory.skills[0].path, ".opencode/skill/review/SKILL.md");
}

#[tokio::test]
async fn test_new_undocumented_agent_needs_update() {
    let tmp = fixture();
    let root = tmp.path();
    write(root, "README.md", "# Repo\n\nSee .opencode for commands.\n");
    write(root, "docs/guide.md", "# Guide\n");

    let vcs = CannedVcs {
        diff: "A\tagents/infra/.opencode/agent/deploy.md\nM\tREADME.md\n",
        status: "?? docs/guide.md\n?? agents/infra/.opencode/agent/deploy.md\n",
    };
    let report = run_inventory(root, &vcs, &options()).await.unwrap();

    assert_eq!(report.status, DocStatus::NeedsUpdate);
    assert_eq!(report.new_agents, vec!["agents/infra/.opencode/agent/deploy.md"]);
    assert!(report.new_commands.is_empty());
    assert_eq!(report.readme_needed, vec!["agents/infra"]);
    assert_eq!(report.other_doc_changes, vec!["docs/guide.md", "README.md"]);

    let text = report.render(false);
    assert!(text.contains("NEW RESOURCES DETECTED"));
    assert!(text.contains("🆕 New agents (1):"));
    assert!(text.contains("  → agents/infra/README.md"));
    assert!(text.contains("  - 1 new agent(s)"));
    assert!(text.contains("📋 Other documentation changes (2):"));
    assert!(text.contains("ACTION: Update documentation for new resources listed above."));
    assert!(text.contains("Run `git diff origin/master` for full change details."));
}

#[tokio::test]
async fn test_mentioned_resources_are_up_to_date() {
    let tmp = fixture();
    let root = tmp.path();
    write(root, "README.md", "# Repo\n\nCategories live under agents/.\n");
    write(root, "agents/infra/README.md", "# Infra\n");

    let vcs = CannedVcs {
        diff: "A\tagents/infra/.opencode/agent/deploy.md\n",
        status: "?? docs/other.md\n",
    };
    let report = run_inventory(root, &vcs, &options()).await.unwrap();

    assert_eq!(report.status, DocStatus::Documented);
    assert!(report.readme_needed.is_empty());

    let text = report.render(false);
    assert!(text.contains("Documentation likely up to date."));
    assert!(!text.contains("Other documentation changes"));
}

#[tokio::test]
async fn test_vcs_failure_means_no_changes() {
    let tmp = fixture();
    let report = run_inventory(tmp.path(), &BrokenVcs, &options())
        .await
        .unwrap();

    assert_eq!(report.status, DocStatus::NoNewResources);
    assert!(report.other_doc_changes.is_empty());

    let text = report.render(true);
    assert!(text.contains("Agents:   1"));
    assert!(text.contains("Commands: 1"));
    assert!(text.contains("Skills:   1"));
    assert!(text.contains("command\ttest\tRun all tests"));
    assert!(text.contains("No new agents/commands/skills detected."));
}

#[tokio::test]
async fn test_other_changes_preview_is_capped() {
    let tmp = fixture();
    let vcs = CannedVcs {
        diff: "M\ta.md\nM\tb.md\nM\tc.md\nM\td.md\nM\te.md\nM\tf.md\nM\tg.md\nM\tsrc/lib.rs\n",
        status: "",
    };
    let report = run_inventory(tmp.path(), &vcs, &options()).await.unwrap();

    assert_eq!(report.other_doc_changes.len(), 7);
    let text = report.render(false);
    assert!(text.contains("  - e.md"));
    assert!(!text.contains("  - f.md"));
    assert!(text.contains("  ... and 2 more"));
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

#[tokio::test]
async fn test_subdirectory_root_detects_new_agent() {
    let tmp = TempDir::new().unwrap();
    let top = tmp.path();
    git(top, &["init", "-q"]);
    git(top, &["config", "user.name", "Docaudit Test"]);
    git(top, &["config", "user.email", "test@example.com"]);
    git(top, &["config", "commit.gpgsign", "false"]);
    write(top, "sub/README.md", "# Sub\n");
    git(top, &["add", "."]);
    git(top, &["commit", "-q", "-m", "init"]);
    git(top, &["branch", "base"]);

    write(
        top,
        "sub/.opencode/agent/deploy.md",
        "---\ndescription: Deploys services\n---\n",
    );

    let root = top.join("sub");
    let options = InventoryOptions {
        base_ref: "base".into(),
        ..options()
    };
    let report = run_inventory(&root, &GitCli::new(&root), &options)
        .await
        .unwrap();

    assert_eq!(report.inventory.agents.len(), 1);
    assert_eq!(report.new_agents, vec![".opencode/agent/deploy.md"]);
    assert_eq!(report.status, DocStatus::NeedsUpdate);
}
