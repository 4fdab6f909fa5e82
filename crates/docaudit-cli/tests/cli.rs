use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docaudit").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn audit_fails_on_errors() {
    let home = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();
    write(
        repo.path(),
        ".opencode/skill/review/SKILL.md",
        "---\ndescription: Reviews code\n---\n",
    );

    cmd(&home)
        .arg("--root")
        .arg(repo.path())
        .arg("audit")
        .assert()
        .code(1)
        .stdout(contains("REPOSITORY AUDIT REPORT"))
        .stdout(contains("  ✗ Missing 'name' field"))
        .stdout(contains("Hint: Load 'skill-creator' skill before fixing."))
        .stdout(contains("FAILED: 1 error(s) found"));
}

#[test]
fn audit_passes_with_warnings() {
    let home = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();
    write(
        repo.path(),
        ".opencode/command/release.md",
        "---\ndescription: Cut a release and publish every package to the registry\n---\n",
    );

    cmd(&home)
        .arg("--root")
        .arg(repo.path())
        .arg("audit")
        .assert()
        .success()
        .stdout(contains("got 10"))
        .stdout(contains("PASSED with 1 warning(s)"));
}

#[test]
fn audit_json_reports_ok_flag() {
    let home = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();

    let output = cmd(&home)
        .args(["--json", "audit", "--root"])
        .arg(repo.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ok"], false);
    assert_eq!(
        value["data"]["errors"]["ROOT"][0],
        "Missing root .opencode/ directory"
    );
    assert!(value["data"]["generated_at"].is_string());
}

#[test]
fn inventory_outside_git_is_best_effort() {
    let home = TempDir::new().unwrap();
    let repo = TempDir::new().unwrap();
    write(
        repo.path(),
        ".opencode/agent/build.md",
        "---\ndescription: Builds the project\n---\n",
    );

    cmd(&home)
        .arg("--root")
        .arg(repo.path())
        .args(["inventory", "--base-ref", "origin/main", "--list"])
        .assert()
        .success()
        .stdout(contains("Repository Inventory Report"))
        .stdout(contains("Agents:   1"))
        .stdout(contains("agent\tbuild\tBuilds the project"))
        .stdout(contains("Run `git diff origin/main` for full change details."));
}

#[test]
fn every_command_has_help() {
    let home = TempDir::new().unwrap();
    for args in [vec!["--help"], vec!["audit", "--help"], vec!["inventory", "--help"]] {
        cmd(&home).args(args).assert().success();
    }
}
