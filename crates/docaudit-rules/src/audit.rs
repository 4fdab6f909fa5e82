//! Repository audit: walk, classify, validate, report

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use docaudit_types::{ResourceKind, ValidationResult};
use serde::Serialize;
use tracing::{debug, info};

use crate::classify::{classify, CONFIG_DIR};
use crate::error::{Result, RuleError};
use crate::validate::Validator;
use crate::walker::{relative_path, walk_files, DEFAULT_SKIP_DIRS};

/// Report key for issues not tied to a document
pub const ROOT_KEY: &str = "ROOT";

/// Audit settings
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Directory names the walker never enters
    pub skip_dirs: Vec<String>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Overall outcome of an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// No errors and no warnings
    Clean,
    /// Warnings only
    PassedWithWarnings,
    /// At least one error
    Failed,
}

impl AuditStatus {
    /// Process exit code: 1 on failure, 0 otherwise
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Failed => 1,
            Self::Clean | Self::PassedWithWarnings => 0,
        }
    }
}

/// Aggregate counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditStats {
    /// Agent documents scanned
    pub agents: usize,
    /// Command documents scanned
    pub commands: usize,
    /// Skill documents scanned
    pub skills: usize,
    /// Total errors
    pub errors: usize,
    /// Total warnings
    pub warnings: usize,
}

/// Issues per path plus counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    /// Errors keyed by relative path
    pub errors: BTreeMap<String, Vec<String>>,
    /// Warnings keyed by relative path
    pub warnings: BTreeMap<String, Vec<String>>,
    /// Aggregate counts
    pub stats: AuditStats,
}

impl AuditReport {
    /// Count a scanned document of `kind`
    pub fn count(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Agent => self.stats.agents += 1,
            ResourceKind::Command => self.stats.commands += 1,
            ResourceKind::Skill => self.stats.skills += 1,
        }
    }

    /// Record a document's result under `path`
    pub fn record(&mut self, path: &str, result: ValidationResult) {
        if !result.errors.is_empty() {
            self.stats.errors += result.errors.len();
            self.errors
                .entry(path.to_string())
                .or_default()
                .extend(result.errors);
        }
        if !result.warnings.is_empty() {
            self.stats.warnings += result.warnings.len();
            self.warnings
                .entry(path.to_string())
                .or_default()
                .extend(result.warnings);
        }
    }

    /// Errors dominate warnings
    pub fn status(&self) -> AuditStatus {
        if self.stats.errors > 0 {
            AuditStatus::Failed
        } else if self.stats.warnings > 0 {
            AuditStatus::PassedWithWarnings
        } else {
            AuditStatus::Clean
        }
    }

    /// Render the console report
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "REPOSITORY AUDIT REPORT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "\nScanned: {} agents, {} commands, {} skills",
            self.stats.agents, self.stats.commands, self.stats.skills
        );

        if !self.errors.is_empty() {
            let _ = writeln!(out, "\n❌ ERRORS ({}):", self.stats.errors);
            render_section(&mut out, &self.errors, "✗");
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\n⚠️  WARNINGS ({}):", self.stats.warnings);
            render_section(&mut out, &self.warnings, "⚠");
        }

        let _ = writeln!(out, "\n{rule}");
        let _ = match self.status() {
            AuditStatus::Failed => writeln!(out, "FAILED: {} error(s) found", self.stats.errors),
            AuditStatus::PassedWithWarnings => {
                writeln!(out, "PASSED with {} warning(s)", self.stats.warnings)
            }
            AuditStatus::Clean => writeln!(out, "PASSED: No issues found"),
        };

        out
    }
}

fn render_section(out: &mut String, issues: &BTreeMap<String, Vec<String>>, marker: &str) {
    let _ = writeln!(out, "{}", "-".repeat(40));
    for (path, list) in issues {
        let _ = writeln!(out, "\n{path}:");
        if let Some(hint) = fix_hint(path) {
            let _ = writeln!(out, "  💡 {hint}");
        }
        for issue in list {
            let _ = writeln!(out, "  {marker} {issue}");
        }
    }
}

/// Which authoring skill to load before fixing a path
pub fn fix_hint(path: &str) -> Option<String> {
    classify(path).map(|kind| {
        format!(
            "Hint: Load '{}' skill before fixing.",
            kind.authoring_skill()
        )
    })
}

/// Runs the audit over a repository tree
#[derive(Debug, Clone)]
pub struct Auditor {
    validator: Validator,
    options: AuditOptions,
}

impl Auditor {
    /// Create an auditor
    pub fn new(options: AuditOptions) -> Result<Self> {
        Ok(Self {
            validator: Validator::new()?,
            options,
        })
    }

    /// Audit every tracked document under `root`
    pub fn audit_tree(&self, root: &Path) -> AuditReport {
        let mut report = AuditReport::default();

        if !root.join(CONFIG_DIR).is_dir() {
            report.record(
                ROOT_KEY,
                ValidationResult::from_error(format!("Missing root {CONFIG_DIR}/ directory")),
            );
        }

        for path in walk_files(root, &self.options.skip_dirs) {
            let relative = relative_path(root, &path);
            let Some(kind) = classify(&relative) else {
                continue;
            };

            report.count(kind);
            let result = self.audit_file(kind, &path);
            debug!(
                path = %relative,
                errors = result.errors.len(),
                warnings = result.warnings.len(),
                "Audited {kind}"
            );
            report.record(&relative, result);
        }

        info!(
            agents = report.stats.agents,
            commands = report.stats.commands,
            skills = report.stats.skills,
            "Audit complete"
        );
        report
    }

    /// Read and validate one document; read failures become a single error
    pub fn audit_file(&self, kind: ResourceKind, path: &Path) -> ValidationResult {
        match std::fs::read_to_string(path) {
            Ok(content) => self.validator.validate(kind, path, &content),
            Err(source) => {
                let error = RuleError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                ValidationResult::from_error(error.to_string())
            }
        }
    }
}
