use crate::config::Config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use docaudit_inventory::{run_inventory, InventoryOptions};
use docaudit_rules::{AuditOptions, AuditStatus, Auditor};
use docaudit_vcs::GitCli;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
struct Stamped<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a T,
}

fn print_json<T: Serialize>(ok: bool, report: &T) -> Result<()> {
    let out = JsonOut {
        ok,
        data: Stamped {
            generated_at: Utc::now(),
            report,
        },
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Audit service - runs one command against a repository root
pub struct AuditService {
    config: Config,
    root: PathBuf,
    json: bool,
}

impl AuditService {
    /// Create a new service
    pub fn new(config: Config, root: PathBuf, json: bool) -> Self {
        Self { config, root, json }
    }

    /// Validate every tracked document and print the report
    pub fn audit(&self) -> Result<ExitCode> {
        info!(root = %self.root.display(), "Starting audit");

        let auditor = Auditor::new(AuditOptions {
            skip_dirs: self.config.scan.skip_dirs.clone(),
        })
        .context("Failed to build document rules")?;
        let report = auditor.audit_tree(&self.root);
        let status = report.status();

        if self.json {
            print_json(status != AuditStatus::Failed, &report)?;
        } else {
            print!("{}", report.render());
        }

        Ok(ExitCode::from(status.exit_code()))
    }

    /// Build the inventory, compare with recent changes and print the report
    pub async fn inventory(&self, list: bool) -> Result<ExitCode> {
        info!(
            root = %self.root.display(),
            base_ref = %self.config.inventory.base_ref,
            "Starting inventory"
        );

        let options = InventoryOptions {
            skip_dirs: self.config.scan.skip_dirs.clone(),
            exclude: self.config.inventory.exclude.clone(),
            base_ref: self.config.inventory.base_ref.clone(),
            readme: self.config.inventory.readme.clone(),
            preview_limit: self.config.inventory.preview_limit,
        };
        let git = GitCli::new(&self.root)
            .with_timeout(Duration::from_secs(self.config.vcs.timeout_secs));

        let report = run_inventory(&self.root, &git, &options).await?;

        if self.json {
            print_json(true, &report)?;
        } else {
            print!("{}", report.render(list));
        }

        Ok(ExitCode::SUCCESS)
    }
}
