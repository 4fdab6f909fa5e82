mod config;
mod service;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use service::AuditService;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "docaudit",
    version,
    about = "Audit agent, command and skill documents for convention compliance"
)]
struct Cli {
    /// Repository root to scan
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate frontmatter, descriptions and markup; exits 1 on errors
    Audit,
    /// List resources and flag documentation that may need updating
    Inventory {
        /// Upstream reference to diff against (overrides config)
        #[arg(long)]
        base_ref: Option<String>,

        /// Print every discovered resource
        #[arg(long)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.root)?;

    docaudit_logging::init_logging(&config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Audit => AuditService::new(config, cli.root, cli.json).audit(),
        Commands::Inventory { base_ref, list } => {
            if let Some(base_ref) = base_ref {
                config.inventory.base_ref = base_ref;
            }
            AuditService::new(config, cli.root, cli.json)
                .inventory(list)
                .await
        }
    }
}
