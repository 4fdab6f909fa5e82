use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Config file name, looked up in `~/.docaudit/` and in the scanned root
const CONFIG_FILE: &str = "docaudit.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScanConfig {
    pub skip_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_dirs: vec![".git".into(), "node_modules".into()],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InventoryConfig {
    pub base_ref: String,
    pub readme: String,
    pub exclude: Vec<String>,
    pub preview_limit: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_ref: "origin/master".into(),
            readme: "README.md".into(),
            exclude: vec![".opencode/skill/repo-maintenance".into()],
            preview_limit: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VcsConfig {
    pub timeout_secs: u64,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub inventory: InventoryConfig,
    pub vcs: VcsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.docaudit/docaudit.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".docaudit").join(CONFIG_FILE))
    }

    /// File layers: global config, then `<root>/docaudit.toml`
    fn file_layers(
        global: Option<PathBuf>,
        root: &Path,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        let mut config_builder = config::Config::builder();

        // Layer 2: Global config
        if let Some(global) = global {
            config_builder = config_builder.add_source(config::File::from(global).required(false));
        }

        // Layer 3: Local config next to the scanned tree
        config_builder.add_source(config::File::from(root.join(CONFIG_FILE)).required(false))
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.docaudit/docaudit.toml (optional)
    /// 3. Local override: <root>/docaudit.toml (optional)
    /// 4. Environment variables (highest priority)
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        // Layer 4: Environment variables with DOCAUDIT__ prefix
        let mut config_builder = Self::file_layers(Self::global_config_path(), root).add_source(
            config::Environment::with_prefix("DOCAUDIT")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("scan.skip_dirs")
                .with_list_parse_key("inventory.exclude"),
        );

        // Convenience override
        if let Ok(base_ref) = env::var("DOCAUDIT_BASE_REF") {
            config_builder = config_builder.set_override("inventory.base_ref", base_ref)?;
        }

        let config: Self = config_builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
