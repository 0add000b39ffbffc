use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Overrides the config file location when set.
pub const CONFIG_PATH_ENV: &str = "AGEXTRACT_CONFIG";

const DEFAULT_MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub parse: ParseConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseConfig {
    /// Title for input without a file name (stdin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_title: Option<String>,
    /// Inputs larger than this are rejected before parsing
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_max_input_bytes() -> u64 {
    DEFAULT_MAX_INPUT_BYTES
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            default_title: None,
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

/// Get the config directory path (~/.config/agextract/)
pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("agextract"))
}

/// Config file path, honoring `AGEXTRACT_CONFIG`.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load config from disk, returning defaults if the file does not exist.
pub fn load_config() -> Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(CliConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CliConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config at {}", path.display()))
}

/// Print the effective config.
pub fn show_config() -> Result<()> {
    let path = config_path()?;
    let config = load_config()?;
    let body = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("# Config file: {}", path.display());
    print!("{body}");
    Ok(())
}
