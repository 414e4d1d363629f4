//! CLI configuration: detector thresholds and the default output format.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradebook_core::detector::DetectorConfig;

/// Environment variable that overrides `default_format`.
pub const FORMAT_ENV: &str = "GRADEBOOK_FORMAT";

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format '{other}' (expected text or json)"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Top-level gradebook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Output format used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,

    #[serde(default)]
    pub detector: DetectorConfig,
}

fn default_format() -> String {
    "text".into()
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            detector: DetectorConfig::default(),
        }
    }
}

impl GradebookConfig {
    /// Resolve the output format, preferring an explicit `--format` value.
    pub fn output_format(&self, requested: Option<&str>) -> Result<OutputFormat> {
        requested.unwrap_or(&self.default_format).parse()
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// `GRADEBOOK_FORMAT` overrides `default_format` from any source.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradebookConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    Ok(apply_format_override(config, std::env::var(FORMAT_ENV).ok()))
}

fn apply_format_override(mut config: GradebookConfig, format: Option<String>) -> GradebookConfig {
    if let Some(format) = format.filter(|f| !f.trim().is_empty()) {
        config.default_format = format;
    }
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
