//! Configuration management for the vlsm CLI

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Output format when `--format` is not given
    pub default_format: OutputFormat,

    /// Color output
    pub color: bool,
}

impl CliConfig {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        match Self::config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Get the default config path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vlsm").join("config.toml"))
    }

    /// Apply process-wide settings (color)
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Table,
            color: true,
        }
    }
}
