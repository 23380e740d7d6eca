use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Settings read from the optional TOML config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Actor recorded for script commands that leave it empty.
    pub default_actor: String,
    /// Source recorded for script commands that leave it empty.
    pub default_source: String,
    pub output_format: OutputFormat,
    /// Log a warning for every journey the workflow audit flags.
    pub audit_warnings: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_actor: "system".into(),
            default_source: "cli".into(),
            output_format: OutputFormat::Text,
            audit_warnings: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}
