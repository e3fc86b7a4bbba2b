//! Tool configuration file
//!
//! Every field is optional in the JSON; command-line flags take precedence
//! over what is configured here.

use anyhow::{Context, Result};
use pdf_invoice::NumberFormat;
use pdf_payload::PayloadOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub payload: PayloadOptions,
    pub number_format: NumberFormat,
    /// Letterhead drawn beneath the first page
    pub letterhead: Option<PathBuf>,
    /// Background for the following pages
    pub background: Option<PathBuf>,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl ToolConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.payload.validate().context("Invalid payload settings")?;
        Ok(())
    }
}
