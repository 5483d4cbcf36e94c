//! Configuration loading from symtally.toml.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Main configuration structure for symtally.toml.
///
/// Every field is optional; command-line flags take precedence over
/// whatever is preset here.
#[derive(Debug, Deserialize, Default)]
pub struct SymtallyConfig {
    /// Regex filter on compilation-unit names.
    pub project_pattern: Option<String>,
    /// Suppress per-entry detail output.
    pub quiet: Option<bool>,
    /// Summary section selection.
    pub summary: Option<SummaryConfig>,
}

/// Which summary sections the footer carries.
#[derive(Debug, Deserialize, Default)]
pub struct SummaryConfig {
    /// Emit the unused abstract/interface member grouping.
    pub unused: Option<bool>,
    /// Emit the call-count histogram.
    pub callstats: Option<bool>,
}

/// Loads configuration from symtally.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<SymtallyConfig>> {
    let path = root.join("symtally.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let cfg = toml::from_str(&content).context("Invalid symtally.toml")?;
    Ok(Some(cfg))
}
