//! Configuration file support for nuget-depgraph.
//!
//! Provides YAML-based configuration through `nuget-depgraph.config.yml`
//! files placed next to the lock file, including data structures, file
//! loading, and validation. Command-line values always take precedence.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::MatrixFormat;
use crate::graph_analysis::services::DuplicatePolicy;
use crate::shared::error::AppError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "nuget-depgraph.config.yml";

/// Graphviz layout engines accepted for `layout`
pub const LAYOUT_ENGINES: &[&str] = &[
    "dot", "neato", "twopi", "circo", "fdp", "sfdp", "osage", "patchwork",
];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub prefix: Option<String>,
    pub target_framework: Option<String>,
    pub output_dir: Option<String>,
    pub top: Option<usize>,
    pub layout: Option<String>,
    pub render_images: Option<bool>,
    pub matrix_format: Option<String>,
    pub duplicate_policy: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed `matrix_format`, if set
    pub fn matrix_format(&self) -> Result<Option<MatrixFormat>> {
        self.matrix_format
            .as_deref()
            .map(|value| value.parse().map_err(validation))
            .transpose()
    }

    /// Parsed `duplicate_policy`, if set
    pub fn duplicate_policy(&self) -> Result<Option<DuplicatePolicy>> {
        self.duplicate_policy
            .as_deref()
            .map(|value| value.parse().map_err(validation))
            .transpose()
    }
}

fn validation(message: String) -> anyhow::Error {
    AppError::Validation { message }.into()
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    log::debug!("Using config file {}", config_path.display());
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Rejects layout engines Graphviz does not ship
pub fn validate_layout(layout: &str) -> Result<()> {
    if LAYOUT_ENGINES.contains(&layout) {
        return Ok(());
    }
    Err(validation(format!(
        "Unknown layout engine '{}'. Please specify one of: {}",
        layout,
        LAYOUT_ENGINES.join(", ")
    )))
}

/// Rejects a top-N length of zero
pub fn validate_top(top: usize) -> Result<()> {
    if top == 0 {
        return Err(validation("top must be at least 1".to_string()));
    }
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(top) = config.top {
        validate_top(top)?;
    }
    if let Some(ref layout) = config.layout {
        validate_layout(layout)?;
    }
    if let Some(ref target) = config.target_framework {
        if target.trim().is_empty() {
            return Err(validation("target_framework must not be empty".to_string()));
        }
    }
    config.matrix_format()?;
    config.duplicate_policy()?;
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
