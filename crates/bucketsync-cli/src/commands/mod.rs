//! CLI command implementations.

pub mod completions;
pub mod config;
pub mod reset;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bucketsync_core::config::Config;

/// Loads and validates the configuration from the override path or the
/// platform default. Validation failures list every offending field.
pub(crate) fn load_config(config_path: Option<&Path>) -> Result<(Config, PathBuf)> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);
    let config = Config::load(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        anyhow::bail!(
            "Invalid configuration in {}:\n  {}",
            path.display(),
            details.join("\n  ")
        );
    }

    Ok((config, path))
}
