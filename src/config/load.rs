//! Loading `config.toml`.
//!
//! A missing file yields the default configuration; a malformed one is an
//! error so a typo in `read_only` never silently enables mutations.

use std::path::{Path, PathBuf};

use crate::config::paths;
use crate::config::types::BrowseConfig;
use crate::error::BrowseError;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default location of the configuration file.
pub fn default_config_path() -> Result<PathBuf, BrowseError> {
    Ok(paths::config_dir()?.join(CONFIG_FILE))
}

/// Load the configuration from `path`.
pub fn load_config(path: &Path) -> Result<BrowseConfig, BrowseError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(BrowseConfig::default());
    }
    let contents = std::fs::read_to_string(path)?;
    let config: BrowseConfig = toml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), ?config, "Loaded config");
    Ok(config)
}
