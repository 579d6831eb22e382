//! Platform-specific config and data directory helpers.
//!
//! Uses the `dirs` crate to resolve platform-appropriate directories:
//! - Linux:   `~/.config/kbrowse/` (config), `~/.local/share/kbrowse/` (data)
//! - Windows: `%APPDATA%\kbrowse\` (config and data)
//! - macOS:   `~/Library/Application Support/kbrowse/` (both)

use std::path::PathBuf;

use crate::error::BrowseError;

/// Get the kbrowse config directory, creating it if needed.
pub fn config_dir() -> Result<PathBuf, BrowseError> {
    let base = dirs::config_dir()
        .ok_or_else(|| BrowseError::Config("Could not determine config directory".into()))?;
    let dir = base.join("kbrowse");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Get the kbrowse data directory, creating it if needed.
///
/// Holds the resource store snapshot and the log file.
pub fn data_dir() -> Result<PathBuf, BrowseError> {
    let base = dirs::data_dir()
        .ok_or_else(|| BrowseError::Config("Could not determine data directory".into()))?;
    let dir = base.join("kbrowse");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
