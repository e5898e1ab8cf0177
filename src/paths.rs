//! XDG-style path utilities for the configuration directory.
//!
//! `desk` prefers XDG Base Directory conventions over OS-specific locations,
//! so the config lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "desk";

/// Returns the configuration directory for desk.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/desk` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/desk` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR))
}
