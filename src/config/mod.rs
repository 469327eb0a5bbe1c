//! Configuration for go-toolkit
//!
//! - [`global`] - the persisted `gtk-config.toml` values ([`ToolkitConfig`])
//! - [`credentials`] - reading `[user] name` from git-config style files
//! - [`user`] - the ordered chain that decides which user to substitute
//!
//! The config file is looked up in this order:
//!
//! 1. the path given with `--config`
//! 2. `gtk-config.toml` in the current directory, if it exists
//! 3. `<platform config dir>/go-toolkit/gtk-config.toml`

pub mod credentials;
pub mod global;
pub mod user;

pub use global::{ProviderConfig, ScaffoldConfig, ToolkitConfig};
pub use user::{UserLookup, UserQuery, UserResolver, UserSource, resolve_user};

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Platform default location of the config file.
///
/// # Errors
///
/// Fails when the platform config directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Unable to determine the user config directory"))?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `gtk-config.toml` inside `dir`, if such a file exists.
#[must_use]
pub fn local_config_path(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Pick the config file to use.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = std::env::current_dir().ok().and_then(|cwd| local_config_path(&cwd)) {
        return Ok(path);
    }

    default_config_path()
}
