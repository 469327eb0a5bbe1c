//! Platform helpers: home directory lookup, path expansion and program lookup.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// The current user's home directory.
///
/// # Errors
///
/// Fails when neither `HOME` (Unix) nor `USERPROFILE` (Windows) leads to a
/// home directory.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if cfg!(windows) {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references in `path`.
///
/// # Errors
///
/// Fails on references to undefined environment variables.
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Failed to expand environment variables in path: {path}"))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Locate `program` on `PATH`.
#[must_use]
pub fn find_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
