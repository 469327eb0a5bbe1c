//! Shared argument groups and setup used by the command implementations.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::{ToolkitConfig, resolve_user};
use crate::core::ToolkitError;
use crate::packagepath::resolve_module_path;
use crate::site::{allow_custom_site, resolve_site, validate_site};

/// `--user`, `--site` and `--full`, shared by every command that builds
/// module paths.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Override the configured user
    #[arg(long)]
    pub user: Option<String>,

    /// Override the configured site (e.g. gitlab.com)
    #[arg(long)]
    pub site: Option<String>,

    /// Allow a site outside the known providers
    #[arg(long)]
    pub full: bool,
}

/// Site and user a command substitutes into short identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub site: String,
    /// Empty when no user could be resolved
    pub user: String,
}

impl Target {
    /// Expand `identifier` against this target.
    pub fn module_path(&self, identifier: &str) -> Result<String, ToolkitError> {
        resolve_module_path(identifier, &self.site, &self.user)
    }
}

impl TargetArgs {
    /// Resolve and validate the effective site and user.
    ///
    /// A missing user is not an error here: only single-segment identifiers
    /// need one, and [`Target::module_path`] reports it for those.
    pub fn resolve(&self, config: &ToolkitConfig) -> Result<Target, ToolkitError> {
        let flag = self.site.as_deref();
        let site = resolve_site(flag, config);
        validate_site(&site, allow_custom_site(self.full, flag, config))?;

        let user = match resolve_user(self.user.as_deref(), config, &site) {
            Ok(user) => user,
            Err(ToolkitError::MissingUser) => String::new(),
            Err(e) => return Err(e),
        };

        Ok(Target {
            site,
            user,
        })
    }
}

/// Loaded configuration plus the file it came from.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: ToolkitConfig,
    pub config_path: PathBuf,
}

impl CommandContext {
    /// Load the config at `config_path`; a missing file yields defaults.
    pub async fn load(config_path: &Path) -> Result<Self> {
        let config = ToolkitConfig::load(config_path)
            .await
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
        })
    }
}

/// Reject any input containing `@none`.
pub fn reject_none_suffix(inputs: &[String], message: &str) -> Result<(), ToolkitError> {
    if inputs.iter().any(|input| input.contains("@none")) {
        return Err(ToolkitError::invalid_input(message));
    }
    Ok(())
}

/// Drop repeated values, keeping the first occurrence.
pub fn dedupe_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values.into_iter().filter(|value| seen.insert(value.clone())).collect()
}
