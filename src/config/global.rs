//! Persisted user configuration (`gtk-config.toml`).
//!
//! The file records defaults that would otherwise have to be passed on every
//! invocation: the registered user, the preferred hosting site, scaffold
//! preferences, and provider credential mappings.
//!
//! # File Format
//!
//! ```toml
//! user = "lou"
//! site = "github.com"
//!
//! [scaffold]
//! write_tests = true
//!
//! [[providers]]
//! name = "gitlab"
//! path = "~/.config/git/gitlab.gitconfig"
//! ```
//!
//! # Location
//!
//! See [`resolve_config_path`](super::resolve_config_path): an explicit
//! `--config` path wins, then `./gtk-config.toml`, then the platform config
//! directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::core::ToolkitError;
use crate::site::is_valid_site;
use crate::utils::fs::atomic_write;

/// Top-level configuration values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// User substituted into one-segment package names
    pub user: String,

    /// Preferred hosting site; empty means the built-in default
    pub site: String,

    /// Scaffold preferences
    pub scaffold: ScaffoldConfig,

    /// Provider name to credential file mappings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<ProviderConfig>,
}

/// Scaffold preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Write a `<name>_test.go` file next to new packages
    pub write_tests: bool,
}

/// A credential file registered for a provider.
///
/// `name` is the provider's short name (`github`, `gitlab`, `bitbucket`) or,
/// for other hosts, the site itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name
    pub name: String,
    /// Path to a git-config style file holding `[user] name`
    pub path: String,
}

impl ToolkitConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is empty, the file cannot be read or parsed,
    /// or the values fail [`validate`](Self::validate).
    pub async fn load(path: &Path) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(ToolkitError::ConfigError {
                message: "config path is required".to_string(),
            }
            .into());
        }

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config from {}", path.display()));
            }
        };

        let config: Self = toml::from_str(&content)
            .map_err(ToolkitError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate and write the configuration to `path`, creating parent
    /// directories as needed.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(ToolkitError::ConfigError {
                message: "config path is required".to_string(),
            }
            .into());
        }

        self.validate()?;

        let content = toml::to_string_pretty(self)
            .map_err(ToolkitError::from)
            .context("Failed to serialize config")?;

        atomic_write(path, content.as_bytes())
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Check the values that cannot be expressed in the TOML schema.
    pub fn validate(&self) -> Result<(), ToolkitError> {
        if self.user.chars().any(char::is_whitespace) {
            return Err(ToolkitError::ConfigError {
                message: format!("user '{}' must not contain whitespace", self.user),
            });
        }

        if !self.site.is_empty() && (self.site.trim() != self.site || !is_valid_site(&self.site)) {
            return Err(ToolkitError::ConfigError {
                message: format!("site '{}' must be in the form sitename.domain", self.site),
            });
        }

        for (index, provider) in self.providers.iter().enumerate() {
            if provider.name.trim().is_empty() || provider.path.trim().is_empty() {
                return Err(ToolkitError::ConfigError {
                    message: format!("provider #{} must have a name and a path", index + 1),
                });
            }
        }

        Ok(())
    }

    /// Credential path registered for `name`, if any.
    #[must_use]
    pub fn provider_path(&self, name: &str) -> Option<&str> {
        self.providers.iter().find(|p| p.name == name).map(|p| p.path.as_str())
    }

    /// Register or replace the credential path for `name`.
    pub fn add_provider(&mut self, name: String, path: String) {
        match self.providers.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.path = path,
            None => self.providers.push(ProviderConfig {
                name,
                path,
            }),
        }
    }

    /// Remove the mapping for `name`. Returns whether one existed.
    pub fn remove_provider(&mut self, name: &str) -> bool {
        let before = self.providers.len();
        self.providers.retain(|p| p.name != name);
        self.providers.len() != before
    }
}
