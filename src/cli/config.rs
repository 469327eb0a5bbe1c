//! `go-toolkit config`: inspect and edit `gtk-config.toml`.
//!
//! Every mutating subcommand loads the current file, changes one value and
//! saves it back atomically; validation happens on save, so an invalid value
//! never reaches disk.
//!
//! # Examples
//!
//! ```bash
//! go-toolkit config init --user lou --site github.com
//! go-toolkit config set-site git.example.com --full
//! go-toolkit config provider add --name gitlab --path ~/.config/git/gitlab
//! go-toolkit config show
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::common::CommandContext;
use crate::config::{ProviderConfig, ScaffoldConfig, ToolkitConfig, resolve_user};
use crate::constants::DEFAULT_SITE;
use crate::core::ToolkitError;
use crate::site::{resolve_site, validate_site};

/// Manage the go-toolkit configuration file.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand, Debug)]
enum ConfigSubcommands {
    /// Create or update the config file and print a summary
    Init {
        /// Default user
        #[arg(long)]
        user: Option<String>,

        /// Default site
        #[arg(long)]
        site: Option<String>,

        /// Allow a site outside the known providers
        #[arg(long)]
        full: bool,
    },

    /// Print the effective configuration as JSON (default)
    Show,

    /// Print the config file path
    Path,

    /// Set the default user
    SetUser {
        user: String,
    },

    /// Set the default site
    SetSite {
        site: String,

        /// Allow a site outside the known providers
        #[arg(long)]
        full: bool,
    },

    /// Enable or disable writing test files when scaffolding
    SetScaffoldTests {
        /// true or false
        enabled: String,
    },

    /// Manage provider credential files
    #[command(subcommand)]
    Provider(ProviderSubcommands),
}

#[derive(Subcommand, Debug)]
enum ProviderSubcommands {
    /// Register a credential file for a provider
    Add {
        /// Provider name (github, gitlab, bitbucket, or a custom site)
        #[arg(long, default_value = "")]
        name: String,

        /// Path to a git-config style file with a [user] name entry
        #[arg(long, default_value = "")]
        path: String,
    },

    /// List registered providers
    List,

    /// Remove a provider mapping
    Remove {
        /// Provider name
        #[arg(long, default_value = "")]
        name: String,
    },
}

/// JSON shape printed by `config init` and `config show`.
#[derive(Debug, Serialize)]
struct ConfigSummary {
    path: String,
    site: String,
    user: String,
    scaffold: ScaffoldConfig,
    providers: Vec<ProviderConfig>,
}

impl ConfigSummary {
    fn build(config_path: &Path, config: &ToolkitConfig) -> Result<Self, ToolkitError> {
        let site = resolve_site(None, config);
        let user = match resolve_user(None, config, &site) {
            Ok(user) => user,
            Err(ToolkitError::MissingUser) => String::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            path: config_path.display().to_string(),
            site,
            user,
            scaffold: config.scaffold,
            providers: config.providers.clone(),
        })
    }
}

impl ConfigCommand {
    pub async fn execute(self, ctx: CommandContext) -> Result<()> {
        let CommandContext {
            mut config,
            config_path,
        } = ctx;

        match self.command {
            Some(ConfigSubcommands::Init {
                user,
                site,
                full,
            }) => {
                if let Some(user) = user.filter(|u| !u.is_empty()) {
                    config.user = user;
                }
                if let Some(site) = site.filter(|s| !s.is_empty()) {
                    config.site = site;
                }
                if config.site.is_empty() {
                    config.site = DEFAULT_SITE.to_string();
                }

                info!("config init: validating site");
                validate_site(&config.site, full)?;
                config.save(&config_path).await?;
                print_summary(&config_path, &config)
            }
            Some(ConfigSubcommands::Show) | None => {
                info!("config show: loaded {}", config_path.display());
                print_summary(&config_path, &config)
            }
            Some(ConfigSubcommands::Path) => {
                println!("{}", config_path.display());
                Ok(())
            }
            Some(ConfigSubcommands::SetUser {
                user,
            }) => {
                config.user = user;
                config.save(&config_path).await?;
                println!("✅ User saved: {}", config.user.green());
                Ok(())
            }
            Some(ConfigSubcommands::SetSite {
                site,
                full,
            }) => {
                info!("config set-site: validating site");
                validate_site(&site, full)?;
                config.site = site;
                config.save(&config_path).await?;
                println!("✅ Site saved: {}", config.site.green());
                Ok(())
            }
            Some(ConfigSubcommands::SetScaffoldTests {
                enabled,
            }) => {
                config.scaffold.write_tests = parse_bool(&enabled)
                    .ok_or_else(|| ToolkitError::invalid_input("enabled must be true or false"))?;
                config.save(&config_path).await?;
                println!("✅ Scaffold tests {}", if config.scaffold.write_tests { "enabled" } else { "disabled" });
                Ok(())
            }
            Some(ConfigSubcommands::Provider(command)) => {
                execute_provider(command, config, &config_path).await
            }
        }
    }
}

async fn execute_provider(
    command: ProviderSubcommands,
    mut config: ToolkitConfig,
    config_path: &Path,
) -> Result<()> {
    match command {
        ProviderSubcommands::Add {
            name,
            path,
        } => {
            if name.trim().is_empty() {
                return Err(ToolkitError::invalid_input("provider name is required").into());
            }
            if path.trim().is_empty() {
                return Err(ToolkitError::invalid_input("provider path is required").into());
            }

            config.add_provider(name.clone(), path.clone());
            config.save(config_path).await?;
            println!("✅ Added provider '{}': {}", name.green(), path);
        }
        ProviderSubcommands::List => {
            if config.providers.is_empty() {
                println!("No providers configured.");
                println!("\n{}", "Tip:".yellow());
                println!("  Add one with: go-toolkit config provider add --name <name> --path <path>");
            }
            for provider in &config.providers {
                println!("{}\t{}", provider.name, provider.path);
            }
        }
        ProviderSubcommands::Remove {
            name,
        } => {
            if name.trim().is_empty() {
                return Err(ToolkitError::invalid_input("provider name is required").into());
            }
            if !config.remove_provider(&name) {
                return Err(ToolkitError::invalid_input("provider name not found").into());
            }

            config.save(config_path).await?;
            println!("✅ Removed provider '{}'", name.red());
        }
    }
    Ok(())
}

fn print_summary(config_path: &Path, config: &ToolkitConfig) -> Result<()> {
    let summary = ConfigSummary::build(config_path, config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Boolean spellings accepted on the command line.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
