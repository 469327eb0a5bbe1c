//! Command-line interface for go-toolkit.
//!
//! # Commands
//!
//! - `init` - start a module from a short name and lay out the project
//! - `add` / `remove` - `go get` expanded module paths (`@none` for removal)
//! - `scaffold` - create a package folder, optionally as its own module
//! - `test` - run `go test`
//! - `search` - page through the Go module index and filter by path
//! - `config` - view and edit `gtk-config.toml`
//!
//! # Global Options
//!
//! - `--config <path>` - config file (default: `./gtk-config.toml` if present,
//!   else the platform config directory)
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//!
//! Logs go to stderr; stdout carries command output only.

mod add;
pub mod common;
mod config;
mod init;
mod remove;
mod scaffold;
mod search;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use crate::config::resolve_config_path;
use crate::index::HttpIndexFetcher;
use crate::runner::ProcessRunner;
use common::CommandContext;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` logs errors only
    pub log_level: Option<String>,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Filter directive for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or("error")
    }
}

#[derive(Parser)]
#[command(
    name = "go-toolkit",
    about = "Helpers for everyday Go module work",
    version,
    long_about = "go-toolkit expands short package names into full module paths for go get, \
                  scaffolds modules and packages, and searches the Go module index."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress everything but errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a Go module with a short package name
    Init(init::InitCommand),

    /// Add dependencies with go get
    Add(add::AddCommand),

    /// Remove dependencies with go get <module>@none
    Remove(remove::RemoveCommand),

    /// Create a package folder
    Scaffold(scaffold::ScaffoldCommand),

    /// Run go test
    Test(test::TestCommand),

    /// Search the Go module index
    Search(search::SearchCommand),

    /// Manage configuration
    Config(config::ConfigCommand),
}

impl Cli {
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Run the selected command with real processes and the HTTP index.
    ///
    /// Ctrl-C cancels an in-flight index search.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let config_path = resolve_config_path(config.config_path.as_deref())?;
        tracing::debug!("Using config file {}", config_path.display());
        let ctx = CommandContext::load(&config_path).await?;
        let runner = ProcessRunner;

        match self.command {
            Commands::Init(cmd) => cmd.execute(&ctx, &runner).await,
            Commands::Add(cmd) => cmd.execute(&ctx, &runner).await,
            Commands::Remove(cmd) => cmd.execute(&ctx, &runner).await,
            Commands::Scaffold(cmd) => cmd.execute(&ctx, &runner).await,
            Commands::Test(cmd) => cmd.execute(&runner).await,
            Commands::Search(cmd) => {
                let fetcher = HttpIndexFetcher::new(cmd.index_url())?;
                let cancel = CancellationToken::new();
                let on_interrupt = cancel.clone();
                let interrupt = tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        on_interrupt.cancel();
                    }
                });

                let result = cmd.execute(&ctx, &fetcher, &cancel).await;
                interrupt.abort();
                result
            }
            Commands::Config(cmd) => cmd.execute(ctx).await,
        }
    }
}
