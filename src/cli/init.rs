//! `go-toolkit init`: start a Go module from a short name.
//!
//! Runs `go mod init` with the expanded module path, lays out `main.go` and
//! `internal/`, initializes git, and prints a JSON summary on stdout.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::common::{CommandContext, TargetArgs};
use crate::core::ToolkitError;
use crate::runner::CommandRunner;
use crate::scaffold::{ProjectLayout, ensure_project_layout};

/// Initialize a Go module in the current directory.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Module name: `name`, `owner/name` or a full module path
    module: String,

    #[command(flatten)]
    target: TargetArgs,

    /// Library layout (no main.go)
    #[arg(long)]
    library: bool,

    /// Skip `git init`
    #[arg(long)]
    no_git: bool,
}

#[derive(Debug, Serialize)]
struct InitSummary {
    module_path: String,
    site: String,
    user: String,
    project_type: &'static str,
    git_init: bool,
}

impl InitCommand {
    pub async fn execute<R: CommandRunner>(self, ctx: &CommandContext, runner: &R) -> Result<()> {
        self.execute_in(Path::new("."), ctx, runner).await
    }

    /// Run against `root`; `go` and `git` run in the current directory.
    pub async fn execute_in<R: CommandRunner>(
        self,
        root: &Path,
        ctx: &CommandContext,
        runner: &R,
    ) -> Result<()> {
        if self.module.trim().is_empty() {
            return Err(ToolkitError::invalid_input("module name is required").into());
        }

        let target = self.target.resolve(&ctx.config)?;
        info!("init: resolving module path for {}", target.site);
        let module_path = target.module_path(&self.module)?;

        info!("init: running go mod init");
        runner.run("go", &["mod".to_string(), "init".to_string(), module_path.clone()]).await?;

        info!("init: creating project layout");
        ensure_project_layout(
            root,
            ProjectLayout {
                write_main: !self.library,
                write_internal: true,
            },
        )
        .await?;

        let git_init = if self.no_git {
            info!("init: git init skipped");
            false
        } else if tokio::fs::try_exists(root.join(".git")).await? {
            info!("init: git already initialized");
            false
        } else {
            info!("init: running git init");
            runner.run("git", &["init".to_string()]).await?;
            true
        };

        let summary = InitSummary {
            module_path,
            site: target.site,
            user: target.user,
            project_type: if self.library { "library" } else { "app" },
            git_init,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}
