//! `go-toolkit scaffold`: create a package folder, optionally as its own module.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use super::common::{CommandContext, TargetArgs};
use crate::packagepath::normalize_package_name;
use crate::runner::CommandRunner;
use crate::scaffold::{ScaffoldOptions, create_package};

/// Scaffold a new package.
#[derive(Args, Debug)]
pub struct ScaffoldCommand {
    /// Package path; the last component becomes the package name
    target: PathBuf,

    /// Create the package in this folder instead of the target path
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Add a README.md to the package
    #[arg(long)]
    readme: bool,

    /// Initialize a go.mod for the package
    #[arg(long)]
    module: bool,

    #[command(flatten)]
    module_target: TargetArgs,
}

impl ScaffoldCommand {
    pub async fn execute<R: CommandRunner>(self, ctx: &CommandContext, runner: &R) -> Result<()> {
        let package_name = normalize_package_name(&base_name(&self.target));
        let folder = self.folder.clone().unwrap_or_else(|| self.target.clone());

        info!("scaffold: creating package at {}", folder.display());
        let written = create_package(
            &folder,
            &ScaffoldOptions {
                package_name: package_name.clone(),
                write_root_file: true,
                write_readme: self.readme,
                write_tests: ctx.config.scaffold.write_tests,
            },
        )
        .await?;
        for path in &written {
            println!("created {}", path.display());
        }

        if !self.module {
            info!("scaffold: module init skipped");
            return Ok(());
        }

        let target = self.module_target.resolve(&ctx.config)?;
        info!("scaffold: resolving module path for {}", target.site);
        let module_path = target.module_path(&package_name)?;

        info!("scaffold: running go mod init");
        let args = vec![
            "-C".to_string(),
            folder.display().to_string(),
            "mod".to_string(),
            "init".to_string(),
            module_path,
        ];
        runner.run("go", &args).await?;
        Ok(())
    }
}

fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
