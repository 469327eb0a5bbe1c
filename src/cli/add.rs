//! `go-toolkit add`: expand short package names and `go get` them.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::common::{CommandContext, TargetArgs, dedupe_preserving_order, reject_none_suffix};
use crate::runner::{CommandRunner, render_command};

/// Add dependencies with `go get`.
///
/// Each package may be a bare name (`cobra`, expanded with the resolved
/// user), `owner/name`, or a full module path, optionally with `@version`.
#[derive(Args, Debug)]
pub struct AddCommand {
    /// Packages to add
    #[arg(required = true)]
    packages: Vec<String>,

    #[command(flatten)]
    target: TargetArgs,

    /// Print the go command instead of running it
    #[arg(long)]
    dry_run: bool,
}

impl AddCommand {
    pub async fn execute<R: CommandRunner>(self, ctx: &CommandContext, runner: &R) -> Result<()> {
        reject_none_suffix(&self.packages, "do not use @none with add; use remove instead")?;

        let target = self.target.resolve(&ctx.config)?;
        info!("add: resolving module paths for {}", target.site);

        let resolved = self
            .packages
            .iter()
            .map(|package| target.module_path(package))
            .collect::<Result<Vec<_>, _>>()?;

        let args: Vec<String> =
            std::iter::once("get".to_string()).chain(dedupe_preserving_order(resolved)).collect();

        if self.dry_run {
            println!("{}", render_command("go", &args));
            return Ok(());
        }

        info!("add: running go get");
        runner.run("go", &args).await?;
        Ok(())
    }
}
