//! `go-toolkit remove`: drop dependencies via `go get <module>@none`.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::common::{CommandContext, TargetArgs, dedupe_preserving_order, reject_none_suffix};
use crate::packagepath::strip_version;
use crate::runner::{CommandRunner, render_command};

/// Remove dependencies.
///
/// Packages are expanded like `add`; any `@version` is replaced by `@none`.
#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Packages to remove
    #[arg(required = true)]
    packages: Vec<String>,

    #[command(flatten)]
    target: TargetArgs,

    /// Print the go command instead of running it
    #[arg(long)]
    dry_run: bool,
}

impl RemoveCommand {
    pub async fn execute<R: CommandRunner>(self, ctx: &CommandContext, runner: &R) -> Result<()> {
        reject_none_suffix(&self.packages, "@none is added automatically; omit it from remove")?;

        let target = self.target.resolve(&ctx.config)?;
        info!("remove: resolving module paths for {}", target.site);

        let mut modules = Vec::with_capacity(self.packages.len());
        for package in &self.packages {
            let module_path = target.module_path(package)?;
            modules.push(format!("{}@none", strip_version(&module_path)));
        }

        let args: Vec<String> =
            std::iter::once("get".to_string()).chain(dedupe_preserving_order(modules)).collect();

        if self.dry_run {
            println!("{}", render_command("go", &args));
            return Ok(());
        }

        info!("remove: running go get");
        runner.run("go", &args).await?;
        Ok(())
    }
}
