//! Execution of external toolchain commands (`go`, `git`).
//!
//! Commands take a [`CommandRunner`] rather than spawning processes directly,
//! so tests can record the command lines instead of running them.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;

use crate::core::ToolkitError;
use crate::utils::platform::find_program;

/// Runs an external program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, streaming its output to the terminal.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<(), ToolkitError>> + Send;
}

/// [`CommandRunner`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<(), ToolkitError> {
        let command_line = render_command(program, args);
        let executable = find_program(program).ok_or_else(|| ToolkitError::ToolNotFound {
            program: program.to_string(),
        })?;

        tracing::debug!(target: "runner", "Executing command: {command_line}");

        let status = Command::new(executable)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await?;

        if !status.success() {
            tracing::debug!(target: "runner", "Command failed with exit code: {:?}", status.code());
            return Err(ToolkitError::CommandFailed {
                command: command_line,
                code: status.code(),
            });
        }

        tracing::debug!(target: "runner", "Command completed successfully");
        Ok(())
    }
}

/// Space-joined command line, as printed by `--dry-run`.
#[must_use]
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program).chain(args.iter().map(String::as_str)).collect::<Vec<_>>().join(" ")
}
