//! Application service — external command execution with a success contract.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, CommandSpec};
use crate::domain::error::ProvisionError;
use crate::domain::stage::StepKind;

/// Output captured from a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Standard output with trailing whitespace trimmed.
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
}

impl CapturedOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        }
    }
}

/// Run `cmd`, optionally feeding `stdin`, and enforce the exit-status contract.
///
/// With [`StepKind::Required`] a non-zero exit fails with `CommandFailed`;
/// with [`StepKind::BestEffort`] it is returned as data. Failure to spawn the
/// process is an error either way. The stdin payload is never logged.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned, or `CommandFailed`
/// when a required command exits non-zero.
pub async fn execute(
    runner: &impl CommandRunner,
    cmd: &CommandSpec,
    kind: StepKind,
    stdin: Option<&[u8]>,
) -> Result<CapturedOutput> {
    let shown = cmd.display();
    tracing::debug!(command = %shown, stdin = stdin.is_some(), "running command");

    let output = match stdin {
        Some(input) => runner.run_with_stdin(cmd, input).await,
        None => runner.run(cmd).await,
    }
    .with_context(|| format!("running {shown}"))?;

    let captured = CapturedOutput::from_output(&output);
    tracing::debug!(command = %shown, status = ?captured.status, "command finished");

    if kind == StepKind::Required && !captured.success() {
        return Err(ProvisionError::CommandFailed {
            command: shown,
            status: captured.status,
            stdout: captured.stdout,
            stderr: captured.stderr.trim_end().to_string(),
        }
        .into());
    }
    Ok(captured)
}

/// Run a required command without stdin.
///
/// # Errors
///
/// See [`execute`].
pub async fn run_required(runner: &impl CommandRunner, cmd: &CommandSpec) -> Result<CapturedOutput> {
    execute(runner, cmd, StepKind::Required, None).await
}

/// Run a best-effort probe. Any failure, including a spawn error, yields `None`.
pub async fn probe(runner: &impl CommandRunner, cmd: &CommandSpec) -> Option<CapturedOutput> {
    match execute(runner, cmd, StepKind::BestEffort, None).await {
        Ok(out) => Some(out),
        Err(e) => {
            tracing::warn!(command = %cmd.display(), error = %e, "probe failed");
            None
        }
    }
}
