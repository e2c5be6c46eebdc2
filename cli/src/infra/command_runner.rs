//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` spawns processes with an argument vector (never a
//! shell), captures both streams, and waits for exit. No timeout is applied.

use std::process::{Output, Stdio};

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::application::ports::{CommandRunner, CommandSpec};

/// Production `CommandRunner` backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

fn command(spec: &CommandSpec) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&spec.program);
    cmd.args(&spec.args)
        .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &spec.current_dir {
        cmd.current_dir(dir);
    }
    cmd
}

async fn collect(mut child: tokio::process::Child, program: &str) -> Result<Output> {
    let mut stdout_handle = child.stdout.take();
    let mut stderr_handle = child.stderr.take();

    let (status, stdout, stderr) = tokio::join!(
        child.wait(),
        async {
            let mut buf = Vec::new();
            if let Some(ref mut h) = stdout_handle {
                let _ = h.read_to_end(&mut buf).await;
            }
            buf
        },
        async {
            let mut buf = Vec::new();
            if let Some(ref mut h) = stderr_handle {
                let _ = h.read_to_end(&mut buf).await;
            }
            buf
        },
    );
    Ok(Output {
        status: status.with_context(|| format!("waiting for {program}"))?,
        stdout,
        stderr,
    })
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<Output> {
        let child = command(spec)
            .stdin(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn {}", spec.program))?;
        collect(child, &spec.program).await
    }

    async fn run_with_stdin(&self, spec: &CommandSpec, input: &[u8]) -> Result<Output> {
        let mut child = command(spec)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn {}", spec.program))?;

        // Payloads are a few lines; close stdin so the child sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            let written = stdin.write_all(input).await;
            drop(stdin);
            if let Err(e) = written {
                tracing::debug!(program = %spec.program, error = %e, "child closed stdin early");
            }
        }
        collect(child, &spec.program).await
    }
}
