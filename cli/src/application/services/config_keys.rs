//! Application service — applying key sets to `KEY=value` files.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, CommandSpec, ConfigMutator, ProgressReporter};
use crate::application::services::executor::execute;
use crate::domain::env_file::{KeyRewrite, apply, rewrite_key};
use crate::domain::error::ProvisionError;
use crate::domain::stage::StepKind;

/// Set every `(key, value)` pair in `path`, in order.
///
/// Keys the file does not declare are left out and reported as warnings;
/// templates are expected to pre-declare every key.
///
/// # Errors
///
/// Returns the first mutation error (missing file, permission denied,
/// multi-line value).
pub fn apply_keys(
    mutator: &impl ConfigMutator,
    reporter: &impl ProgressReporter,
    path: &Path,
    pairs: &[(&str, &str)],
) -> Result<()> {
    for (key, value) in pairs {
        let outcome = mutator
            .set_key(path, key, value)
            .with_context(|| format!("setting {key} in {}", path.display()))?;
        if outcome == KeyRewrite::Missing {
            warn_missing(reporter, key, path);
        }
    }
    Ok(())
}

/// Set every `(key, value)` pair in a root-owned file.
///
/// The file is read and written through `escalation` (`cat`, then
/// `dd of=<path>` fed on stdin) and rewritten in memory in between, so values
/// never reach an argument vector. Nothing is written when no key changed.
///
/// # Errors
///
/// Returns `FileNotFound` or `PermissionDenied` when the file cannot be read,
/// a rewrite error for a multi-line value, or `CommandFailed` when the write
/// fails.
pub async fn apply_keys_escalated(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    escalation: &str,
    path: &Path,
    pairs: &[(&str, &str)],
) -> Result<()> {
    let original = read_escalated(runner, escalation, path).await?;
    let mut content = original.clone();
    for (key, value) in pairs {
        let outcome = rewrite_key(&content, key, value)
            .with_context(|| format!("setting {key} in {}", path.display()))?;
        if outcome == KeyRewrite::Missing {
            warn_missing(reporter, key, path);
        }
        content = apply(&content, &outcome);
    }
    if content == original {
        tracing::debug!(path = %path.display(), "no key changed, skipping write");
        return Ok(());
    }

    let write = CommandSpec::new("dd")
        .arg(format!("of={}", path.display()))
        .arg("status=none")
        .escalated(escalation);
    execute(runner, &write, StepKind::Required, Some(content.as_bytes()))
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read `path` verbatim; captured output would lose the trailing newline.
async fn read_escalated(
    runner: &impl CommandRunner,
    escalation: &str,
    path: &Path,
) -> Result<String> {
    let cmd = CommandSpec::new("cat").path_arg(path).escalated(escalation);
    let output = runner
        .run(&cmd)
        .await
        .with_context(|| format!("running {}", cmd.display()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let err = if stderr.contains("No such file") {
            ProvisionError::FileNotFound(path.to_path_buf())
        } else if stderr.contains("Permission denied") {
            ProvisionError::PermissionDenied(path.to_path_buf())
        } else {
            ProvisionError::CommandFailed {
                command: cmd.display(),
                status: output.status.code(),
                stdout: String::new(),
                stderr: stderr.trim_end().to_string(),
            }
        };
        return Err(err.into());
    }
    String::from_utf8(output.stdout)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))
}

fn warn_missing(reporter: &impl ProgressReporter, key: &str, path: &Path) {
    tracing::warn!(key, path = %path.display(), "key not declared, file left unchanged");
    reporter.warn(&format!(
        "{key} is not declared in {}; left unchanged",
        path.display()
    ));
}
