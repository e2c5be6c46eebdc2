//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::stage::Stage;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Failures that abort a provisioning run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("'{tool}' not found on PATH. Please install it.{}", hint_suffix(.hint.as_deref()))]
    MissingDependency {
        tool: String,
        hint: Option<String>,
    },

    #[error("unsupported architecture '{0}' (supported: x86_64, aarch64)")]
    UnsupportedArchitecture(String),

    #[error("no releases found in any of: {}", .repos.join(", "))]
    NoReleaseFound { repos: Vec<String> },

    #[error(
        "command failed: {command}\n  exit status: {}\n  stdout: {stdout}\n  stderr: {stderr}",
        status_display(.status)
    )]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("permission denied modifying {}. Re-run as root.", .0.display())]
    PermissionDenied(PathBuf),

    #[error("registry unreachable for '{repo}': {message}")]
    NetworkError { repo: String, message: String },

    #[error("value for {key} must be a single line")]
    InvalidValue { key: String },

    #[error("could not parse certificate fingerprint from: {0:?}")]
    MalformedFingerprint(String),

    #[error("malformed credential token: {0}")]
    MalformedToken(String),

    #[error("{0} was already derived in this run")]
    AlreadyDerived(&'static str),
}

fn hint_suffix(hint: Option<&str>) -> String {
    hint.map(|h| format!("\n{h}")).unwrap_or_default()
}

#[allow(clippy::ref_option)]
fn status_display(status: &Option<i32>) -> String {
    status.map_or_else(|| "killed by signal".to_string(), |c| c.to_string())
}

// ── Run abort ─────────────────────────────────────────────────────────────────

/// A run that reached the absorbing `Aborted` state.
///
/// `stage` is where the failure happened and `stages` every stage entered,
/// ending with `Aborted`. `cause` carries the full context chain (downcast it
/// to [`ProvisionError`] to inspect the typed failure).
#[derive(Debug, Error)]
#[error("setup aborted while {stage}: {cause:#}")]
pub struct SetupAborted {
    pub stage: Stage,
    pub stages: Vec<Stage>,
    pub cause: anyhow::Error,
}

impl SetupAborted {
    /// The typed provisioning failure behind this abort, if there is one.
    #[must_use]
    pub fn provision_error(&self) -> Option<&ProvisionError> {
        self.cause.downcast_ref::<ProvisionError>()
    }
}
