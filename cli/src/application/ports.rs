//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::env_file::KeyRewrite;

// ── Value Types ───────────────────────────────────────────────────────────────

/// A command to spawn: program plus a discrete argument vector.
///
/// Nothing is ever passed through a shell, so interpolated values need no
/// quoting. Secrets never go into `args`; feed them through stdin instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment variables for the child.
    pub env: Vec<(String, String)>,
    /// Working directory; inherits the caller's when `None`.
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Wrap in a privilege-escalation program such as `sudo`.
    ///
    /// Environment variables become `KEY=value` arguments after the prefix,
    /// since `sudo` does not forward the caller's environment. An empty
    /// prefix returns the command unchanged.
    #[must_use]
    pub fn escalated(self, prefix: &str) -> Self {
        if prefix.is_empty() {
            return self;
        }
        let mut args: Vec<String> = self.env.iter().map(|(k, v)| format!("{k}={v}")).collect();
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: prefix.to_string(),
            args,
            env: Vec::new(),
            current_dir: self.current_dir,
        }
    }

    /// Human-readable rendering for logs and error messages.
    #[must_use]
    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.args.len() + 1);
        parts.push(&self.program);
        parts.extend(self.args.iter().map(String::as_str));
        parts.join(" ")
    }
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Implementations wait for the child to exit; there is no timeout.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or awaited.
    /// A non-zero exit status is *not* an error at this level.
    async fn run(&self, cmd: &CommandSpec) -> Result<Output>;

    /// Run a program with `stdin` written to its standard input.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or awaited.
    async fn run_with_stdin(&self, cmd: &CommandSpec, stdin: &[u8]) -> Result<Output>;
}

// ── Host Ports ────────────────────────────────────────────────────────────────

/// Resolves executables on `PATH`.
pub trait ToolLocator {
    /// Return the resolved path of `tool`, or `None` when it is not installed.
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

/// Rewrites keys in flat `KEY=value` configuration files.
pub trait ConfigMutator {
    /// Set `key=value` in the file at `path`.
    ///
    /// A key the file does not declare leaves the file untouched and is
    /// reported as [`KeyRewrite::Missing`].
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` or `PermissionDenied` (as `ProvisionError`) when
    /// the file cannot be read or written.
    fn set_key(&self, path: &Path, key: &str, value: &str) -> Result<KeyRewrite>;
}

/// Plain file operations on the local machine.
pub trait HostFiles {
    /// Copy `from` to `to`, overwriting `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing or the target is not writable.
    fn copy_template(&self, from: &Path, to: &Path) -> Result<()>;

    /// Delete a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// Composite trait: everything the sequencer needs from the local machine.
pub trait HostEnvironment: CommandRunner + ToolLocator + ConfigMutator + HostFiles {}

/// Blanket implementation: any type implementing all four sub-traits is a `HostEnvironment`.
impl<T> HostEnvironment for T where T: CommandRunner + ToolLocator + ConfigMutator + HostFiles {}

// ── Registry Port ─────────────────────────────────────────────────────────────

/// Remote tag listing.
#[allow(async_fn_in_trait)]
pub trait TagRegistry {
    /// List tags of `repo` (`owner/name`) in the order the registry returns
    /// them, most recent first.
    ///
    /// An unsuccessful HTTP response yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` (as `ProvisionError`) if the registry cannot be
    /// reached or the response body is not a tag list.
    async fn list_tags(&self, repo: &str) -> Result<Vec<String>>;
}

// ── Operator Input Port ───────────────────────────────────────────────────────

/// Interactive operator prompts.
pub trait Prompter {
    /// Ask a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Ask for a visible line of text. `allow_empty` permits an empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    fn input(&self, prompt: &str, allow_empty: bool) -> Result<String>;

    /// Ask for hidden input, optionally asking twice to confirm it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails.
    fn password(&self, prompt: &str, confirm: bool) -> Result<String>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Print a section header.
    fn section(&self, title: &str);
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an informational message.
    fn info(&self, message: &str);
}

