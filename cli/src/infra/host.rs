//! `LocalHost` — the machine the installer runs on.
//!
//! Bundles the process runner, `PATH` lookup and filesystem adapters into one
//! value that satisfies `HostEnvironment`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, CommandSpec, ConfigMutator, HostFiles, ToolLocator,
};
use crate::domain::env_file::KeyRewrite;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;

/// Production host adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalHost {
    runner: TokioCommandRunner,
    fs: LocalFs,
}

impl LocalHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandRunner for LocalHost {
    async fn run(&self, cmd: &CommandSpec) -> Result<Output> {
        self.runner.run(cmd).await
    }

    async fn run_with_stdin(&self, cmd: &CommandSpec, stdin: &[u8]) -> Result<Output> {
        self.runner.run_with_stdin(cmd, stdin).await
    }
}

impl ToolLocator for LocalHost {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}

impl ConfigMutator for LocalHost {
    fn set_key(&self, path: &Path, key: &str, value: &str) -> Result<KeyRewrite> {
        self.fs.set_key(path, key, value)
    }
}

impl HostFiles for LocalHost {
    fn copy_template(&self, from: &Path, to: &Path) -> Result<()> {
        self.fs.copy_template(from, to)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.fs.remove_file(path)
    }
}
