//! Filesystem infrastructure — implements `ConfigMutator` and `HostFiles`.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{ConfigMutator, HostFiles};
use crate::domain::env_file::{KeyRewrite, rewrite_key};
use crate::domain::error::ProvisionError;

/// Production filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

fn map_io(err: std::io::Error, path: &Path) -> anyhow::Error {
    match err.kind() {
        ErrorKind::NotFound => ProvisionError::FileNotFound(path.to_path_buf()).into(),
        ErrorKind::PermissionDenied => ProvisionError::PermissionDenied(path.to_path_buf()).into(),
        _ => anyhow::Error::new(err).context(format!("accessing {}", path.display())),
    }
}

impl ConfigMutator for LocalFs {
    fn set_key(&self, path: &Path, key: &str, value: &str) -> Result<KeyRewrite> {
        let content = std::fs::read_to_string(path).map_err(|e| map_io(e, path))?;
        let outcome = rewrite_key(&content, key, value)?;
        if let KeyRewrite::Changed(new_content) = &outcome {
            std::fs::write(path, new_content).map_err(|e| map_io(e, path))?;
        }
        Ok(outcome)
    }
}

impl HostFiles for LocalFs {
    fn copy_template(&self, from: &Path, to: &Path) -> Result<()> {
        let copy = || -> Result<()> {
            let bytes = std::fs::read(from).map_err(|e| map_io(e, from))?;
            std::fs::write(to, bytes).map_err(|e| map_io(e, to))
        };
        copy().with_context(|| format!("copying {} to {}", from.display(), to.display()))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(map_io(e, path)),
            _ => Ok(()),
        }
    }
}
