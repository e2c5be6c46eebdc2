//! Loads `SetupConfig` from a YAML file on disk.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::config::SetupConfig;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "FPTN_SETUP_CONFIG";

/// YAML-backed config source.
///
/// Resolution order: explicit path, then `FPTN_SETUP_CONFIG`, then
/// `~/.fptn-setup/config.yaml`. A missing file yields the defaults.
#[derive(Debug, Default, Clone)]
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// Load the config, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the home directory cannot be determined.
    pub fn load(&self) -> Result<SetupConfig> {
        let path = self.path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SetupConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Path the config is read from.
    ///
    /// # Errors
    ///
    /// Returns an error if no explicit path is set and the home directory
    /// cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".fptn-setup").join("config.yaml"))
    }
}
