//! Domain types for the setup configuration.
//!
//! Pure types only — no I/O, no async, no filesystem access. Every field has
//! a default so an absent or partial `config.yaml` is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.fptn-setup/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Where releases are looked up and downloaded from.
    pub repository: RepositoryConfig,
    /// FPTN server installation settings.
    pub server: ServerConfig,
    /// Secondary services (bot, monitoring).
    pub services: ServicesConfig,
    /// Length of the generated Prometheus shared secret.
    pub secret_length: usize,
    /// Privilege escalation prefix for host commands. Empty disables it.
    pub escalation: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            server: ServerConfig::default(),
            services: ServicesConfig::default(),
            secret_length: 32,
            escalation: "sudo".to_string(),
        }
    }
}

/// Release lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository used when the local checkout does not resolve to one.
    pub canonical: String,
    /// Base URL of the tag-listing API.
    pub api_base: String,
    /// Base URL release assets are downloaded from.
    pub download_base: String,
    /// Package product name.
    pub product: String,
    /// Distribution tag in the package file name.
    pub platform: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            canonical: "batchar2/fptn".to_string(),
            api_base: "https://api.github.com".to_string(),
            download_base: "https://github.com".to_string(),
            product: "fptn-server".to_string(),
            platform: "ubuntu22.04".to_string(),
        }
    }
}

/// FPTN server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub config_dir: PathBuf,
    /// systemd unit name.
    pub unit: String,
    /// Name shown in the access token.
    pub service_name: String,
    pub port: u16,
    pub certificate_days: u32,
    pub key_bits: u32,
    pub dns_upstreams: Vec<String>,
    pub dnsmasq_conf: PathBuf,
    pub resolved_conf: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("/etc/fptn"),
            unit: "fptn-server".to_string(),
            service_name: "MyFptnServer".to_string(),
            port: 443,
            certificate_days: 365,
            key_bits: 2048,
            dns_upstreams: vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()],
            dnsmasq_conf: PathBuf::from("/etc/dnsmasq.conf"),
            resolved_conf: PathBuf::from("/etc/systemd/resolved.conf"),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn key_path(&self) -> PathBuf {
        self.config_dir.join("server.key")
    }

    #[must_use]
    pub fn certificate_path(&self) -> PathBuf {
        self.config_dir.join("server.crt")
    }

    #[must_use]
    pub fn public_key_path(&self) -> PathBuf {
        self.config_dir.join("server.pub")
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("server.conf")
    }
}

/// Secondary service directories, relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub bot_dir: PathBuf,
    pub grafana_dir: PathBuf,
    pub grafana_port: u16,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            bot_dir: PathBuf::from("telegram-bot"),
            grafana_dir: PathBuf::from("grafana"),
            grafana_port: 3000,
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
