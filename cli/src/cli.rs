//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::commands;
use crate::infra::config::{CONFIG_ENV, YamlConfigStore};
use crate::output::OutputContext;

/// Provision an FPTN VPN server, its Telegram bot and Grafana monitoring on this host.
///
/// Run from the root of an FPTN checkout; the bot and Grafana directories are
/// resolved relative to the working directory.
#[derive(Parser)]
#[command(name = "fptn-setup", version)]
pub struct Cli {
    /// Path to the setup config file
    #[arg(long, value_name = "PATH", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,
}

impl Cli {
    /// Execute the interactive setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the setup aborts.
    pub async fn run(self) -> Result<()> {
        let Cli { config, no_color } = self;
        let ctx = OutputContext::new(no_color);
        let config = YamlConfigStore::new(config).load()?;
        commands::setup::run(&ctx, &config).await
    }
}
