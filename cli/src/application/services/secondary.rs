//! Application service — Telegram bot and Grafana configuration.
//!
//! Both services follow the same shape: copy the shipped `.env.demo` into
//! place, rewrite their keys, then (re)start the compose project.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandSpec, HostEnvironment, ProgressReporter};
use crate::application::services::config_keys::apply_keys;
use crate::application::services::executor::run_required;
use crate::domain::config::SetupConfig;
use crate::domain::context::ProvisioningContext;

const ENV_TEMPLATE: &str = ".env.demo";
const ENV_FILE: &str = ".env";

/// Extra templates the bot ships that the operator must edit by hand.
pub const BOT_SERVER_LISTS: &[&str] = &["servers.json", "servers_censored_zone.json"];

fn install_env_file(host: &impl HostEnvironment, dir: &Path) -> Result<std::path::PathBuf> {
    let target = dir.join(ENV_FILE);
    host.copy_template(&dir.join(ENV_TEMPLATE), &target)?;
    Ok(target)
}

async fn compose(
    host: &impl HostEnvironment,
    config: &SetupConfig,
    dir: &Path,
    args: &[&str],
) -> Result<()> {
    run_required(
        host,
        &CommandSpec::new("docker")
            .arg("compose")
            .args(args.iter().copied())
            .current_dir(dir)
            .escalated(&config.escalation),
    )
    .await?;
    Ok(())
}

/// Configure and start the Telegram bot.
///
/// # Errors
///
/// Returns an error if a template is missing, a key cannot be written, or
/// `docker compose` fails.
pub async fn configure_bot(
    host: &impl HostEnvironment,
    reporter: &impl ProgressReporter,
    config: &SetupConfig,
    ctx: &ProvisioningContext,
) -> Result<()> {
    let dir = config.services.bot_dir.as_path();
    let port = config.server.port.to_string();

    reporter.step("Writing bot .env");
    let env_file = install_env_file(host, dir).context("installing bot .env")?;
    apply_keys(
        host,
        reporter,
        &env_file,
        &[
            ("API_TOKEN", ctx.input.bot_token.expose()),
            ("FPTN_SERVER_HOST", ctx.input.public_address.as_str()),
            ("FPTN_SERVER_PORT", port.as_str()),
        ],
    )?;
    reporter.success("Bot .env configured");

    for name in BOT_SERVER_LISTS {
        host.copy_template(&dir.join(format!("{name}.demo")), &dir.join(name))
            .with_context(|| format!("installing {name}"))?;
    }
    reporter.warn(&format!(
        "Remember to edit {} in {}",
        BOT_SERVER_LISTS.join(" and "),
        dir.display()
    ));

    reporter.step("Building and starting the bot");
    compose(host, config, dir, &["build"]).await?;
    compose(host, config, dir, &["up", "-d"]).await?;
    reporter.success("Telegram bot started");
    Ok(())
}

/// Configure and (re)start Grafana with the shared Prometheus secret.
///
/// # Errors
///
/// Returns an error if the template is missing, a key cannot be written, or
/// `docker compose` fails.
pub async fn configure_monitoring(
    host: &impl HostEnvironment,
    reporter: &impl ProgressReporter,
    config: &SetupConfig,
    ctx: &ProvisioningContext,
) -> Result<()> {
    let dir = config.services.grafana_dir.as_path();
    let port = config.server.port.to_string();
    let secret = ctx
        .shared_secret()
        .context("shared secret must be generated before configuring Grafana")?;

    reporter.step("Writing Grafana .env");
    let env_file = install_env_file(host, dir).context("installing Grafana .env")?;
    apply_keys(
        host,
        reporter,
        &env_file,
        &[
            ("FPTN_HOST", ctx.input.public_address.as_str()),
            ("FPTN_PORT", port.as_str()),
            ("PROMETHEUS_SECRET_ACCESS_KEY", secret.expose()),
        ],
    )?;
    reporter.success("Grafana .env configured");

    reporter.step("Restarting Grafana");
    compose(host, config, dir, &["down"]).await?;
    compose(host, config, dir, &["up", "-d"]).await?;
    reporter.success("Grafana started");
    Ok(())
}
