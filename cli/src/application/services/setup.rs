//! Application service — the provisioning sequencer.
//!
//! Drives the fixed stage order
//! `CheckingPrerequisites → CollectingInput → (InstallingServer) →
//! ConfiguringBot → ConfiguringMonitoring → Summarizing → Done`.
//! The first required failure ends the run as [`SetupAborted`]; nothing
//! already applied is rolled back.

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, CommandSpec, HostEnvironment, ProgressReporter, Prompter, TagRegistry,
};
use crate::application::services::executor::execute;
use crate::application::services::input::collect_input;
use crate::application::services::prerequisites::{REQUIRED_TOOLS, check_prerequisites};
use crate::application::services::secondary::{configure_bot, configure_monitoring};
use crate::application::services::server::{ServerInstall, record_certificate_fingerprint};
use crate::domain::config::SetupConfig;
use crate::domain::context::{ProvisioningContext, RegistryLogin, build_credential_token};
use crate::domain::error::SetupAborted;
use crate::domain::secret::{Secret, generate_secret};
use crate::domain::stage::{Stage, StepKind};

/// Inputs to a run besides the injected ports.
pub struct SetupOptions<'a> {
    pub config: &'a SetupConfig,
    /// Machine architecture, normally `std::env::consts::ARCH`.
    pub machine: &'a str,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct SetupReport {
    /// Stages entered, in order.
    pub stages: Vec<Stage>,
    pub public_address: String,
    pub server_installed: bool,
    /// One-time access token; present only when the server was installed.
    pub token: Option<String>,
    pub grafana_url: String,
}

/// Records stage transitions and attributes failures to the current stage.
#[derive(Default)]
struct StageTracker {
    visited: Vec<Stage>,
}

impl StageTracker {
    fn enter(&mut self, stage: Stage) {
        tracing::info!(%stage, "entering stage");
        self.visited.push(stage);
    }

    fn abort(&mut self, cause: anyhow::Error) -> SetupAborted {
        let stage = self
            .visited
            .last()
            .copied()
            .unwrap_or(Stage::CheckingPrerequisites);
        tracing::info!(%stage, error = %format!("{cause:#}"), "setup aborted");
        self.visited.push(Stage::Aborted);
        SetupAborted {
            stage,
            stages: std::mem::take(&mut self.visited),
            cause,
        }
    }
}

/// Run the whole setup once.
///
/// # Errors
///
/// Returns [`SetupAborted`] naming the stage of the first required failure.
pub async fn run_setup(
    host: &impl HostEnvironment,
    registry: &impl TagRegistry,
    prompter: &impl Prompter,
    reporter: &impl ProgressReporter,
    opts: SetupOptions<'_>,
) -> Result<SetupReport, SetupAborted> {
    let SetupOptions { config, machine } = opts;
    let mut tracker = StageTracker::default();

    tracker.enter(Stage::CheckingPrerequisites);
    reporter.section("Checking dependencies");
    check_prerequisites(host, reporter, REQUIRED_TOOLS).map_err(|e| tracker.abort(e))?;

    tracker.enter(Stage::CollectingInput);
    reporter.section("Collecting setup parameters");
    let ctx = collect_input(prompter)
        .map(ProvisioningContext::new)
        .map_err(|e| tracker.abort(e))?;
    if let Some(login) = &ctx.input.registry {
        registry_login(host, config, login)
            .await
            .map_err(|e| tracker.abort(e))?;
        reporter.success("Logged in to Docker Hub");
    }
    let secret = ctx
        .record_shared_secret(Secret::new(generate_secret(config.secret_length)))
        .map_err(|e| tracker.abort(e.into()))?;
    reporter.info(&format!(
        "Prometheus secret key generated: {}",
        secret.expose()
    ));
    reporter.info("It is shared by the FPTN server and Grafana.");

    if ctx.input.install_server() {
        tracker.enter(Stage::InstallingServer);
        reporter.section("Installing FPTN server");
        ServerInstall {
            registry,
            reporter,
            config,
            machine,
        }
        .run(host, &ctx)
        .await
        .map_err(|e| tracker.abort(e))?;
    }

    tracker.enter(Stage::ConfiguringBot);
    reporter.section("Configuring Telegram bot");
    configure_bot(host, reporter, config, &ctx)
        .await
        .map_err(|e| tracker.abort(e))?;

    tracker.enter(Stage::ConfiguringMonitoring);
    reporter.section("Configuring Grafana");
    configure_monitoring(host, reporter, config, &ctx)
        .await
        .map_err(|e| tracker.abort(e))?;

    tracker.enter(Stage::Summarizing);
    reporter.section("Installation complete!");
    let token = if ctx.input.install_server() {
        record_certificate_fingerprint(host, config, &ctx)
            .await
            .map_err(|e| tracker.abort(e))?;
        build_credential_token(&ctx, &config.server.service_name, config.server.port)
            .map_err(|e| tracker.abort(e.into()))?
    } else {
        None
    };

    tracker.enter(Stage::Done);
    Ok(SetupReport {
        stages: tracker.visited,
        grafana_url: format!(
            "http://{}:{}",
            ctx.input.public_address, config.services.grafana_port
        ),
        public_address: ctx.input.public_address.clone(),
        server_installed: ctx.input.install_server(),
        token,
    })
}

/// Log in to Docker Hub, passing the password on stdin only.
async fn registry_login(
    runner: &impl CommandRunner,
    config: &SetupConfig,
    login: &RegistryLogin,
) -> Result<()> {
    let payload = format!("{}\n", login.password.expose());
    execute(
        runner,
        &CommandSpec::new("docker")
            .args(["login", "--username", login.username.as_str(), "--password-stdin"])
            .escalated(&config.escalation),
        StepKind::Required,
        Some(payload.as_bytes()),
    )
    .await?;
    Ok(())
}
