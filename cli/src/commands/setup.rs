//! The interactive setup command.

use anyhow::Result;

use crate::application::{SetupOptions, run_setup};
use crate::domain::config::SetupConfig;
use crate::infra::host::LocalHost;
use crate::infra::prompt::DialoguerPrompter;
use crate::infra::registry::GithubTagRegistry;
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;
use crate::output::summary::render_summary;

/// Run the full setup against the local machine.
///
/// # Errors
///
/// Returns the [`SetupAborted`](crate::domain::error::SetupAborted) error of
/// the first required step that fails.
pub async fn run(ctx: &OutputContext, config: &SetupConfig) -> Result<()> {
    let host = LocalHost::new();
    let registry = GithubTagRegistry::new(&config.repository.api_base);
    let reporter = TerminalReporter::new(ctx);

    let report = run_setup(
        &host,
        &registry,
        &DialoguerPrompter::default(),
        &reporter,
        SetupOptions {
            config,
            machine: std::env::consts::ARCH,
        },
    )
    .await?;

    render_summary(ctx, &report);
    Ok(())
}
