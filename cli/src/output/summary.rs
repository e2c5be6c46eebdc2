//! Final summary printed after a successful run.

use owo_colors::OwoColorize as _;

use crate::application::SetupReport;
use crate::output::{OutputContext, Styles};

const SEPARATOR: &str = "==========================================";

/// Build the summary lines for `report`.
#[must_use]
pub fn summary_lines(report: &SetupReport, styles: &Styles) -> Vec<String> {
    let mut lines = vec![
        format!("Grafana: {}", report.grafana_url.style(styles.bold)),
        "  Default login is admin/admin; change it on first sign-in.".to_string(),
    ];

    if report.server_installed {
        lines.push(format!("FPTN server is running on {}.", report.public_address));
    }

    if let Some(token) = &report.token {
        lines.push(String::new());
        lines.push("Access token for the FPTN client:".to_string());
        lines.push(SEPARATOR.to_string());
        lines.push(format!("{}", token.style(styles.token)));
        lines.push(SEPARATOR.to_string());
    }

    lines.push(String::new());
    lines.push(format!(
        "{}",
        "To stop the bot or Grafana, run `docker compose down` in its directory."
            .style(styles.dim)
    ));
    lines
}

/// Print the summary to stdout.
pub fn render_summary(ctx: &OutputContext, report: &SetupReport) {
    for line in summary_lines(report, &ctx.styles) {
        println!("{line}");
    }
}
