//! Application service — operator input collection.

use anyhow::{Context, Result};

use crate::application::ports::Prompter;
use crate::domain::context::{OperatorInput, RegistryLogin, ServerInput};
use crate::domain::secret::Secret;

/// Ask the operator for every value the run needs, in a fixed order.
///
/// Server-specific fields are asked only when the operator chooses to
/// install the server. The registry password is asked only when a registry
/// username was given.
///
/// # Errors
///
/// Returns an error if a prompt fails or the bandwidth is not a positive
/// integer.
pub fn collect_input(prompter: &impl Prompter) -> Result<OperatorInput> {
    let install_server = prompter.confirm("Install the FPTN server on this machine?")?;
    let public_address = prompter.input("Public IP address of this server", false)?;
    let bot_token = Secret::from(prompter.password("Telegram bot API token", false)?);

    let server = if install_server {
        let network_interface =
            prompter.input("Outbound network interface name (e.g. eth0)", false)?;
        let username = prompter.input("New FPTN username", false)?;
        let password = Secret::from(prompter.password("Password for the new user", true)?);
        let bandwidth = prompter.input("Bandwidth limit for the user (Mbit/s)", false)?;
        Some(ServerInput {
            network_interface,
            username,
            password,
            bandwidth_mbps: parse_bandwidth(&bandwidth)?,
        })
    } else {
        None
    };

    let registry_user = prompter.input(
        "Docker Hub username (leave empty to skip login)",
        true,
    )?;
    let registry = if registry_user.trim().is_empty() {
        None
    } else {
        Some(RegistryLogin {
            username: registry_user.trim().to_string(),
            password: Secret::from(prompter.password("Docker Hub password", false)?),
        })
    };

    Ok(OperatorInput {
        public_address: public_address.trim().to_string(),
        bot_token,
        server,
        registry,
    })
}

/// Parse a bandwidth limit in Mbit/s.
///
/// # Errors
///
/// Returns an error unless `raw` is a positive integer.
pub fn parse_bandwidth(raw: &str) -> Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("bandwidth must be a whole number of Mbit/s, got '{raw}'"))?;
    anyhow::ensure!(value > 0, "bandwidth must be greater than zero");
    Ok(value)
}
