//! Per-run provisioning state.
//!
//! `ProvisioningContext` is owned by the sequencer and passed explicitly to
//! every step. Operator input is fixed once collected; derived facts are
//! single-assignment (`OnceCell`) and read by reference afterwards.

use std::cell::OnceCell;

use crate::domain::error::ProvisionError;
use crate::domain::release::{ReleaseArch, ResolvedRelease};
use crate::domain::secret::Secret;
use crate::domain::token::{CredentialToken, ServerDescriptor, TOKEN_VERSION};

/// Values entered by the operator.
#[derive(Debug, Clone)]
pub struct OperatorInput {
    /// Public IP address or hostname of this machine.
    pub public_address: String,
    /// Telegram bot API token.
    pub bot_token: Secret,
    /// Present only when the operator chose to install the FPTN server.
    pub server: Option<ServerInput>,
    /// Optional container-registry login.
    pub registry: Option<RegistryLogin>,
}

impl OperatorInput {
    #[must_use]
    pub fn install_server(&self) -> bool {
        self.server.is_some()
    }
}

/// Server-only operator input.
#[derive(Debug, Clone)]
pub struct ServerInput {
    /// Outbound network interface, e.g. `eth0`.
    pub network_interface: String,
    pub username: String,
    pub password: Secret,
    /// Per-user bandwidth limit in Mbit/s.
    pub bandwidth_mbps: u32,
}

/// Docker Hub credentials.
#[derive(Debug, Clone)]
pub struct RegistryLogin {
    pub username: String,
    pub password: Secret,
}

/// Facts derived while a run progresses.
#[derive(Debug, Default)]
pub struct DerivedFacts {
    arch: OnceCell<ReleaseArch>,
    release: OnceCell<ResolvedRelease>,
    shared_secret: OnceCell<Secret>,
    fingerprint: OnceCell<String>,
}

/// The single mutable record of a provisioning run.
#[derive(Debug)]
pub struct ProvisioningContext {
    pub input: OperatorInput,
    facts: DerivedFacts,
}

fn assign<'a, T>(
    cell: &'a OnceCell<T>,
    value: T,
    name: &'static str,
) -> Result<&'a T, ProvisionError> {
    cell.set(value)
        .map_err(|_| ProvisionError::AlreadyDerived(name))?;
    cell.get().ok_or(ProvisionError::AlreadyDerived(name))
}

impl ProvisioningContext {
    #[must_use]
    pub fn new(input: OperatorInput) -> Self {
        Self {
            input,
            facts: DerivedFacts::default(),
        }
    }

    /// # Errors
    ///
    /// Returns `AlreadyDerived` if the architecture was already recorded.
    pub fn record_arch(&self, arch: ReleaseArch) -> Result<ReleaseArch, ProvisionError> {
        assign(&self.facts.arch, arch, "architecture").copied()
    }

    /// # Errors
    ///
    /// Returns `AlreadyDerived` if a release was already recorded.
    pub fn record_release(
        &self,
        release: ResolvedRelease,
    ) -> Result<&ResolvedRelease, ProvisionError> {
        assign(&self.facts.release, release, "release")
    }

    /// # Errors
    ///
    /// Returns `AlreadyDerived` if the shared secret was already generated.
    pub fn record_shared_secret(&self, secret: Secret) -> Result<&Secret, ProvisionError> {
        assign(&self.facts.shared_secret, secret, "shared secret")
    }

    /// # Errors
    ///
    /// Returns `AlreadyDerived` if the fingerprint was already recorded.
    pub fn record_fingerprint(&self, fingerprint: String) -> Result<&str, ProvisionError> {
        assign(&self.facts.fingerprint, fingerprint, "certificate fingerprint").map(String::as_str)
    }

    #[must_use]
    pub fn arch(&self) -> Option<ReleaseArch> {
        self.facts.arch.get().copied()
    }

    #[must_use]
    pub fn release(&self) -> Option<&ResolvedRelease> {
        self.facts.release.get()
    }

    #[must_use]
    pub fn shared_secret(&self) -> Option<&Secret> {
        self.facts.shared_secret.get()
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<&str> {
        self.facts.fingerprint.get().map(String::as_str)
    }
}

/// Build the end-user access token from a completed server install.
///
/// Returns `None` when the server branch did not run or the certificate
/// fingerprint has not been recorded.
///
/// # Errors
///
/// Returns an error if the token cannot be serialized.
pub fn build_credential_token(
    ctx: &ProvisioningContext,
    service_name: &str,
    port: u16,
) -> Result<Option<String>, ProvisionError> {
    let (Some(server), Some(fingerprint)) = (ctx.input.server.as_ref(), ctx.fingerprint()) else {
        return Ok(None);
    };
    let token = CredentialToken {
        version: TOKEN_VERSION,
        service_name: service_name.to_string(),
        username: server.username.clone(),
        password: server.password.expose().to_string(),
        servers: vec![ServerDescriptor {
            name: service_name.to_string(),
            host: ctx.input.public_address.clone(),
            md5_fingerprint: fingerprint.to_string(),
            port,
        }],
    };
    token.encode().map(Some)
}
