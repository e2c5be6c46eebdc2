//! Provisioning stages and step classification.

use std::fmt;

/// States of the provisioning state machine, in the order they are visited.
///
/// `Aborted` is absorbing and reachable from any other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckingPrerequisites,
    CollectingInput,
    InstallingServer,
    ConfiguringBot,
    ConfiguringMonitoring,
    Summarizing,
    Done,
    Aborted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CheckingPrerequisites => "checking prerequisites",
            Self::CollectingInput => "collecting input",
            Self::InstallingServer => "installing the FPTN server",
            Self::ConfiguringBot => "configuring the Telegram bot",
            Self::ConfiguringMonitoring => "configuring Grafana",
            Self::Summarizing => "summarizing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        })
    }
}

/// How a failing step affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// The run aborts on failure.
    Required,
    /// Failure is logged and a default branch is taken.
    BestEffort,
}

/// The sub-steps of the server installation branch, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStep {
    ResolveRelease,
    InstallPackage,
    GenerateCertificates,
    ConfigureServer,
    CreateUser,
    ConfigureDns,
    StartService,
}

impl ServerStep {
    pub const ALL: [ServerStep; 7] = [
        Self::ResolveRelease,
        Self::InstallPackage,
        Self::GenerateCertificates,
        Self::ConfigureServer,
        Self::CreateUser,
        Self::ConfigureDns,
        Self::StartService,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ResolveRelease => "Resolving latest FPTN release",
            Self::InstallPackage => "Installing FPTN server package",
            Self::GenerateCertificates => "Generating SSL certificates",
            Self::ConfigureServer => "Configuring server.conf",
            Self::CreateUser => "Creating FPTN user",
            Self::ConfigureDns => "Configuring dnsmasq",
            Self::StartService => "Starting FPTN server",
        }
    }
}
