//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod certificate;
pub mod config;
pub mod context;
pub mod env_file;
pub mod error;
pub mod release;
pub mod secret;
pub mod stage;
pub mod token;

pub use config::SetupConfig;
pub use context::{OperatorInput, ProvisioningContext, RegistryLogin, ServerInput};
pub use error::{ProvisionError, SetupAborted};
pub use release::{ReleaseArch, ResolvedRelease, normalize_architecture};
pub use secret::{Secret, generate_secret};
pub use stage::{ServerStep, Stage, StepKind};
pub use token::CredentialToken;
