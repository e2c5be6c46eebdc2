//! Release resolution types: architecture mapping, repository identifiers
//! and release artifact naming.
//!
//! Pure functions only — no I/O, no async, no network access.

use std::fmt;

use crate::domain::error::ProvisionError;

/// Normalized architecture tag used in release asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseArch {
    Amd64,
    Arm64,
}

impl ReleaseArch {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for ReleaseArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a machine architecture string to its release-asset tag.
///
/// Accepts both the kernel names (`x86_64`, `aarch64`) and the Debian names
/// already in release form.
///
/// # Errors
///
/// Returns `UnsupportedArchitecture` for anything else.
pub fn normalize_architecture(machine: &str) -> Result<ReleaseArch, ProvisionError> {
    match machine {
        "x86_64" | "amd64" => Ok(ReleaseArch::Amd64),
        "aarch64" | "arm64" => Ok(ReleaseArch::Arm64),
        other => Err(ProvisionError::UnsupportedArchitecture(other.to_string())),
    }
}

/// Extract an `owner/repo` path from a git remote URL.
///
/// Handles `https://github.com/owner/repo(.git)` and
/// `git@github.com:owner/repo(.git)`. Returns `None` when the URL does not
/// point at GitHub or the path is not exactly two segments.
#[must_use]
pub fn repo_path_from_remote(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = url
        .split_once("github.com/")
        .or_else(|| url.split_once("github.com:"))
        .map(|(_, rest)| rest)?;
    let path = rest.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Some(format!("{owner}/{repo}"))
        }
        _ => None,
    }
}

/// A release selected for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    /// Repository the tag was found in.
    pub repo: String,
    /// Most recent tag, e.g. `"v2.1.0"`.
    pub tag: String,
}

/// Package file name: `<product>-<tag>-<platform>-<arch>.deb`.
#[must_use]
pub fn package_name(product: &str, tag: &str, platform: &str, arch: ReleaseArch) -> String {
    format!("{product}-{tag}-{platform}-{arch}.deb")
}

/// Download URL for a release asset.
#[must_use]
pub fn package_url(download_base: &str, release: &ResolvedRelease, asset: &str) -> String {
    format!(
        "{}/{}/releases/download/{}/{asset}",
        download_base.trim_end_matches('/'),
        release.repo,
        release.tag
    )
}
