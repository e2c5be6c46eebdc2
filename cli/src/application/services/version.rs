//! Application service — latest release lookup with a single fallback.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, TagRegistry};
use crate::domain::error::ProvisionError;
use crate::domain::release::ResolvedRelease;

/// Return the most recent tag of `repo`, or `None` when it has no tags.
///
/// The registry's ordering is trusted; the first entry wins.
///
/// # Errors
///
/// Returns `NetworkError` if the registry cannot be queried.
pub async fn resolve_latest_tag(registry: &impl TagRegistry, repo: &str) -> Result<Option<String>> {
    let tags = registry.list_tags(repo).await?;
    Ok(tags.into_iter().next())
}

/// Resolve the release to install.
///
/// Tries `detected` first (when known and different from `canonical`); on
/// no tags or a network failure tries `canonical` exactly once.
///
/// # Errors
///
/// Returns `NoReleaseFound` naming every repository tried.
pub async fn resolve_release(
    registry: &impl TagRegistry,
    reporter: &impl ProgressReporter,
    detected: Option<&str>,
    canonical: &str,
) -> Result<ResolvedRelease> {
    let mut tried = Vec::with_capacity(2);

    if let Some(primary) = detected.filter(|repo| *repo != canonical) {
        tried.push(primary.to_string());
        match resolve_latest_tag(registry, primary).await {
            Ok(Some(tag)) => {
                return Ok(ResolvedRelease {
                    repo: primary.to_string(),
                    tag,
                });
            }
            Ok(None) => reporter.warn(&format!(
                "No releases found in '{primary}', trying {canonical}"
            )),
            Err(e) => reporter.warn(&format!("{e:#}; trying {canonical}")),
        }
    }

    tried.push(canonical.to_string());
    match resolve_latest_tag(registry, canonical).await {
        Ok(Some(tag)) => Ok(ResolvedRelease {
            repo: canonical.to_string(),
            tag,
        }),
        Ok(None) => Err(ProvisionError::NoReleaseFound { repos: tried }.into()),
        Err(e) => {
            tracing::warn!(repo = canonical, error = %e, "tag lookup failed");
            Err(ProvisionError::NoReleaseFound { repos: tried }.into())
        }
    }
}
