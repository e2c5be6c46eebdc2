//! Registry infrastructure — implements `TagRegistry` using the GitHub tags API.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::TagRegistry;
use crate::domain::error::ProvisionError;

/// One entry of `GET /repos/{owner}/{repo}/tags`.
#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Lists tags through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubTagRegistry {
    api_base: String,
}

impl GithubTagRegistry {
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn tags_url(&self, repo: &str) -> String {
        format!("{}/repos/{repo}/tags", self.api_base)
    }

    /// Blocking fetch; call from `spawn_blocking`.
    fn fetch(url: &str, repo: &str) -> Result<Vec<String>> {
        let response = match ureq::get(url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", concat!("fptn-setup/", env!("CARGO_PKG_VERSION")))
            .call()
        {
            Ok(r) => r,
            Err(ureq::Error::Status(code, r)) => {
                let body = r.into_string().unwrap_or_default();
                tracing::warn!(repo, status = code, body = %body, "tag listing request failed");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(ProvisionError::NetworkError {
                    repo: repo.to_string(),
                    message: e.to_string(),
                }
                .into());
            }
        };

        let body = response
            .into_string()
            .map_err(|e| ProvisionError::NetworkError {
                repo: repo.to_string(),
                message: e.to_string(),
            })?;
        parse_tag_list(&body).map_err(|e| {
            ProvisionError::NetworkError {
                repo: repo.to_string(),
                message: format!("{e:#}"),
            }
            .into()
        })
    }
}

impl TagRegistry for GithubTagRegistry {
    async fn list_tags(&self, repo: &str) -> Result<Vec<String>> {
        let url = self.tags_url(repo);
        let repo_owned = repo.to_string();
        tracing::debug!(%url, "listing tags");
        tokio::task::spawn_blocking(move || Self::fetch(&url, &repo_owned))
            .await
            .context("spawn_blocking for tag listing")?
    }
}

/// Parse a tag-listing JSON body into tag names, preserving order.
///
/// # Errors
///
/// Returns an error if the body is not an array of objects with a `name`.
pub fn parse_tag_list(body: &str) -> Result<Vec<String>> {
    let entries: Vec<TagEntry> = serde_json::from_str(body).context("invalid tag list")?;
    Ok(entries.into_iter().map(|t| t.name).collect())
}
