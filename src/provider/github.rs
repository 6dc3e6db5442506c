//! GitHub release listing.

use crate::error::{Error, Result};
use crate::model::{AssetRecord, ReleaseRecord};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct GitHubRelease {
    name: Option<String>,
    html_url: String,
    #[serde(default)]
    assets: Vec<GitHubAsset>,
}

#[derive(Debug, Deserialize)]
struct GitHubAsset {
    name: String,
    browser_download_url: String,
}

/// Fetch the first page of releases of `repo` (`owner/name`).
pub async fn fetch_releases(client: &Client, repo: &str) -> Result<Vec<ReleaseRecord>> {
    let url = format!("https://api.github.com/repos/{}/releases", repo);
    info!("Fetching releases from {}", url);

    let response = client
        .get(&url)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::UpstreamStatus(response.status()));
    }

    let github_releases: Vec<GitHubRelease> = response.json().await?;

    Ok(github_releases.into_iter().map(into_record).collect())
}

fn into_record(r: GitHubRelease) -> ReleaseRecord {
    ReleaseRecord {
        name: r.name.unwrap_or_default(),
        detail_url: r.html_url,
        assets: r
            .assets
            .into_iter()
            .map(|a| AssetRecord {
                name: a.name,
                download_url: a.browser_download_url,
            })
            .collect(),
    }
}
