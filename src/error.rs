//! Crate-wide error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No release in the upstream list carried the product prefix.
    #[error("no Python releases found in the release list")]
    NoReleases,

    #[error("failed to fetch releases: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("GitHub API returned status: {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("cache window of {0} minutes is out of range")]
    InvalidCacheWindow(i64),

    #[error("invalid release JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
