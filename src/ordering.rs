//! Version ordering of releases.

use crate::error::{Error, Result};
use crate::model::Release;
use serde::Serialize;
use std::cmp::Ordering;

/// `(major, minor)` of a short version. Components that are not numbers
/// become `None`, which orders before any number.
fn version_key(version: &str) -> (Option<u32>, Option<u32>) {
    let mut parts = version.split('.');
    let major = parts.next().and_then(|p| p.trim().parse().ok());
    let minor = parts.next().and_then(|p| p.trim().parse().ok());
    (major, minor)
}

/// Compare two `<major>.<minor>` versions numerically.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    version_key(a).cmp(&version_key(b))
}

/// Stable ascending sort by version.
pub fn sort_releases(releases: &mut [Release]) {
    releases.sort_by(|a, b| compare_versions(&a.version, &b.version));
}

/// Ascending, never empty collection of releases.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    releases: Vec<Release>,
}

impl Catalog {
    pub fn new(mut releases: Vec<Release>) -> Result<Self> {
        if releases.is_empty() {
            return Err(Error::NoReleases);
        }
        sort_releases(&mut releases);
        Ok(Self { releases })
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Most recent release.
    pub fn latest(&self) -> &Release {
        // Non-empty by construction.
        &self.releases[self.releases.len() - 1]
    }
}
