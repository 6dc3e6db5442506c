//! Normalised release model built from raw release records.

use crate::asset_name::{self, PlatformFamily};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Release names carry this prefix, e.g. `Python 3.10`.
pub const RELEASE_PREFIX: &str = "Python";

/// One raw release as delivered by the release-listing API.
///
/// Accepts both the normalised field names and GitHub's own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(alias = "html_url")]
    pub detail_url: String,
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub name: String,
    #[serde(alias = "browser_download_url")]
    pub download_url: String,
}

/// GitHub reports untitled releases with `"name": null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub name: String,
    pub download_url: String,
    pub python_tag: String,
    pub platform_family: PlatformFamily,
    pub arch: String,
}

impl Asset {
    /// ABI half of the Python tag, e.g. `cp310` for `cp310-cp310`.
    pub fn abi(&self) -> &str {
        self.python_tag
            .split_once('-')
            .map_or(self.python_tag.as_str(), |(_, abi)| abi)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Short `<major>.<minor>` version.
    pub version: String,
    /// Full version of the first decoded asset, if any.
    pub full_version: Option<String>,
    pub assets: Vec<Asset>,
    pub detail_url: String,
}

/// Decode a release list in either GitHub's or the normalised JSON shape.
pub fn parse_records(json: &str) -> crate::error::Result<Vec<ReleaseRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Turn raw records into releases, in input order.
///
/// Records without the product prefix and assets whose names cannot be
/// decoded are skipped.
pub fn build_releases(records: &[ReleaseRecord]) -> Vec<Release> {
    records.iter().filter_map(build_release).collect()
}

fn build_release(record: &ReleaseRecord) -> Option<Release> {
    let Some(version) = record.name.strip_prefix(RELEASE_PREFIX) else {
        debug!("Skipping release {:?}", record.name);
        return None;
    };

    let mut full_version = None;
    let mut assets = Vec::new();

    for raw in record.assets.iter().filter(|a| asset_name::is_appimage(&a.name)) {
        let Some(parsed) = asset_name::parse_asset_name(&raw.name) else {
            debug!("Skipping asset with unrecognised name {:?}", raw.name);
            continue;
        };

        if full_version.is_none() {
            full_version = Some(parsed.full_version);
        }

        assets.push(Asset {
            name: raw.name.clone(),
            download_url: raw.download_url.clone(),
            python_tag: parsed.python_tag,
            platform_family: parsed.platform,
            arch: parsed.arch,
        });
    }

    Some(Release {
        version: version.trim_start().to_string(),
        full_version,
        assets,
        detail_url: record.detail_url.clone(),
    })
}
