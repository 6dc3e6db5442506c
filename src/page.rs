//! End-to-end derivation of the documentation page content.

use crate::error::Result;
use crate::model::{ReleaseRecord, build_releases};
use crate::ordering::Catalog;
use crate::selector::{DEFAULT_ARCH, best_asset};
use crate::views::{
    CompatibilityMatrix, InstallExamples, host_recommendation_html, release_list_html,
};
use serde::Serialize;
use tracing::{debug, info};

/// Every output slot of the page, ready for a renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub releases_list: String,
    /// Absent when the latest release has no asset for the target
    /// architecture.
    pub examples: Option<InstallExamples>,
    pub matrix: CompatibilityMatrix,
    pub matrix_html: String,
    /// Only set when the host architecture is known and served.
    pub recommendation: Option<String>,
    pub host_arch: Option<String>,
    pub catalog: Catalog,
}

impl PageView {
    /// Fails only when no record describes a Python release.
    pub fn build(records: &[ReleaseRecord], host_arch: Option<&str>) -> Result<Self> {
        let catalog = Catalog::new(build_releases(records))?;
        info!(
            "Loaded {} releases, latest is Python {}",
            catalog.releases().len(),
            catalog.latest().version
        );

        let latest = catalog.latest();
        let target = host_arch.unwrap_or(DEFAULT_ARCH);
        let suggested = best_asset(latest, target);
        match suggested {
            Some(asset) => debug!("Suggested AppImage for {}: {}", target, asset.name),
            None => debug!("No AppImage for {} in Python {}", target, latest.version),
        }

        let examples = suggested.map(|asset| InstallExamples::new(latest, asset));
        let recommendation = host_arch
            .zip(suggested)
            .map(|(arch, asset)| host_recommendation_html(arch, asset));

        let matrix = CompatibilityMatrix::new(&catalog);
        let matrix_html = matrix.to_html();

        Ok(Self {
            releases_list: release_list_html(&catalog),
            examples,
            matrix,
            matrix_html,
            recommendation,
            host_arch: host_arch.map(str::to_string),
            catalog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::AssetRecord;

    fn records() -> Vec<ReleaseRecord> {
        let assets = [
            "python3.12.1-cp312-cp312-manylinux2014_x86_64.AppImage",
            "python3.12.1-cp312-cp312-manylinux_2_28_x86_64.AppImage",
            "python3.12.1-cp312-cp312-manylinux_2_28_aarch64.AppImage",
        ];
        vec![
            ReleaseRecord {
                name: "Python 3.12".to_string(),
                detail_url: "https://example.org/python3.12".to_string(),
                assets: assets
                    .iter()
                    .map(|name| AssetRecord {
                        name: name.to_string(),
                        download_url: format!("https://example.org/download/{}", name),
                    })
                    .collect(),
            },
            ReleaseRecord {
                name: "Python 3.11".to_string(),
                detail_url: "https://example.org/python3.11".to_string(),
                assets: Vec::new(),
            },
        ]
    }

    #[test]
    fn test_unknown_host_uses_default_arch() {
        let page = PageView::build(&records(), None).unwrap();
        let examples = page.examples.unwrap();
        assert_eq!(examples.linux_tag, "manylinux_2_28");
        assert_eq!(examples.arch_tag, "x86_64");
        assert!(page.recommendation.is_none());
    }

    #[test]
    fn test_known_host_gets_recommendation() {
        let page = PageView::build(&records(), Some("aarch64")).unwrap();
        assert_eq!(page.examples.unwrap().arch_tag, "aarch64");
        assert!(page.recommendation.unwrap().contains("aarch64 Linux"));
    }

    #[test]
    fn test_unserved_host_skips_examples() {
        let page = PageView::build(&records(), Some("riscv64")).unwrap();
        assert!(page.examples.is_none());
        assert!(page.recommendation.is_none());
        assert!(page.matrix_html.contains("Python 3.12"));
    }

    #[test]
    fn test_no_releases_is_an_error() {
        let result = PageView::build(&[], None);
        assert!(matches!(result, Err(Error::NoReleases)));
    }
}
