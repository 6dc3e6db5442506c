//! Best AppImage for a target architecture.

use crate::model::{Asset, Release};
use std::cmp::Ordering;

/// Architecture assumed when the host could not be detected.
pub const DEFAULT_ARCH: &str = "x86_64";

/// Pick the asset of `release` built for `arch` with the most recent
/// manylinux family. The first asset wins ties.
pub fn best_asset<'a>(release: &'a Release, arch: &str) -> Option<&'a Asset> {
    let mut best: Option<&Asset> = None;
    for asset in release.assets.iter().filter(|a| a.arch == arch) {
        let newer = best.is_none_or(|current| {
            asset.platform_family.compare(&current.platform_family) == Ordering::Greater
        });
        if newer {
            best = Some(asset);
        }
    }
    best
}
