//! Decoding of Python AppImage file names.
//!
//! Release assets follow a fixed naming scheme:
//!
//! ```text
//! python3.10.9-cp310-cp310-manylinux2014_x86_64.AppImage
//! python3.12.1-cp312-cp312-manylinux_2_28_aarch64.AppImage
//! ```
//!
//! Names that do not follow it are rejected with `None`; callers skip them.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Extension carried by every asset this crate understands.
pub const ARCHIVE_SUFFIX: &str = ".AppImage";

static APPIMAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^python(?P<full>[^-]+)-(?P<impl>[^-]+)-(?P<abi>[^-]+)-manylinux(?P<tag>.+)\.AppImage$",
    )
    .unwrap()
});

/// `_2_28_x86_64`
static PEP600_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^_(?P<major>\d+)_(?P<minor>\d+)_(?P<arch>[A-Za-z0-9]+(?:_[A-Za-z0-9]+)?)$")
        .unwrap()
});

/// `2014_x86_64`
static LEGACY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<family>\d+)_(?P<arch>[A-Za-z0-9]+(?:_[A-Za-z0-9]+)?)$").unwrap()
});

/// Numeric shape of a manylinux tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyShape {
    /// Old style tag, e.g. `manylinux2014`.
    Legacy(u32),
    /// PEP 600 tag, e.g. `manylinux_2_28`.
    Pep600 { major: u32, minor: u32 },
}

/// Manylinux compatibility family embedded in an asset name.
///
/// Keeps the digits as spelled in the name, so `2_05` stays `2_05`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformFamily {
    shape: FamilyShape,
    spelling: String,
}

impl PlatformFamily {
    pub fn legacy(family: u32) -> Self {
        Self {
            shape: FamilyShape::Legacy(family),
            spelling: family.to_string(),
        }
    }

    pub fn pep600(major: u32, minor: u32) -> Self {
        Self {
            shape: FamilyShape::Pep600 { major, minor },
            spelling: format!("{}_{}", major, minor),
        }
    }

    pub fn shape(&self) -> FamilyShape {
        self.shape
    }

    /// Glibc `(major, minor)` pair used for ranking.
    ///
    /// Legacy tags resolve to their PEP 600 aliases; unknown legacy numbers
    /// rank as `(n, 0)`.
    pub fn ordering_key(&self) -> (u32, u32) {
        match self.shape {
            FamilyShape::Legacy(1) => (2, 5),
            FamilyShape::Legacy(2010) => (2, 12),
            FamilyShape::Legacy(2014) => (2, 17),
            FamilyShape::Legacy(n) => (n, 0),
            FamilyShape::Pep600 { major, minor } => (major, minor),
        }
    }

    pub fn compare(&self, other: &PlatformFamily) -> Ordering {
        self.ordering_key().cmp(&other.ordering_key())
    }

    /// The tag exactly as it appears in file names.
    pub fn manylinux_tag(&self) -> String {
        match self.shape {
            FamilyShape::Legacy(_) => format!("manylinux{}", self.spelling),
            FamilyShape::Pep600 { .. } => format!("manylinux_{}", self.spelling),
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}

impl Serialize for PlatformFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.spelling)
    }
}

/// Fields decoded from one asset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAssetName {
    /// Full interpreter version, e.g. `3.10.9`.
    pub full_version: String,
    /// `<implementation>-<abi>`, e.g. `cp310-cp310`.
    pub python_tag: String,
    pub platform: PlatformFamily,
    pub arch: String,
}

pub fn is_appimage(name: &str) -> bool {
    name.ends_with(ARCHIVE_SUFFIX)
}

pub fn parse_asset_name(name: &str) -> Option<ParsedAssetName> {
    let caps = APPIMAGE_NAME.captures(name)?;
    let (platform, arch) = parse_platform_tag(&caps["tag"])?;

    Some(ParsedAssetName {
        full_version: caps["full"].to_string(),
        python_tag: format!("{}-{}", &caps["impl"], &caps["abi"]),
        platform,
        arch,
    })
}

/// Split the part following `manylinux` into family and architecture.
fn parse_platform_tag(tag: &str) -> Option<(PlatformFamily, String)> {
    if tag.starts_with('_') {
        let caps = PEP600_TAG.captures(tag)?;
        let family = PlatformFamily {
            shape: FamilyShape::Pep600 {
                major: caps["major"].parse().ok()?,
                minor: caps["minor"].parse().ok()?,
            },
            spelling: format!("{}_{}", &caps["major"], &caps["minor"]),
        };
        Some((family, caps["arch"].to_string()))
    } else {
        let caps = LEGACY_TAG.captures(tag)?;
        let family = PlatformFamily {
            shape: FamilyShape::Legacy(caps["family"].parse().ok()?),
            spelling: caps["family"].to_string(),
        };
        Some((family, caps["arch"].to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pep600_name() {
        let parsed =
            parse_asset_name("python3.10.9-cp310-cp310-manylinux_2_28_x86_64.AppImage").unwrap();
        assert_eq!(parsed.full_version, "3.10.9");
        assert_eq!(parsed.python_tag, "cp310-cp310");
        assert_eq!(parsed.platform, PlatformFamily::pep600(2, 28));
        assert_eq!(parsed.platform.to_string(), "2_28");
        assert_eq!(parsed.arch, "x86_64");
    }

    #[test]
    fn test_parse_pep600_single_token_arch() {
        let parsed =
            parse_asset_name("python3.12.1-cp312-cp312-manylinux_2_24_aarch64.AppImage").unwrap();
        assert_eq!(parsed.platform.to_string(), "2_24");
        assert_eq!(parsed.arch, "aarch64");
    }

    #[test]
    fn test_parse_legacy_name() {
        let parsed =
            parse_asset_name("python3.9.18-cp39-cp39-manylinux2014_aarch64.AppImage").unwrap();
        assert_eq!(parsed.platform, PlatformFamily::legacy(2014));
        assert_eq!(parsed.platform.to_string(), "2014");
        assert_eq!(parsed.arch, "aarch64");

        let parsed =
            parse_asset_name("python2.7.18-cp27-cp27mu-manylinux1_x86_64.AppImage").unwrap();
        assert_eq!(parsed.python_tag, "cp27-cp27mu");
        assert_eq!(parsed.platform, PlatformFamily::legacy(1));
        assert_eq!(parsed.arch, "x86_64");
    }

    #[test]
    fn test_parse_free_threaded_abi() {
        let parsed =
            parse_asset_name("python3.13.1-cp313-cp313t-manylinux2014_i686.AppImage").unwrap();
        assert_eq!(parsed.python_tag, "cp313-cp313t");
        assert_eq!(parsed.arch, "i686");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let name = "python3.11.7-cp311-cp311-manylinux_2_28_x86_64.AppImage";
        assert_eq!(parse_asset_name(name), parse_asset_name(name));
    }

    #[test]
    fn test_reject_malformed_names() {
        assert!(parse_asset_name("python3.10.9-cp310-cp310-manylinux_2_28_x86_64.tar.gz").is_none());
        assert!(parse_asset_name("python3.10.9-cp310-cp310-linux_x86_64.AppImage").is_none());
        assert!(parse_asset_name("python3.10.9-cp310-cp310-manylinux.AppImage").is_none());
        assert!(parse_asset_name("python3.10.9-cp310-cp310-manylinux_2_x86_64.AppImage").is_none());
        assert!(parse_asset_name("python3.10.9-cp310-cp310-manylinuxfoo_x86_64.AppImage").is_none());
        assert!(parse_asset_name("python3.10.9-manylinux2014_x86_64.AppImage").is_none());
        assert!(parse_asset_name("appimagetool-x86_64.AppImage").is_none());
    }

    #[test]
    fn test_platform_family_ordering() {
        let legacy = PlatformFamily::legacy(2014);
        let older = PlatformFamily::pep600(2, 28);
        let newer = PlatformFamily::pep600(2, 31);
        assert_eq!(newer.compare(&older), Ordering::Greater);
        assert_eq!(older.compare(&legacy), Ordering::Greater);
        assert_eq!(PlatformFamily::legacy(2010).compare(&PlatformFamily::legacy(1)), Ordering::Greater);
        assert_eq!(
            legacy.compare(&PlatformFamily::pep600(2, 17)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_tag_keeps_written_spelling() {
        let parsed =
            parse_asset_name("python3.12.1-cp312-cp312-manylinux_2_05_x86_64.AppImage").unwrap();
        assert_eq!(parsed.platform.to_string(), "2_05");
        assert_eq!(parsed.platform.manylinux_tag(), "manylinux_2_05");
        assert_eq!(parsed.platform.shape(), FamilyShape::Pep600 { major: 2, minor: 5 });
        assert_eq!(parsed.platform.compare(&PlatformFamily::pep600(2, 5)), Ordering::Equal);
    }

    #[test]
    fn test_manylinux_tag() {
        assert_eq!(PlatformFamily::legacy(2010).manylinux_tag(), "manylinux2010");
        assert_eq!(
            PlatformFamily::pep600(2, 24).manylinux_tag(),
            "manylinux_2_24"
        );
    }
}
