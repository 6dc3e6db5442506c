//! Release-listing sources.

pub mod github;

/// Repository the documentation page describes.
pub const DEFAULT_REPO: &str = "niess/python-appimage";
