//! Release metadata for the Python AppImage documentation page.
//!
//! Asset names are decoded into a release model, ordered by version, and
//! turned into the page's text and markup fragments (release list,
//! installation examples, compatibility matrix, host recommendation).

pub mod asset_name;
pub mod cache;
pub mod error;
pub mod format_html;
pub mod host;
pub mod model;
pub mod ordering;
pub mod page;
pub mod provider;
pub mod selector;
pub mod server;
pub mod views;

pub use error::{Error, Result};
pub use page::PageView;
