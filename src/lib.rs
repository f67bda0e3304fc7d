//! Generates the Scoop bucket manifest for a tagged neokikoeru release.
//!
//! Reads the version from `$NEOKIKOERU_VERSION`, fetches the matching GitHub
//! release, picks the Windows amd64/arm64 archives and renders
//! `templates/neokikoeru.json.tmpl` into `bucket/neokikoeru.json`.

pub mod bucket;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod template;
pub mod version;

pub use error::{Error, Result};
