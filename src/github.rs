use serde::Deserialize;

use crate::Result;

pub use fetching::{decode_response, GithubClient};

mod fetching;

/// A release's asset. Does not contain all fields.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Asset {
    pub name: String,
    /// `sha256:<hex>` as reported by the API.
    pub digest: String,
    pub browser_download_url: String,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Release {
    pub name: String,
    pub assets: Vec<Asset>,
}

/// Body of a non-success API response.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Something that can look up the release tagged `v<version>`.
pub trait ReleaseSource {
    fn fetch_release(&self, version: &str) -> Result<Release>;
}
