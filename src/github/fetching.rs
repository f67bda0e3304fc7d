use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::{Config, ACCEPT, API_VERSION, USER_AGENT};
use crate::github::{ApiErrorBody, Release, ReleaseSource};
use crate::{Error, Result};

/// Blocking GitHub API client bound to one repository.
pub struct GithubClient {
    client: Client,
    api_base: String,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self> {
        // The timeout covers the whole call, body included.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| Error::Network {
                url: config.api_base.clone(),
                source,
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo: config.repo.clone(),
            token: config.token.clone(),
        })
    }

    /// The version is interpolated verbatim.
    pub fn release_url(&self, version: &str) -> String {
        format!(
            "{}/repos/{}/releases/tags/v{version}",
            self.api_base, self.repo
        )
    }
}

impl ReleaseSource for GithubClient {
    fn fetch_release(&self, version: &str) -> Result<Release> {
        let url = self.release_url(version);
        tracing::debug!("GET {url}");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        // The URL is carried by the variant, not by the source.
        let network = |source: reqwest::Error| Error::Network {
            url: url.clone(),
            source: source.without_url(),
        };
        let response = request.send().map_err(network)?;
        let status = response.status();
        let body = response.bytes().map_err(network)?;
        tracing::debug!("{url} answered {status} with {} bytes", body.len());

        let release = decode_response(status, &body)?;
        tracing::info!(
            "fetched release {:?} with {} assets",
            release.name,
            release.assets.len()
        );
        Ok(release)
    }
}

/// Maps a response to a release. Only 200 counts as success; any other
/// status must carry an API error body whose message becomes the error.
pub fn decode_response(status: StatusCode, body: &[u8]) -> Result<Release> {
    if status != StatusCode::OK {
        let error: ApiErrorBody = serde_json::from_slice(body).map_err(|source| Error::Decode {
            what: "error",
            source,
        })?;
        return Err(Error::Api {
            status: status.as_u16(),
            message: error.message,
        });
    }

    serde_json::from_slice(body).map_err(|source| Error::Decode {
        what: "release",
        source,
    })
}
