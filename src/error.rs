use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;

/// Every way a run can fail. All of them are fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("${key} is not a valid version. Please provide a valid semver")]
    InvalidVersion { key: &'static str },

    /// Request construction, transport failure or timeout.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-200 response whose body decoded to an API error message.
    /// Displays the message exactly as the API sent it.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("failed to decode {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
