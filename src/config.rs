use std::path::PathBuf;
use std::time::Duration;

use const_format::concatcp;

pub const VERSION_ENV_KEY: &str = "NEOKIKOERU_VERSION";
pub const TOKEN_ENV_KEY: &str = "GITHUB_TOKEN";

pub const REPO: &str = "vscodev/neokikoeru";
pub const API_BASE: &str = "https://api.github.com";
pub const API_VERSION: &str = "2022-11-28";
pub const ACCEPT: &str = "application/vnd.github+json";
pub const USER_AGENT: &str = concatcp!("neokikoeru-bucket/", env!("CARGO_PKG_VERSION"));

pub const TEMPLATE_PATH: &str = "./templates/neokikoeru.json.tmpl";
pub const OUTPUT_PATH: &str = "./bucket/neokikoeru.json";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for one run. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub repo: String,
    pub api_base: String,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub timeout: Duration,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: REPO.to_string(),
            api_base: API_BASE.to_string(),
            template_path: PathBuf::from(TEMPLATE_PATH),
            output_path: PathBuf::from(OUTPUT_PATH),
            timeout: FETCH_TIMEOUT,
            token: None,
        }
    }
}

impl Config {
    /// Defaults plus the optional API token. An empty token counts as unset.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            token: lookup(TOKEN_ENV_KEY).filter(|t| !t.is_empty()),
            ..Self::default()
        }
    }
}
