use std::sync::OnceLock;

use regex::Regex;

use crate::config::VERSION_ENV_KEY;
use crate::{Error, Result};

static VERSION_RE: OnceLock<Regex> = OnceLock::new();

fn version_regex() -> &'static Regex {
    VERSION_RE.get_or_init(|| {
        Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("Failed to compile regex")
    })
}

/// Accepts `MAJOR.MINOR.PATCH` with digits only. No `v` prefix, no
/// pre-release or build suffix, no surrounding whitespace.
pub fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() || !version_regex().is_match(version) {
        return Err(Error::InvalidVersion {
            key: VERSION_ENV_KEY,
        });
    }
    Ok(())
}

/// Reads the release version through `lookup` and validates it.
pub fn resolve_version(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let version = lookup(VERSION_ENV_KEY).unwrap_or_default();
    validate_version(&version)?;
    tracing::debug!("resolved version {version} from ${VERSION_ENV_KEY}");
    Ok(version)
}
