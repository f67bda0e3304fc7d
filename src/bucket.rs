use std::collections::BTreeMap;

use crate::github::Release;

const DIGEST_PREFIX: &str = "sha256:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    WindowsAmd64,
    WindowsArm64,
}

/// Tracked release assets and the platform each one fills in.
pub const ASSET_TARGETS: [(&str, Platform); 2] = [
    ("neokikoeru-windows-amd64.zip", Platform::WindowsAmd64),
    ("neokikoeru-windows-arm64.zip", Platform::WindowsArm64),
];

impl Platform {
    pub fn from_asset_name(name: &str) -> Option<Platform> {
        ASSET_TARGETS
            .iter()
            .find(|(asset_name, _)| *asset_name == name)
            .map(|(_, platform)| *platform)
    }

    /// Suffix used in template field names, e.g. `Sha256WindowsAmd64`.
    fn field_suffix(self) -> &'static str {
        match self {
            Platform::WindowsAmd64 => "WindowsAmd64",
            Platform::WindowsArm64 => "WindowsArm64",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    pub download_url: String,
    pub sha256: String,
}

/// Everything the manifest template needs. `version` is always the
/// validated input version, whether or not any asset matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    pub version: String,
    pub windows_amd64: Artifact,
    pub windows_arm64: Artifact,
}

impl Bucket {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..Self::default()
        }
    }

    pub fn artifact(&self, platform: Platform) -> &Artifact {
        match platform {
            Platform::WindowsAmd64 => &self.windows_amd64,
            Platform::WindowsArm64 => &self.windows_arm64,
        }
    }

    pub fn artifact_mut(&mut self, platform: Platform) -> &mut Artifact {
        match platform {
            Platform::WindowsAmd64 => &mut self.windows_amd64,
            Platform::WindowsArm64 => &mut self.windows_arm64,
        }
    }

    /// Copies URL and checksum of every tracked asset. A repeated asset
    /// name overwrites the earlier one; untracked assets are skipped.
    pub fn from_release(version: &str, release: &Release) -> Self {
        let mut bucket = Bucket::new(version);
        let mut seen: Vec<Platform> = Vec::new();

        for asset in &release.assets {
            let Some(platform) = Platform::from_asset_name(&asset.name) else {
                continue;
            };

            if seen.contains(&platform) {
                tracing::warn!("asset {} listed more than once, using the last one", asset.name);
            } else {
                seen.push(platform);
            }

            let sha256 = match asset.digest.strip_prefix(DIGEST_PREFIX) {
                Some(hex) => hex,
                None => {
                    tracing::warn!(
                        "digest of {} has no {DIGEST_PREFIX} prefix: {:?}",
                        asset.name,
                        asset.digest
                    );
                    asset.digest.as_str()
                }
            };

            let artifact = bucket.artifact_mut(platform);
            artifact.download_url = asset.browser_download_url.clone();
            artifact.sha256 = sha256.to_string();
        }

        for (name, platform) in ASSET_TARGETS {
            if !seen.contains(&platform) {
                tracing::warn!("release has no asset named {name}, leaving its fields empty");
            }
        }

        bucket
    }

    /// Flattens the record into the field names the manifest template uses.
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("Version".to_string(), self.version.clone());
        for (_, platform) in ASSET_TARGETS {
            let artifact = self.artifact(platform);
            let suffix = platform.field_suffix();
            fields.insert(format!("DownloadUrl{suffix}"), artifact.download_url.clone());
            fields.insert(format!("Sha256{suffix}"), artifact.sha256.clone());
        }
        fields
    }
}
