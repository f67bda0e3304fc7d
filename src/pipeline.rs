use crate::bucket::Bucket;
use crate::config::Config;
use crate::github::ReleaseSource;
use crate::manifest::write_manifest;
use crate::version::resolve_version;
use crate::Result;

/// Resolve the version, fetch its release, map the assets and write the
/// manifest. Stops at the first failure; nothing is written unless the
/// release was fetched.
pub fn run(
    config: &Config,
    source: &dyn ReleaseSource,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Bucket> {
    let version = resolve_version(lookup)?;
    tracing::info!("generating manifest for {} v{version}", config.repo);

    let release = source.fetch_release(&version)?;
    let bucket = Bucket::from_release(&version, &release);

    write_manifest(&config.template_path, &config.output_path, &bucket)?;
    Ok(bucket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VERSION_ENV_KEY;
    use crate::github::{Asset, Release};
    use crate::Error;
    use std::cell::Cell;
    use std::fs;
    use std::path::Path;

    struct FakeSource {
        result: fn() -> Result<Release>,
        calls: Cell<usize>,
    }

    impl FakeSource {
        fn new(result: fn() -> Result<Release>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl ReleaseSource for FakeSource {
        fn fetch_release(&self, _version: &str) -> Result<Release> {
            self.calls.set(self.calls.get() + 1);
            (self.result)()
        }
    }

    fn two_assets() -> Result<Release> {
        Ok(Release {
            name: "v1.2.3".to_string(),
            assets: vec![
                Asset {
                    name: "neokikoeru-windows-amd64.zip".to_string(),
                    digest: "sha256:AAA".to_string(),
                    browser_download_url: "https://dl/amd64.zip".to_string(),
                },
                Asset {
                    name: "neokikoeru-windows-arm64.zip".to_string(),
                    digest: "sha256:BBB".to_string(),
                    browser_download_url: "https://dl/arm64.zip".to_string(),
                },
            ],
        })
    }

    fn not_found() -> Result<Release> {
        Err(Error::Api {
            status: 404,
            message: "Not Found".to_string(),
        })
    }

    fn config_in(dir: &Path) -> Config {
        let template_path = dir.join("neokikoeru.json.tmpl");
        fs::write(
            &template_path,
            concat!(
                "{{.Version}}|{{.DownloadUrlWindowsAmd64}}|{{.Sha256WindowsAmd64}}",
                "|{{.DownloadUrlWindowsArm64}}|{{.Sha256WindowsArm64}}",
            ),
        )
        .unwrap();
        Config {
            template_path,
            output_path: dir.join("neokikoeru.json"),
            ..Config::default()
        }
    }

    fn version(value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| (key == VERSION_ENV_KEY).then(|| value.to_string())
    }

    #[test]
    fn writes_manifest_for_release() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let bucket = run(&config, &FakeSource::new(two_assets), version("1.2.3")).unwrap();

        assert_eq!(bucket.windows_amd64.sha256, "AAA");
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "1.2.3|https://dl/amd64.zip|AAA|https://dl/arm64.zip|BBB"
        );
    }

    #[test]
    fn invalid_version_never_fetches() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let source = FakeSource::new(two_assets);

        for bad in ["", "1.2", "v1.2.3", "1.2.3-beta"] {
            let err = run(&config, &source, version(bad)).unwrap_err();
            assert!(matches!(err, Error::InvalidVersion { .. }));
        }
        assert_eq!(source.calls.get(), 0);
        assert!(!config.output_path.exists());
    }

    #[test]
    fn api_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = run(&config, &FakeSource::new(not_found), version("9.9.9")).unwrap_err();

        assert_eq!(err.to_string(), "Not Found");
        assert!(!config.output_path.exists());
    }

    #[test]
    fn release_without_tracked_assets_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let source = FakeSource::new(|| Ok(Release::default()));

        let bucket = run(&config, &source, version("0.4.0")).unwrap();

        assert_eq!(bucket, Bucket::new("0.4.0"));
        assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "0.4.0||||");
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let source = FakeSource::new(two_assets);

        run(&config, &source, version("1.2.3")).unwrap();
        let first = fs::read(&config.output_path).unwrap();
        run(&config, &source, version("1.2.3")).unwrap();
        let second = fs::read(&config.output_path).unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls.get(), 2);
    }
}
