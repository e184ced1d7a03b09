use anyhow::Result;
use reqwest::Client;
use std::path::PathBuf;

use crate::{
    archive::{ArchiveExtractor, TarGzExtractor},
    godl::{GetVersions, GoDownloads},
    http::HttpClient,
    platform::{DefaultPlatformDetector, PlatformDetector},
};

/// Wiring for one install run.
pub struct Config<G: GetVersions, E: ArchiveExtractor, P: PlatformDetector> {
    pub godl: G,
    pub http: HttpClient,
    pub extractor: E,
    pub detector: P,
    pub install_root: Option<PathBuf>,
}

impl Config<GoDownloads, TarGzExtractor, DefaultPlatformDetector> {
    pub fn new(install_root: Option<PathBuf>, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent("updoot").build()?;
        let http = HttpClient::new(client);
        let godl = GoDownloads::new(http.clone(), base_url);

        Ok(Self {
            godl,
            http,
            extractor: TarGzExtractor,
            detector: DefaultPlatformDetector,
            install_root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_defaults_to_go_dev() {
        let config = Config::new(None, None).unwrap();
        assert!(config.godl.archive_url("x").starts_with("https://go.dev/dl/"));
        assert!(config.install_root.is_none());
    }

    #[test]
    fn test_config_new_with_overrides() {
        let config = Config::new(
            Some(PathBuf::from("/opt/go")),
            Some("http://127.0.0.1:8080".to_string()),
        )
        .unwrap();
        assert_eq!(config.install_root, Some(PathBuf::from("/opt/go")));
        assert!(
            config
                .godl
                .archive_url("x")
                .starts_with("http://127.0.0.1:8080/dl/")
        );
    }
}
