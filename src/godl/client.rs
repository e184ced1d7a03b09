use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use super::types::GoRelease;
use crate::http::HttpClient;

/// Default Go download site.
pub const DEFAULT_BASE_URL: &str = "https://go.dev";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GetVersions: Send + Sync {
    /// Fetch the stable-release listing.
    async fn get_versions(&self) -> Result<Vec<GoRelease>>;

    /// URL of a release archive by filename.
    fn archive_url(&self, filename: &str) -> String;
}

pub struct GoDownloads {
    http: HttpClient,
    base_url: String,
}

impl GoDownloads {
    #[tracing::instrument(skip(http, base_url))]
    pub fn new(http: HttpClient, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { http, base_url }
    }
}

#[async_trait]
impl GetVersions for GoDownloads {
    #[tracing::instrument(skip(self))]
    async fn get_versions(&self) -> Result<Vec<GoRelease>> {
        let url = format!("{}/dl/?mode=json", self.base_url);
        debug!("Fetching version listing from {}...", url);
        self.http.get_json(&url).await
    }

    #[tracing::instrument(skip(self))]
    fn archive_url(&self, filename: &str) -> String {
        format!("{}/dl/{}", self.base_url, filename)
    }
}
