//! HTTP client with error classification.

use anyhow::Result;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::io::Write;

use super::status::check_status;
use crate::error::InstallError;

/// HTTP client for the download site. Failures are classified into
/// [`InstallError`]; nothing is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| InstallError::Network(format!("request to {} failed: {}", url, e)))?;

        let response = check_status(response)?;

        let result = response
            .json::<T>()
            .await
            .map_err(|e| InstallError::Parse(format!("invalid JSON from {}: {}", url, e)))?;

        Ok(result)
    }

    /// Downloads a file from a URL, streaming chunks into a writer.
    /// Uses a writer factory so the caller owns file creation (e.g. via
    /// the Runtime). Returns the number of bytes downloaded.
    #[tracing::instrument(skip(self, create_writer))]
    pub async fn download_file<W, F>(&self, url: &str, create_writer: F) -> Result<u64>
    where
        W: Write,
        F: Fn() -> Result<W>,
    {
        debug!("Downloading file from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| InstallError::Network(format!("request to {} failed: {}", url, e)))?;

        let mut response = check_status(response)?;

        let mut writer = create_writer()?;
        let mut downloaded_bytes: u64 = 0;

        while let Some(chunk) = response.chunk().await.map_err(|e| {
            InstallError::Network(format!("download stream from {} failed: {}", url, e))
        })? {
            writer.write_all(&chunk).map_err(|e| {
                InstallError::Filesystem(format!("failed to write downloaded chunk: {}", e))
            })?;
            downloaded_bytes += chunk.len() as u64;
        }

        debug!(
            "Downloaded {:.2} MB",
            downloaded_bytes as f64 / (1024.0 * 1024.0)
        );

        Ok(downloaded_bytes)
    }
}
