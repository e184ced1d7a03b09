//! Classification of HTTP responses into the fatal error taxonomy.

use anyhow::Result;
use reqwest::{Response, StatusCode};

use crate::error::InstallError;

/// Checks a response status and maps failures onto [`InstallError`].
/// 404 means the remote object does not exist for the requested
/// version/platform combination; everything else non-2xx is a network-level
/// failure as far as the user is concerned.
pub fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let err = match status {
        StatusCode::NOT_FOUND => InstallError::NotFound(format!("{} (HTTP 404)", url)),
        _ => InstallError::Network(format!(
            "remote returned status {} for {}",
            status.as_u16(),
            url
        )),
    };
    Err(err.into())
}
