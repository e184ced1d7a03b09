//! Client for the Go download site version listing.
//!
//! The listing at `{base}/dl/?mode=json` describes recent stable releases
//! and the per-platform files each one ships. This module models that
//! payload, resolves the newest stable version from it, and builds archive
//! URLs.

mod client;
mod types;
mod version;

pub use client::{DEFAULT_BASE_URL, GetVersions, GoDownloads};
pub use types::{GoFile, GoRelease};
pub use version::{GoVersion, latest_stable};

#[cfg(test)]
pub use client::MockGetVersions;
