use serde::{Deserialize, Serialize};

/// One release in the go.dev version listing
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct GoRelease {
    /// Version tag as published, e.g. "go1.22.0"
    pub version: String,
    pub stable: bool,
    #[serde(default)]
    pub files: Vec<GoFile>,
}

/// One downloadable file belonging to a release.
/// Source tarballs carry empty os/arch strings; the fields default so the
/// model stays liberal about what upstream sends.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct GoFile {
    pub filename: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub size: u64,
    /// "archive", "installer" or "source"
    #[serde(default)]
    pub kind: String,
}
