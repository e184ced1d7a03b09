//! Fatal error taxonomy for the install flow.
//!
//! Every failure is fatal and surfaced directly to the user; nothing is
//! retried or recovered. Callers that need to branch on a category downcast
//! from `anyhow::Error`.

/// Errors that terminate an install run.
#[derive(Debug)]
pub enum InstallError {
    /// Transport failure or unexpected HTTP status from the download site
    Network(String),
    /// Version listing or response body could not be decoded
    Parse(String),
    /// Local OS/architecture has no entry in the target table
    UnsupportedPlatform { os: String, arch: String },
    /// Remote object (release or archive) does not exist
    NotFound(String),
    /// Archive could not be unpacked
    Extraction(String),
    /// Local filesystem operation failed
    Filesystem(String),
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallError::Network(msg) => {
                write!(f, "Network error: {}", msg)
            }
            InstallError::Parse(msg) => {
                write!(f, "Malformed response: {}", msg)
            }
            InstallError::UnsupportedPlatform { os, arch } => {
                write!(
                    f,
                    "This OS/architecture ({}/{}) is not supported. \
                     Supporting a new platform means adding a row to the target table \
                     in src/platform, provided Go is built for it.",
                    os, arch
                )
            }
            InstallError::NotFound(msg) => {
                write!(f, "Not found: {}", msg)
            }
            InstallError::Extraction(msg) => {
                write!(f, "Failed to extract archive: {}", msg)
            }
            InstallError::Filesystem(msg) => {
                write!(f, "Filesystem error: {}", msg)
            }
        }
    }
}

impl std::error::Error for InstallError {}
