//! Platform detection and release-target mapping
//!
//! Detects the local OS and architecture and maps the pair onto the naming
//! convention used by the Go release artifacts (`linux-amd64` etc.) via a
//! static table. Platforms without a table entry are a hard failure.

use anyhow::Result;

use crate::error::InstallError;

/// Local platform information
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Detect the current platform
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            arch: Self::detect_arch(),
        }
    }

    fn detect_os() -> String {
        #[cfg(target_os = "macos")]
        {
            "darwin".to_string()
        }
        #[cfg(target_os = "linux")]
        {
            "linux".to_string()
        }
        #[cfg(target_os = "windows")]
        {
            "windows".to_string()
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            std::env::consts::OS.to_string()
        }
    }

    fn detect_arch() -> String {
        #[cfg(target_arch = "x86_64")]
        {
            "x86_64".to_string()
        }
        #[cfg(target_arch = "aarch64")]
        {
            "aarch64".to_string()
        }
        #[cfg(target_arch = "x86")]
        {
            "i686".to_string()
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "x86")))]
        {
            std::env::consts::ARCH.to_string()
        }
    }
}

/// Trait for platform detection (useful for testing)
pub trait PlatformDetector: Send + Sync {
    fn detect(&self) -> Platform;
}

/// Default platform detector using compile-time detection
pub struct DefaultPlatformDetector;

impl PlatformDetector for DefaultPlatformDetector {
    fn detect(&self) -> Platform {
        Platform::detect()
    }
}

/// Static mapping from local (os, arch) to Go's release naming.
/// Each row is (local os, local arch, go os, go arch). Extending platform
/// support means adding rows here, provided upstream publishes archives
/// for the target.
const TARGETS: &[(&str, &str, &str, &str)] = &[
    ("linux", "x86_64", "linux", "amd64"),
    ("linux", "aarch64", "linux", "arm64"),
];

/// An OS/architecture pair in the upstream release naming
#[derive(Debug, Clone, PartialEq)]
pub struct GoTarget {
    pub os: String,
    pub arch: String,
}

impl GoTarget {
    /// Look up the release target for a local platform.
    /// Fails with [`InstallError::UnsupportedPlatform`] when the platform
    /// has no table entry.
    pub fn from_platform(platform: &Platform) -> Result<Self> {
        TARGETS
            .iter()
            .find(|(os, arch, _, _)| *os == platform.os && *arch == platform.arch)
            .map(|(_, _, go_os, go_arch)| Self {
                os: go_os.to_string(),
                arch: go_arch.to_string(),
            })
            .ok_or_else(|| {
                InstallError::UnsupportedPlatform {
                    os: platform.os.clone(),
                    arch: platform.arch.clone(),
                }
                .into()
            })
    }

    /// The suffix used in release artifact names, e.g. "linux-amd64"
    pub fn artifact_suffix(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}
