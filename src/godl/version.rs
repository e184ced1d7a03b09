//! Version parsing and latest-stable resolution.
//!
//! The listing's order is not trusted: versions are parsed and compared
//! numerically, and only stable entries are considered.

use super::types::GoRelease;

/// A parsed Go version tag ("go1.22.0"). Missing components are zero, so
/// "go1.21" orders as 1.21.0. Tags with non-numeric components (rc, beta)
/// do not parse; they are never stable releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GoVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl GoVersion {
    /// Parse a "goMAJOR[.MINOR[.PATCH]]" tag. Returns None for anything
    /// that is not a plain numeric version.
    pub fn parse(tag: &str) -> Option<Self> {
        let rest = tag.strip_prefix("go")?;
        let mut parts = rest.splitn(3, '.');

        let major = numeric(parts.next()?)?;
        let minor = match parts.next() {
            Some(part) => numeric(part)?,
            None => 0,
        };
        let patch = match parts.next() {
            Some(part) => numeric(part)?,
            None => 0,
        };

        Some(Self {
            major,
            minor,
            patch,
        })
    }
}

impl std::fmt::Display for GoVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn numeric(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Find the newest stable release in a listing. Unstable entries and tags
/// that do not parse as plain versions are skipped.
pub fn latest_stable(releases: &[GoRelease]) -> Option<&GoRelease> {
    releases
        .iter()
        .filter(|r| r.stable)
        .filter_map(|r| GoVersion::parse(&r.version).map(|v| (v, r)))
        .max_by_key(|(v, _)| *v)
        .map(|(_, r)| r)
}
