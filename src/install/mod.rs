//! The install-latest flow.
//!
//! Linear sequence: detect platform, map it to a release target, resolve the
//! newest stable version, download the matching archive, extract it, and
//! swap it into the install root. Every failure is fatal; a failure after
//! the old root has been moved aside leaves the root indeterminate (there is
//! no rollback).

mod config;

pub use config::Config;

use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::archive::ArchiveExtractor;
use crate::download;
use crate::error::InstallError;
use crate::godl::{GetVersions, GoFile, latest_stable};
use crate::platform::{GoTarget, PlatformDetector};
use crate::runtime::Runtime;

/// Default install destination, matching the upstream convention.
pub const DEFAULT_INSTALL_ROOT: &str = "/usr/local/go";

/// Environment variable naming the install destination.
pub const GOROOT_ENV: &str = "GOROOT";

/// Resolve the install root: explicit override, then the GOROOT environment
/// variable, then the default.
pub fn resolve_install_root<R: Runtime>(runtime: &R, flag: Option<PathBuf>) -> PathBuf {
    if let Some(root) = flag {
        return root;
    }
    if let Ok(root) = runtime.env_var(GOROOT_ENV)
        && !root.is_empty()
    {
        return PathBuf::from(root);
    }
    PathBuf::from(DEFAULT_INSTALL_ROOT)
}

/// Install the latest stable Go release for the local platform, replacing
/// the entire contents of the install root.
#[tracing::instrument(skip(runtime, config))]
pub async fn install<R, G, E, P>(runtime: &R, config: &Config<G, E, P>) -> Result<()>
where
    R: Runtime + 'static,
    G: GetVersions,
    E: ArchiveExtractor,
    P: PlatformDetector,
{
    let platform = config.detector.detect();
    let target = GoTarget::from_platform(&platform)?;
    info!(
        "Local platform {}/{} maps to {}",
        platform.os,
        platform.arch,
        target.artifact_suffix()
    );

    let releases = config.godl.get_versions().await?;
    let release = latest_stable(&releases).ok_or_else(|| {
        InstallError::NotFound("no stable Go release in the version listing".to_string())
    })?;
    info!("Latest stable Go release: {}", release.version);

    let file = release
        .files
        .iter()
        .find(|f| f.kind == "archive" && f.os == target.os && f.arch == target.arch)
        .ok_or_else(|| {
            InstallError::NotFound(format!(
                "no {} archive for {}",
                target.artifact_suffix(),
                release.version
            ))
        })?;

    let root = resolve_install_root(runtime, config.install_root.clone());
    install_file(runtime, config, file, &root).await
}

/// Download one listed archive and swap it into the install root.
#[tracing::instrument(skip(runtime, config, file, root))]
async fn install_file<R, G, E, P>(
    runtime: &R,
    config: &Config<G, E, P>,
    file: &GoFile,
    root: &Path,
) -> Result<()>
where
    R: Runtime + 'static,
    G: GetVersions,
    E: ArchiveExtractor,
    P: PlatformDetector,
{
    info!("Installing {} to {:?}", file.version, root);

    let root_name = root
        .file_name()
        .ok_or_else(|| {
            InstallError::Filesystem(format!("install root {:?} has no directory name", root))
        })?
        .to_string_lossy()
        .to_string();
    let parent = root.parent().ok_or_else(|| {
        InstallError::Filesystem(format!("install root {:?} has no parent directory", root))
    })?;

    let archive_path = runtime.temp_dir().join(&file.filename);
    download::download_file(
        runtime,
        &config.godl.archive_url(&file.filename),
        &archive_path,
        &config.http,
    )
    .await?;

    if !config.extractor.can_handle(&archive_path) {
        return Err(
            InstallError::Extraction(format!("unsupported archive format: {}", file.filename))
                .into(),
        );
    }

    runtime
        .create_dir_all(parent)
        .map_err(|e| filesystem_error(runtime, "failed to create install root parent", e))?;

    // Stage next to the install root so the final swap is a same-filesystem
    // rename rather than a copy out of /tmp.
    let staging = parent.join(format!(".{}.unpack", root_name));
    if runtime.exists(&staging) {
        runtime
            .remove_dir_all(&staging)
            .map_err(|e| filesystem_error(runtime, "failed to clear staging directory", e))?;
    }
    runtime
        .create_dir_all(&staging)
        .map_err(|e| filesystem_error(runtime, "failed to create staging directory", e))?;

    config.extractor.extract(runtime, &archive_path, &staging)?;

    let extracted = staging.join("go");
    if !runtime.is_dir(&extracted) {
        return Err(InstallError::Extraction(format!(
            "{} did not contain a top-level go/ directory",
            file.filename
        ))
        .into());
    }

    let old = parent.join(format!(".{}.old", root_name));
    if runtime.exists(&old) {
        runtime
            .remove_dir_all(&old)
            .map_err(|e| filesystem_error(runtime, "failed to remove stale old installation", e))?;
    }

    if runtime.exists(root) {
        runtime
            .rename(root, &old)
            .map_err(|e| filesystem_error(runtime, "failed to move old installation aside", e))?;
    } else {
        info!("No existing Go installation at {:?}, ignoring", root);
    }

    runtime
        .rename(&extracted, root)
        .map_err(|e| filesystem_error(runtime, "failed to move new installation into place", e))?;

    // Best-effort cleanup; the install itself already succeeded
    if let Err(e) = runtime.remove_dir_all(&staging) {
        warn!("Failed to remove staging directory {:?}: {}", staging, e);
    }
    if runtime.exists(&old)
        && let Err(e) = runtime.remove_dir_all(&old)
    {
        warn!("Failed to remove old installation {:?}: {}", old, e);
    }
    if let Err(e) = runtime.remove_file(&archive_path) {
        warn!("Failed to remove downloaded archive {:?}: {}", archive_path, e);
    }

    info!("Successfully installed {}.", file.version);
    Ok(())
}

fn filesystem_error<R: Runtime>(runtime: &R, context: &str, err: anyhow::Error) -> anyhow::Error {
    let mut msg = format!("{}: {}", context, err);
    if !runtime.is_privileged() {
        msg.push_str(" (maybe you need to be root?)");
    }
    InstallError::Filesystem(msg).into()
}
