use crate::error::InstallError;
use crate::runtime::Runtime;
use anyhow::Result;
use flate2::read::GzDecoder;
use log::debug;
use std::path::{Component, Path};
use tar::EntryType;

use super::ArchiveExtractor;

/// Extractor for .tar.gz archives
pub struct TarGzExtractor;

impl ArchiveExtractor for TarGzExtractor {
    fn can_handle(&self, archive_path: &Path) -> bool {
        let name = archive_path.to_string_lossy().to_lowercase();
        name.ends_with(".tar.gz") || name.ends_with(".tgz")
    }

    #[tracing::instrument(skip(self, runtime, archive_path, extract_to))]
    fn extract<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
    ) -> Result<()> {
        debug!("Extracting tar.gz archive to {:?}...", extract_to);

        let file = runtime.open(archive_path).map_err(|e| {
            InstallError::Filesystem(format!("failed to open archive {:?}: {}", archive_path, e))
        })?;
        let decoder = GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);

        let entries = archive.entries().map_err(|e| {
            InstallError::Extraction(format!("failed to read {:?}: {}", archive_path, e))
        })?;

        for entry in entries {
            let mut entry = entry.map_err(|e| {
                InstallError::Extraction(format!("corrupt entry in {:?}: {}", archive_path, e))
            })?;

            let entry_path = entry
                .path()
                .map_err(|e| InstallError::Extraction(format!("invalid entry path: {}", e)))?
                .to_path_buf();

            // Entries must stay inside the destination
            if entry_path.is_absolute()
                || entry_path
                    .components()
                    .any(|c| matches!(c, Component::ParentDir))
            {
                debug!("Skipping entry with escaping path: {:?}", entry_path);
                continue;
            }

            let full_path = extract_to.join(&entry_path);

            match entry.header().entry_type() {
                EntryType::Directory => {
                    runtime.create_dir_all(&full_path).map_err(|e| {
                        InstallError::Filesystem(format!(
                            "failed to create directory {:?}: {}",
                            full_path, e
                        ))
                    })?;
                }
                EntryType::Regular => {
                    if let Some(parent) = full_path.parent() {
                        runtime.create_dir_all(parent).map_err(|e| {
                            InstallError::Filesystem(format!(
                                "failed to create directory {:?}: {}",
                                parent, e
                            ))
                        })?;
                    }

                    let mut dest_file = runtime.create_file(&full_path).map_err(|e| {
                        InstallError::Filesystem(format!(
                            "failed to create file {:?}: {}",
                            full_path, e
                        ))
                    })?;
                    std::io::copy(&mut entry, &mut dest_file).map_err(|e| {
                        InstallError::Extraction(format!(
                            "failed to extract {:?}: {}",
                            full_path, e
                        ))
                    })?;

                    #[cfg(unix)]
                    if let Ok(mode) = entry.header().mode()
                        && let Err(e) = runtime.set_permissions(&full_path, mode)
                    {
                        debug!("Failed to set permissions on {:?}: {}", full_path, e);
                    }
                }
                other => {
                    debug!("Skipping {:?} entry: {:?}", other, entry_path);
                }
            }
        }

        debug!("Extraction complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use anyhow::Result;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_archive(path: &Path, files: &[(&str, &str, u32)]) -> Result<()> {
        let file = File::create(path)?;
        let enc = GzEncoder::new(file, Compression::default());
        let mut tar = tar::Builder::new(enc);

        for (name, content, mode) in files {
            let mut header = tar::Header::new_gnu();
            header.set_path(name)?;
            header.set_size(content.len() as u64);
            header.set_mode(*mode);
            header.set_cksum();
            tar.append(&header, content.as_bytes())?;
        }

        tar.finish()?;
        Ok(())
    }

    #[test]
    fn test_can_handle() {
        let extractor = TarGzExtractor;
        assert!(extractor.can_handle(Path::new("go1.22.0.linux-amd64.tar.gz")));
        assert!(extractor.can_handle(Path::new("file.tgz")));
        assert!(!extractor.can_handle(Path::new("go1.22.0.windows-amd64.zip")));
        assert!(!extractor.can_handle(Path::new("file.tar")));
    }

    #[test]
    fn test_extract_preserves_layout() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("test.tar.gz");
        let extract_path = dir.path().join("extracted");
        fs::create_dir(&extract_path)?;

        create_test_archive(
            &archive_path,
            &[
                ("go/VERSION", "go1.22.0", 0o644),
                ("go/bin/go", "fake binary", 0o755),
            ],
        )?;

        let extractor = TarGzExtractor;
        extractor.extract(&RealRuntime, &archive_path, &extract_path)?;

        assert_eq!(
            fs::read_to_string(extract_path.join("go/VERSION"))?,
            "go1.22.0"
        );
        assert_eq!(
            fs::read_to_string(extract_path.join("go/bin/go"))?,
            "fake binary"
        );

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_preserves_executable_bit() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let archive_path = dir.path().join("test.tar.gz");
        let extract_path = dir.path().join("extracted");
        fs::create_dir(&extract_path)?;

        create_test_archive(&archive_path, &[("go/bin/gofmt", "fake", 0o755)])?;

        let extractor = TarGzExtractor;
        extractor.extract(&RealRuntime, &archive_path, &extract_path)?;

        let mode = fs::metadata(extract_path.join("go/bin/gofmt"))?
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);

        Ok(())
    }

    #[test]
    fn test_extract_skips_parent_escaping_entries() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("evil.tar.gz");
        let extract_path = dir.path().join("extracted");
        fs::create_dir(&extract_path)?;

        // Header::set_path refuses "..", so write the name bytes directly
        let file = File::create(&archive_path)?;
        let enc = GzEncoder::new(file, Compression::default());
        let mut tar = tar::Builder::new(enc);
        let content = "should not land";
        let mut header = tar::Header::new_gnu();
        {
            let gnu = header.as_gnu_mut().unwrap();
            let name = b"../escape.txt";
            gnu.name[..name.len()].copy_from_slice(name);
        }
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        tar.append(&header, content.as_bytes())?;
        tar.finish()?;
        drop(tar);

        let extractor = TarGzExtractor;
        extractor.extract(&RealRuntime, &archive_path, &extract_path)?;

        assert!(!dir.path().join("escape.txt").exists());
        assert!(!extract_path.join("escape.txt").exists());

        Ok(())
    }

    #[test]
    fn test_extract_malformed_archive() -> Result<()> {
        let dir = tempdir()?;
        let archive_path = dir.path().join("broken.tar.gz");
        File::create(&archive_path)?.write_all(b"this is not a gzip stream")?;

        let extract_path = dir.path().join("extracted");
        fs::create_dir(&extract_path)?;

        let extractor = TarGzExtractor;
        let err = extractor
            .extract(&RealRuntime, &archive_path, &extract_path)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::Extraction(_))
        ));

        Ok(())
    }

    #[test]
    fn test_extract_missing_archive_is_filesystem_error() {
        let extractor = TarGzExtractor;
        let err = extractor
            .extract(
                &RealRuntime,
                Path::new("/nonexistent/archive.tar.gz"),
                Path::new("/tmp"),
            )
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::Filesystem(_))
        ));
    }
}
