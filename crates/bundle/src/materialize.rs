//! Materializes the bundled presentation assets into the cache.
//!
//! The bundle is either a zip archive or an already-unpacked directory.
//! Entries are written into a staging directory beside the target and moved
//! into place only once everything has been written.

use slidev_core::{Error, Result};
use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

/// What [`ArchiveMaterializer::materialize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// The target did not exist and was populated with `entries` files.
    Extracted { entries: usize },
    /// The target already existed; nothing was touched.
    AlreadyPresent,
}

/// Unpacks a bundled asset source into a writable directory, once.
#[derive(Debug, Clone)]
pub struct ArchiveMaterializer {
    source: PathBuf,
    refresh: bool,
}

impl ArchiveMaterializer {
    /// Create a materializer for the archive (or directory) at `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            refresh: false,
        }
    }

    /// Replace an existing target instead of trusting it.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Ensure `target` holds the unpacked bundle.
    ///
    /// An existing `target` is left alone unless refresh was requested.
    pub fn materialize(&self, target: &Path) -> Result<Materialized> {
        if target.exists() {
            if !self.refresh {
                log::debug!("Assets already unpacked at {}", target.display());
                return Ok(Materialized::AlreadyPresent);
            }
            log::info!("Refreshing unpacked assets at {}", target.display());
            fs::remove_dir_all(target).map_err(|e| {
                self.error(format!("failed to remove {}: {}", target.display(), e))
            })?;
        }

        let staging = staging_dir(target);
        if staging.exists() {
            discard(&staging);
        }

        let entries = match self.unpack_into(&staging) {
            Ok(entries) => entries,
            Err(e) => {
                discard(&staging);
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&staging, target) {
            discard(&staging);
            if target.is_dir() {
                log::warn!(
                    "{} appeared while extracting; keeping the existing copy",
                    target.display()
                );
                return Ok(Materialized::AlreadyPresent);
            }
            return Err(self.error(format!("failed to move into {}: {}", target.display(), e)));
        }

        log::info!(
            "Extracted {} entries from {} to {}",
            entries,
            self.source.display(),
            target.display()
        );
        Ok(Materialized::Extracted { entries })
    }

    fn unpack_into(&self, staging: &Path) -> Result<usize> {
        if let Some(parent) = staging.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                self.error(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::create_dir(staging)
            .map_err(|e| self.error(format!("failed to create {}: {}", staging.display(), e)))?;

        if self.source.is_dir() {
            self.copy_tree(staging)
        } else {
            let file = fs::File::open(&self.source)
                .map_err(|e| self.error(format!("failed to open archive: {}", e)))?;
            self.extract_zip(file, staging)
        }
    }

    /// Extract every zip entry below `dest`, preserving relative paths.
    fn extract_zip<R: Read + Seek>(&self, reader: R, dest: &Path) -> Result<usize> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| self.error(format!("failed to open ZIP: {}", e)))?;
        let mut written = 0;

        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| self.error(format!("failed to read entry {}: {}", i, e)))?;

            let outpath = match entry.enclosed_name() {
                Some(path) => dest.join(path),
                None => {
                    log::warn!("Skipping unsafe archive entry '{}'", entry.name());
                    continue;
                }
            };

            if entry.is_dir() {
                self.create_dir(&outpath)?;
                continue;
            }

            if let Some(parent) = outpath.parent() {
                self.create_dir(parent)?;
            }
            let mut outfile = fs::File::create(&outpath)
                .map_err(|e| self.error(format!("failed to create {}: {}", outpath.display(), e)))?;
            io::copy(&mut entry, &mut outfile)
                .map_err(|e| self.error(format!("failed to write {}: {}", outpath.display(), e)))?;
            written += 1;
        }

        Ok(written)
    }

    /// Copy an unpacked asset directory below `dest`.
    fn copy_tree(&self, dest: &Path) -> Result<usize> {
        let mut written = 0;

        for entry in WalkDir::new(&self.source).min_depth(1) {
            let entry = entry.map_err(|e| self.error(e))?;
            let relative = entry
                .path()
                .strip_prefix(&self.source)
                .map_err(|e| self.error(e))?;
            let outpath = dest.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir(&outpath)?;
            } else {
                if let Some(parent) = outpath.parent() {
                    self.create_dir(parent)?;
                }
                fs::copy(entry.path(), &outpath).map_err(|e| {
                    self.error(format!("failed to copy {}: {}", entry.path().display(), e))
                })?;
                written += 1;
            }
        }

        Ok(written)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .map_err(|e| self.error(format!("failed to create {}: {}", path.display(), e)))
    }

    fn error(&self, reason: impl ToString) -> Error {
        Error::extraction(&self.source, reason)
    }
}

/// Remove a staging directory, logging rather than failing.
fn discard(staging: &Path) {
    match fs::remove_dir_all(staging) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::debug!("Could not remove {}: {}", staging.display(), e),
    }
}

/// Sibling directory used while extracting into `target`.
fn staging_dir(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unpacked".to_string());
    target.with_file_name(format!("{}.partial-{}", name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn build_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = ZipWriter::new(fs::File::create(path).unwrap());
        for (name, content) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, FileOptions::default()).unwrap();
            } else {
                writer.start_file(*name, FileOptions::default()).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap();
    }

    fn reveal_zip(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("assets.zip");
        build_zip(
            &path,
            &[
                ("reveal.js/", ""),
                ("reveal.js/dist/reveal.js", "/* reveal */"),
                ("reveal.js/dist/theme/black.css", "body {}"),
                ("reveal.js/plugin/markdown/markdown.js", "/* md */"),
            ],
        );
        path
    }

    #[test]
    fn test_extracts_nested_entries() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("cache").join("unpacked");

        let result = ArchiveMaterializer::new(reveal_zip(&dir))
            .materialize(&target)
            .unwrap();

        assert_eq!(result, Materialized::Extracted { entries: 3 });
        assert_eq!(
            fs::read_to_string(target.join("reveal.js/dist/theme/black.css")).unwrap(),
            "body {}"
        );
        assert!(target.join("reveal.js/plugin/markdown/markdown.js").is_file());
    }

    #[test]
    fn test_second_run_is_noop() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("unpacked");
        let materializer = ArchiveMaterializer::new(reveal_zip(&dir));

        materializer.materialize(&target).unwrap();
        fs::write(target.join("reveal.js/index.html"), "generated").unwrap();

        assert_eq!(
            materializer.materialize(&target).unwrap(),
            Materialized::AlreadyPresent
        );
        assert_eq!(
            fs::read_to_string(target.join("reveal.js/index.html")).unwrap(),
            "generated"
        );
        assert_eq!(
            fs::read_to_string(target.join("reveal.js/dist/reveal.js")).unwrap(),
            "/* reveal */"
        );
    }

    #[test]
    fn test_existing_target_skips_even_a_broken_archive() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("unpacked");
        fs::create_dir(&target).unwrap();

        let result = ArchiveMaterializer::new(dir.path().join("missing.zip"))
            .materialize(&target)
            .unwrap();

        assert_eq!(result, Materialized::AlreadyPresent);
    }

    #[test]
    fn test_corrupt_archive_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();
        let target = dir.path().join("unpacked");

        let err = ArchiveMaterializer::new(&archive)
            .materialize(&target)
            .unwrap_err();

        assert!(matches!(err, Error::ExtractionError { .. }));
        assert!(!target.exists());
        assert!(!staging_dir(&target).exists());
    }

    #[test]
    fn test_unwritable_target_is_extraction_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("cache");
        fs::write(&blocker, "not a directory").unwrap();
        let target = blocker.join("unpacked");

        let err = ArchiveMaterializer::new(reveal_zip(&dir))
            .materialize(&target)
            .unwrap_err();

        assert!(matches!(err, Error::ExtractionError { .. }));
        assert!(!staging_dir(&target).exists());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn test_missing_archive_is_extraction_error() {
        let dir = TempDir::new().unwrap();
        let err = ArchiveMaterializer::new(dir.path().join("missing.zip"))
            .materialize(&dir.path().join("unpacked"))
            .unwrap_err();

        assert!(matches!(err, Error::ExtractionError { .. }));
    }

    #[test]
    fn test_unsafe_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("evil.zip");
        build_zip(&archive, &[("../escape.txt", "x"), ("ok.txt", "fine")]);
        let target = dir.path().join("nested").join("unpacked");

        let result = ArchiveMaterializer::new(&archive)
            .materialize(&target)
            .unwrap();

        assert_eq!(result, Materialized::Extracted { entries: 1 });
        assert!(target.join("ok.txt").is_file());
        assert!(!dir.path().join("nested").join("escape.txt").exists());
    }

    #[test]
    fn test_copies_directory_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("bundle");
        fs::create_dir_all(source.join("reveal.js/dist")).unwrap();
        fs::write(source.join("reveal.js/dist/reveal.css"), ".reveal {}").unwrap();
        fs::create_dir_all(source.join("reveal.js/empty")).unwrap();
        let target = dir.path().join("unpacked");

        let result = ArchiveMaterializer::new(&source)
            .materialize(&target)
            .unwrap();

        assert_eq!(result, Materialized::Extracted { entries: 1 });
        assert_eq!(
            fs::read_to_string(target.join("reveal.js/dist/reveal.css")).unwrap(),
            ".reveal {}"
        );
        assert!(target.join("reveal.js/empty").is_dir());
    }

    #[test]
    fn test_refresh_replaces_stale_assets() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("unpacked");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("stale.css"), "old").unwrap();

        let result = ArchiveMaterializer::new(reveal_zip(&dir))
            .with_refresh(true)
            .materialize(&target)
            .unwrap();

        assert_eq!(result, Materialized::Extracted { entries: 3 });
        assert!(!target.join("stale.css").exists());
        assert!(target.join("reveal.js/dist/reveal.js").is_file());
    }
}
