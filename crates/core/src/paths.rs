//! Cache layout for unpacked presentation assets.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Name used to key the cache directory and bundled resources.
pub const APP_NAME: &str = "slidev";

/// File name of the bundled asset archive.
pub const ASSET_ARCHIVE_NAME: &str = "slidev-assets.zip";

/// Where the generated document lives, relative to the unpacked directory.
const DOCUMENT_PATH: [&str; 2] = ["reveal.js", "index.html"];

/// Locations inside the per-application cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    /// Use an explicit cache root (already keyed by application).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use the platform cache directory, e.g. `~/.cache/slidev` on Linux.
    pub fn platform() -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::new(dir.join(APP_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the bundled archive is materialized into.
    pub fn unpacked_dir(&self) -> PathBuf {
        self.root.join("unpacked")
    }

    /// Fixed location of the generated slideshow document.
    pub fn document_path(&self) -> PathBuf {
        DOCUMENT_PATH
            .iter()
            .fold(self.unpacked_dir(), |path, part| path.join(part))
    }
}

/// Default location of the bundled archive: `assets/` next to the executable.
pub fn default_archive_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent()
        .map(|dir| dir.join("assets").join(ASSET_ARCHIVE_NAME))
}

/// Build the `file://` URL a viewer is pointed at.
pub fn file_url(path: &Path) -> Result<Url> {
    Url::from_file_path(path)
        .map_err(|_| Error::generation(path, "path cannot be expressed as a file URL"))
}
