//! Launch configuration resolved once at startup.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Matches arguments that look like a flag rather than a file (`-v`, `--tmpl`).
static FLAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{1,2}\w+$").unwrap());

/// Placement and size of the presentation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            x: 0,
            y: 0,
        }
    }
}

/// Everything a launch needs to know, fixed before any work starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Absolute path of the markdown source.
    pub source_file: PathBuf,

    /// Absolute path of a user template. `None` selects the built-in one.
    pub template: Option<PathBuf>,

    /// Window placement.
    pub window: WindowGeometry,
}

impl LaunchConfig {
    /// Resolve raw command-line values into a configuration.
    ///
    /// Fails with [`Error::NoInputError`] when the source argument is missing,
    /// empty, or looks like a flag. Relative paths are made absolute against
    /// the current directory.
    pub fn resolve(
        source: Option<&str>,
        template: Option<&Path>,
        window: WindowGeometry,
    ) -> Result<Self> {
        let source = usable_source(source).ok_or(Error::NoInputError)?;

        let source_file = absolutize(Path::new(source))?;
        let template = template
            .filter(|t| !t.as_os_str().is_empty())
            .map(absolutize)
            .transpose()?;

        Ok(Self {
            source_file,
            template,
            window,
        })
    }
}

/// Return the argument if it can name a markdown file.
fn usable_source(arg: Option<&str>) -> Option<&str> {
    arg.filter(|s| !s.trim().is_empty())
        .filter(|s| !FLAG_REGEX.is_match(s))
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::generation(path, e))
}
