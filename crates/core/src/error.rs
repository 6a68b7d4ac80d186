//! Error types for slideshow preparation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing a slideshow for display.
#[derive(Error, Debug)]
pub enum Error {
    /// The bundled assets could not be unpacked into the cache.
    #[error("Failed to extract {}: {reason}", archive.display())]
    ExtractionError { archive: PathBuf, reason: String },

    /// A source or template could not be read, or the document could not be written.
    #[error("Failed to generate document ({}): {reason}", path.display())]
    GenerationError { path: PathBuf, reason: String },

    /// The template violates the configured placeholder policy.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// No usable markdown file was supplied on the command line.
    #[error("No markdown file supplied")]
    NoInputError,
}

impl Error {
    pub(crate) fn generation(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::GenerationError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build an extraction error for the given archive.
    pub fn extraction(archive: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ExtractionError {
            archive: archive.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the user simply gave us nothing to show.
    pub fn is_no_input(&self) -> bool {
        matches!(self, Self::NoInputError)
    }
}
