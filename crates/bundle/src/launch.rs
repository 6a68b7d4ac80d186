//! The launch sequence shared by the desktop and command-line frontends.

use crate::materialize::{ArchiveMaterializer, Materialized};
use serde::Serialize;
use slidev_core::paths::file_url;
use slidev_core::{AssetCache, DocumentGenerator, GeneratedDocument, LaunchConfig, Result};
use std::path::PathBuf;

/// A slideshow document that is on disk and ready to be shown.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedPresentation {
    /// Absolute path of the generated document.
    pub document: PathBuf,

    /// `file://` URL of the generated document.
    pub url: String,

    /// Directory holding the unpacked assets.
    pub assets: PathBuf,

    /// Whether this launch unpacked the assets.
    pub extracted: bool,

    /// Placeholders found in the template that was used.
    pub placeholder_count: usize,
}

/// Runs materialization then generation, in that order.
#[derive(Debug, Clone)]
pub struct LaunchSequence {
    cache: AssetCache,
    materializer: ArchiveMaterializer,
    generator: DocumentGenerator,
}

impl LaunchSequence {
    pub fn new(
        cache: AssetCache,
        materializer: ArchiveMaterializer,
        generator: DocumentGenerator,
    ) -> Self {
        Self {
            cache,
            materializer,
            generator,
        }
    }

    /// Produce the document for `config`.
    ///
    /// Any error means the document must not be shown: extraction failures stop
    /// the sequence before generation runs.
    pub fn prepare(&self, config: &LaunchConfig) -> Result<PreparedPresentation> {
        let assets = self.cache.unpacked_dir();
        let materialized = self.materializer.materialize(&assets)?;

        let output = self.cache.document_path();
        let GeneratedDocument {
            path,
            placeholder_count,
            ..
        } = self
            .generator
            .generate(&config.source_file, config.template.as_deref(), &output)?;

        let url = file_url(&path)?.to_string();
        log::debug!("Presentation ready at {}", url);

        Ok(PreparedPresentation {
            document: path,
            url,
            assets,
            extracted: matches!(materialized, Materialized::Extracted { .. }),
            placeholder_count,
        })
    }
}
