//! Document generation: markdown in, slideshow HTML out.

use crate::error::{Error, Result};
use crate::template::{PlaceholderPolicy, TemplateRenderer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A document written to disk by [`DocumentGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Where the document was written.
    pub path: PathBuf,

    /// Size of the written document in bytes.
    pub len: usize,

    /// Placeholders found in the template that was used.
    pub placeholder_count: usize,
}

/// Reads a markdown source and a template and writes the combined document.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    default_template: String,
    renderer: TemplateRenderer,
}

impl DocumentGenerator {
    /// Create a generator that falls back to `default_template` when no
    /// template file is given.
    pub fn new(default_template: impl Into<String>) -> Self {
        Self {
            default_template: default_template.into(),
            renderer: TemplateRenderer::new(),
        }
    }

    /// Use a different placeholder policy.
    pub fn with_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.renderer = self.renderer.with_policy(policy);
        self
    }

    /// Generate the document at `output`.
    ///
    /// Both inputs are read before anything is written, so a missing source or
    /// template leaves `output` untouched.
    pub fn generate(
        &self,
        source: &Path,
        template: Option<&Path>,
        output: &Path,
    ) -> Result<GeneratedDocument> {
        log::debug!("Reading markdown from {}", source.display());
        let markdown = read_text(source)?;

        let template_text = match template {
            Some(path) => {
                log::debug!("Reading template from {}", path.display());
                read_text(path)?
            }
            None => self.default_template.clone(),
        };

        let substitution = self.renderer.render(&template_text, &markdown)?;

        write_atomic(output, &substitution.text)?;
        log::info!("Generated {}", output.display());

        Ok(GeneratedDocument {
            path: output.to_path_buf(),
            len: substitution.text.len(),
            placeholder_count: substitution.placeholder_count,
        })
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::generation(path, e))
}

/// Write through `<path>.slidev.tmp` and rename over the destination.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::generation(parent, e))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".slidev.tmp");
    let tmp = PathBuf::from(tmp_name);
    let written = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(Error::generation(path, e));
    }

    Ok(())
}
