//! Opens the presentation window once the application is ready.

use slidev_bundle::{ArchiveMaterializer, LaunchSequence, PreparedPresentation};
use slidev_core::paths::{APP_NAME, ASSET_ARCHIVE_NAME};
use slidev_core::{AssetCache, DocumentGenerator, LaunchConfig, PlaceholderPolicy, DEFAULT_TEMPLATE};
use std::path::PathBuf;
use tauri::{App, Manager, Url, WebviewUrl, WebviewWindowBuilder};

/// Options that only affect how assets and templates are handled.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Bundled asset archive; defaults to the one in the resource directory.
    pub assets: Option<PathBuf>,
    pub refresh_assets: bool,
    pub policy: PlaceholderPolicy,
}

/// Prepare the document and open a window on it.
///
/// Nothing is opened unless the document was written successfully.
pub fn open_presentation(
    app: &App,
    config: &LaunchConfig,
    options: &LaunchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let prepared = prepare(app, config, options)?;
    let url = Url::parse(&prepared.url)?;

    let geometry = config.window;
    WebviewWindowBuilder::new(app, "main", WebviewUrl::External(url))
        .title(APP_NAME)
        .inner_size(geometry.width as f64, geometry.height as f64)
        .position(geometry.x as f64, geometry.y as f64)
        .build()?;

    log::info!("Opened {}", prepared.document.display());
    Ok(())
}

fn prepare(
    app: &App,
    config: &LaunchConfig,
    options: &LaunchOptions,
) -> Result<PreparedPresentation, Box<dyn std::error::Error>> {
    let cache = AssetCache::new(app.path().app_cache_dir()?);
    let archive = match &options.assets {
        Some(path) => path.clone(),
        None => app
            .path()
            .resource_dir()?
            .join("assets")
            .join(ASSET_ARCHIVE_NAME),
    };

    let sequence = LaunchSequence::new(
        cache,
        ArchiveMaterializer::new(archive).with_refresh(options.refresh_assets),
        DocumentGenerator::new(DEFAULT_TEMPLATE).with_policy(options.policy),
    );

    Ok(sequence.prepare(config)?)
}
