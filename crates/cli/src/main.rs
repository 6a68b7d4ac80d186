//! Prepare a markdown slideshow without opening a window.
//!
//! Runs the same unpack-and-generate sequence as the desktop app and prints
//! where the document ended up, so it can be opened in any browser.

use anyhow::{Context, Result};
use clap::Parser;
use slidev_bundle::{ArchiveMaterializer, LaunchSequence};
use slidev_core::paths::default_archive_path;
use slidev_core::{
    AssetCache, DocumentGenerator, LaunchConfig, PlaceholderPolicy, WindowGeometry,
    DEFAULT_TEMPLATE,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Turn a markdown file into a reveal.js slideshow document.
#[derive(Parser, Debug)]
#[command(name = "slidev-render")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markdown file to load
    file: Option<String>,

    /// Template index.html (default: built-in reveal.js template)
    #[arg(short, long)]
    tmpl: Option<PathBuf>,

    /// Window width
    #[arg(short, long, default_value = "800")]
    width: u32,

    /// Window height
    #[arg(short = 'H', long, default_value = "600")]
    height: u32,

    /// Window x position
    #[arg(short, default_value = "0", allow_negative_numbers = true)]
    x: i32,

    /// Window y position
    #[arg(short, default_value = "0", allow_negative_numbers = true)]
    y: i32,

    /// Bundled asset archive or directory (default: assets/ next to the binary)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Cache directory (default: platform cache dir)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Unpack the assets again even if they are already cached
    #[arg(long)]
    refresh_assets: bool,

    /// Fail unless the template has exactly one placeholder
    #[arg(long)]
    strict_template: bool,

    /// Print a JSON description instead of the document URL
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            width: self.width,
            height: self.height,
            x: self.x,
            y: self.y,
        }
    }

    fn policy(&self) -> PlaceholderPolicy {
        if self.strict_template {
            PlaceholderPolicy::Strict
        } else {
            PlaceholderPolicy::Lenient
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = match LaunchConfig::resolve(
        args.file.as_deref(),
        args.tmpl.as_deref(),
        args.geometry(),
    ) {
        Ok(config) => config,
        Err(e) if e.is_no_input() => {
            eprintln!("no files.");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &LaunchConfig) -> Result<()> {
    let cache = match &args.cache_dir {
        Some(dir) => AssetCache::new(
            std::path::absolute(dir)
                .with_context(|| format!("Invalid cache directory {}", dir.display()))?,
        ),
        None => AssetCache::platform().context("Could not determine the cache directory")?,
    };

    let archive = match &args.assets {
        Some(path) => path.clone(),
        None => default_archive_path().context("Could not locate the bundled assets")?,
    };

    if args.verbose {
        eprintln!("Processing: {}", config.source_file.display());
    }

    let sequence = LaunchSequence::new(
        cache,
        ArchiveMaterializer::new(archive).with_refresh(args.refresh_assets),
        DocumentGenerator::new(DEFAULT_TEMPLATE).with_policy(args.policy()),
    );
    let prepared = sequence.prepare(config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prepared)?);
    } else {
        println!("{}", prepared.url);
    }

    if args.verbose {
        eprintln!("Written to: {}", prepared.document.display());
    }

    Ok(())
}
