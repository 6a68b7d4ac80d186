//! Desktop slideshow viewer for markdown files using Tauri.

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

mod launch;

use clap::Parser;
use launch::LaunchOptions;
use slidev_core::{LaunchConfig, PlaceholderPolicy, WindowGeometry};
use std::path::PathBuf;

/// Present a markdown file as a reveal.js slideshow.
#[derive(Parser, Debug)]
#[command(name = "slidev")]
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

    /// Bundled asset archive or directory
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Unpack the assets again even if they are already cached
    #[arg(long)]
    refresh_assets: bool,

    /// Fail unless the template has exactly one placeholder
    #[arg(long)]
    strict_template: bool,
}

impl Args {
    fn options(&self) -> LaunchOptions {
        LaunchOptions {
            assets: self.assets.clone(),
            refresh_assets: self.refresh_assets,
            policy: if self.strict_template {
                PlaceholderPolicy::Strict
            } else {
                PlaceholderPolicy::Lenient
            },
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let geometry = WindowGeometry {
        width: args.width,
        height: args.height,
        x: args.x,
        y: args.y,
    };

    let config = match LaunchConfig::resolve(args.file.as_deref(), args.tmpl.as_deref(), geometry)
    {
        Ok(config) => config,
        Err(e) if e.is_no_input() => {
            log::info!("no files.");
            return;
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let options = args.options();

    let result = tauri::Builder::default()
        .setup(move |app| {
            if let Err(e) = launch::open_presentation(app, &config, &options) {
                log::error!("Could not open {}: {}", config.source_file.display(), e);
                app.handle().exit(1);
            }
            Ok(())
        })
        .run(tauri::generate_context!());

    if let Err(e) = result {
        log::error!("error while running tauri application: {}", e);
        std::process::exit(1);
    }
}
