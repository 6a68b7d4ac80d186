//! Launch configuration, templates, and document generation for turning a
//! markdown file into a slideshow.

pub mod config;
pub mod error;
pub mod generate;
pub mod paths;
pub mod template;

pub use config::{LaunchConfig, WindowGeometry};
pub use error::{Error, Result};
pub use generate::{DocumentGenerator, GeneratedDocument};
pub use paths::AssetCache;
pub use template::{PlaceholderPolicy, TemplateRenderer, DEFAULT_TEMPLATE, PLACEHOLDER};
