//! Bundled asset materialization and launch sequencing.
//!
//! The presentation assets ship as a zip archive that is unpacked into the
//! user's cache on first launch; every launch then writes the slideshow
//! document into that tree.

pub mod launch;
pub mod materialize;

pub use launch::{LaunchSequence, PreparedPresentation};
pub use materialize::{ArchiveMaterializer, Materialized};
