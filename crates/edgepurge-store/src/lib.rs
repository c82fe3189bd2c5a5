//! edgepurge Store - manifest persistence
//!
//! Reads the previous run's manifest and writes the new one. The manifest is
//! plain text, one `"<digest>  <relative_path>"` record per line.

pub mod errors;
pub mod manifest;

pub use manifest::{load_manifest, write_manifest};
