//! Change detection between the current fingerprints and a previous manifest.
//!
//! The core entry point is [`diff`], which accepts the current
//! `FingerprintSet` and the previous manifest's line-set and produces the
//! sorted list of relative paths that need purging.

pub mod engine;

pub use engine::{all_paths, diff};

/// Sorted relative paths selected for purging.
pub type ChangeSet = Vec<String>;
