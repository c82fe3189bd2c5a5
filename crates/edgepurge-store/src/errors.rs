//! Error handling for edgepurge-store
//!
//! Wraps edgepurge-core EdgeError with manifest-specific helpers

use edgepurge_core::errors::{io_error, EdgeError};
use std::path::Path;

/// Result type alias using EdgeError
pub use edgepurge_core::errors::Result;

/// Create a manifest read error
pub fn manifest_read_error(path: &Path, err: std::io::Error) -> EdgeError {
    io_error("load_manifest", path, err)
}

/// Create a manifest write error
pub fn manifest_write_error(path: &Path, err: std::io::Error) -> EdgeError {
    io_error("write_manifest", path, err)
}
