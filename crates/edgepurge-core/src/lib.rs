//! edgepurge Core - content fingerprinting and change detection
//!
//! This crate provides the pure building blocks of the purge pipeline:
//! - Content fingerprinting of a publish directory (SHA256 per file)
//! - Change detection against a previous manifest line-set
//! - Public URL construction with URL path quoting
//! - The structured error facility shared by every edgepurge crate
//! - The structured logging facility (`tracing`)
//!
//! Persistence lives in `edgepurge-store`, purge requests and orchestration
//! in `edgepurge-engine`.

pub mod diff;
pub mod errors;
pub mod fingerprint;
pub mod logging_facility;
pub mod urls;

// Re-export commonly used types
pub use diff::{all_paths, diff, ChangeSet};
pub use errors::{EdgeError, EdgeErrorKind, Result};
pub use fingerprint::{fingerprint_tree, FileFingerprint, FingerprintSet};
pub use urls::{build_urls, encode_path};
