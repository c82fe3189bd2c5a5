//! Sync orchestration: hash the publish tree, purge what changed, save the
//! new manifest.
//!
//! ## Pipeline (in order):
//! 1. Precondition: publish directory exists and is a directory (hard stop, no I/O)
//! 2. Validate base URL
//! 3. Fingerprint the tree
//! 4. Load the previous manifest
//! 5. Decide full vs incremental purge, compute the changed paths
//! 6. Build public URLs
//! 7. dry_run short-circuit (no purge, no manifest write)
//! 8. Purge in batches (failure aborts, old manifest stays in place)
//! 9. Write the new manifest

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use edgepurge_core::diff::{all_paths, diff};
use edgepurge_core::errors::{invalid_input, precondition, Result};
use edgepurge_core::fingerprint::fingerprint_tree;
use edgepurge_core::urls::build_urls;
use edgepurge_core::{log_op_end, log_op_error, log_op_start};
use edgepurge_core_types::schema::EVENT_STAGE;
use edgepurge_store::{load_manifest, write_manifest};
use url::Url;

use crate::purge::{PurgeClient, PurgeTransport, DEFAULT_THROTTLE};

pub const DEFAULT_PREV_MANIFEST: &str = "public_manifest";
pub const DEFAULT_SAVE_MANIFEST: &str = "public_manifest_new";
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(30) {
    Some(size) => size,
    None => panic!("default batch size must be non-zero"),
};

/// Options for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Root of the published static files
    pub public_dir: PathBuf,
    /// Public URL the root is served from
    pub base_url: String,
    pub zone_id: String,
    /// Manifest from the last successful run
    pub prev_manifest: PathBuf,
    /// Where the new manifest is written after purging
    pub save_manifest: PathBuf,
    pub batch_size: NonZeroUsize,
    /// Purge every file regardless of the previous manifest
    pub full_purge: bool,
    /// Compute URLs only; no purge, no manifest write
    pub dry_run: bool,
    /// Pause between purge batches
    pub throttle: Duration,
}

impl SyncOptions {
    /// Options with every optional setting at its default.
    pub fn new(
        public_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
        zone_id: impl Into<String>,
    ) -> Self {
        Self {
            public_dir: public_dir.into(),
            base_url: base_url.into(),
            zone_id: zone_id.into(),
            prev_manifest: PathBuf::from(DEFAULT_PREV_MANIFEST),
            save_manifest: PathBuf::from(DEFAULT_SAVE_MANIFEST),
            batch_size: DEFAULT_BATCH_SIZE,
            full_purge: false,
            dry_run: false,
            throttle: DEFAULT_THROTTLE,
        }
    }
}

/// Why every file is being purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullPurgeReason {
    /// `full_purge` was set
    Requested,
    /// The previous manifest is missing or has no lines
    NoPriorManifest,
}

/// How the changed paths were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeMode {
    Full(FullPurgeReason),
    Incremental,
}

impl fmt::Display for PurgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurgeMode::Full(FullPurgeReason::Requested) => f.write_str("full (requested)"),
            PurgeMode::Full(FullPurgeReason::NoPriorManifest) => {
                f.write_str("full (no previous manifest)")
            }
            PurgeMode::Incremental => f.write_str("incremental"),
        }
    }
}

/// Pipeline states, in the order a successful run passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Start,
    Hashed,
    ManifestLoaded,
    FullPurgeDecision,
    IncrementalDiff,
    UrlsBuilt,
    Purged,
    ManifestSaved,
    Done,
}

impl SyncStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStage::Start => "start",
            SyncStage::Hashed => "hashed",
            SyncStage::ManifestLoaded => "manifest_loaded",
            SyncStage::FullPurgeDecision => "full_purge_decision",
            SyncStage::IncrementalDiff => "incremental_diff",
            SyncStage::UrlsBuilt => "urls_built",
            SyncStage::Purged => "purged",
            SyncStage::ManifestSaved => "manifest_saved",
            SyncStage::Done => "done",
        }
    }
}

/// Result of a completed sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub mode: PurgeMode,
    /// Number of files fingerprinted
    pub file_count: usize,
    pub changed_paths: Vec<String>,
    pub urls: Vec<String>,
    pub batches_sent: usize,
    /// Manifest path written, `None` in dry-run mode
    pub manifest_written: Option<PathBuf>,
    /// Stages visited, ending in `Done`
    pub stages: Vec<SyncStage>,
}

struct StageTrail(Vec<SyncStage>);

impl StageTrail {
    fn enter(&mut self, stage: SyncStage) {
        tracing::debug!(op = "sync", event = EVENT_STAGE, stage = stage.as_str());
        self.0.push(stage);
    }
}

/// Run one sync against `transport`.
///
/// # Errors
///
/// - `Precondition` if `public_dir` is missing or not a directory
/// - `InvalidInput` if `base_url` is not an absolute http(s) URL
/// - `Io` / `InvalidPath` from fingerprinting or manifest access
/// - `Transport` / `UpstreamRejected` / `InvalidResponse` from purging, in
///   which case the new manifest is not written
pub fn run_sync<T: PurgeTransport + ?Sized>(
    options: &SyncOptions,
    transport: &T,
) -> Result<SyncReport> {
    let started = Instant::now();
    log_op_start!(
        "sync",
        public_dir = %options.public_dir.display(),
        dry_run = options.dry_run
    );

    match sync_inner(options, transport) {
        Ok(report) => {
            log_op_end!(
                "sync",
                duration_ms = started.elapsed().as_millis() as u64,
                mode = %report.mode,
                changed_count = report.changed_paths.len()
            );
            Ok(report)
        }
        Err(err) => {
            log_op_error!(
                "sync",
                &err,
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn sync_inner<T: PurgeTransport + ?Sized>(
    options: &SyncOptions,
    transport: &T,
) -> Result<SyncReport> {
    let mut trail = StageTrail(Vec::new());
    trail.enter(SyncStage::Start);

    check_public_dir(&options.public_dir)?;
    validate_base_url(&options.base_url)?;

    let current = fingerprint_tree(&options.public_dir)?;
    trail.enter(SyncStage::Hashed);

    let previous_lines = load_manifest(&options.prev_manifest)?;
    trail.enter(SyncStage::ManifestLoaded);

    let (mode, changed_paths) = if options.full_purge || previous_lines.is_empty() {
        trail.enter(SyncStage::FullPurgeDecision);
        let reason = if options.full_purge {
            tracing::warn!("purging entire cache because full purge was requested");
            FullPurgeReason::Requested
        } else {
            tracing::warn!(
                manifest_path = %options.prev_manifest.display(),
                "purging entire cache because the previous manifest does not exist or is empty"
            );
            FullPurgeReason::NoPriorManifest
        };
        (PurgeMode::Full(reason), all_paths(&current))
    } else {
        trail.enter(SyncStage::IncrementalDiff);
        (PurgeMode::Incremental, diff(&current, &previous_lines))
    };
    tracing::info!(
        mode = %mode,
        file_count = current.len(),
        changed_count = changed_paths.len(),
        "change detection complete"
    );

    let urls = build_urls(&changed_paths, &options.base_url);
    trail.enter(SyncStage::UrlsBuilt);

    if options.dry_run {
        trail.enter(SyncStage::Done);
        return Ok(SyncReport {
            mode,
            file_count: current.len(),
            changed_paths,
            urls,
            batches_sent: 0,
            manifest_written: None,
            stages: trail.0,
        });
    }

    let summary = PurgeClient::new(transport, options.batch_size)
        .with_throttle(options.throttle)
        .purge(&options.zone_id, &urls)?;
    trail.enter(SyncStage::Purged);

    write_manifest(&options.save_manifest, &current)?;
    trail.enter(SyncStage::ManifestSaved);
    trail.enter(SyncStage::Done);

    Ok(SyncReport {
        mode,
        file_count: current.len(),
        changed_paths,
        urls,
        batches_sent: summary.batches_sent,
        manifest_written: Some(options.save_manifest.clone()),
        stages: trail.0,
    })
}

fn check_public_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(precondition(
            "sync",
            path,
            "public directory does not exist",
        ));
    }
    if !path.is_dir() {
        return Err(precondition(
            "sync",
            path,
            "public directory is not a directory",
        ));
    }
    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = Url::parse(base_url)
        .map_err(|e| invalid_input("sync", format!("invalid base URL '{}': {}", base_url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(invalid_input(
            "sync",
            format!("base URL '{}' must be an absolute http(s) URL", base_url),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgepurge_core::errors::EdgeErrorKind;

    #[test]
    fn test_defaults() {
        let options = SyncOptions::new("public", "https://ex.com", "zone");
        assert_eq!(options.batch_size.get(), 30);
        assert_eq!(options.prev_manifest, PathBuf::from("public_manifest"));
        assert_eq!(options.save_manifest, PathBuf::from("public_manifest_new"));
        assert!(!options.full_purge);
        assert_eq!(options.throttle, Duration::from_millis(500));
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://ex.com/").is_ok());
        assert!(validate_base_url("http://localhost:8080/site").is_ok());
        assert_eq!(
            validate_base_url("ex.com").unwrap_err().kind(),
            EdgeErrorKind::InvalidInput
        );
        assert_eq!(
            validate_base_url("ftp://ex.com").unwrap_err().kind(),
            EdgeErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(PurgeMode::Incremental.to_string(), "incremental");
        assert_eq!(
            PurgeMode::Full(FullPurgeReason::NoPriorManifest).to_string(),
            "full (no previous manifest)"
        );
    }
}
