//! Sync command: hash, diff, purge, save manifest

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use edgepurge_core_types::Sensitive;
use edgepurge_engine::commands::sync::{
    run_sync, SyncOptions, DEFAULT_PREV_MANIFEST, DEFAULT_SAVE_MANIFEST,
};
use edgepurge_engine::purge::{HttpPurgeTransport, HttpTransportConfig, DEFAULT_API_BASE};

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Root directory of the published site
    #[arg(long)]
    pub public_dir: PathBuf,

    /// Public URL the site is served from
    #[arg(long)]
    pub base_url: String,

    /// Cloudflare zone identifier
    #[arg(long, env = "CLOUDFLARE_ZONE_ID")]
    pub zone_id: String,

    /// Cloudflare API token with cache purge permission
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Manifest written by the previous run
    #[arg(long, default_value = DEFAULT_PREV_MANIFEST)]
    pub prev_manifest: PathBuf,

    /// Where to write the new manifest
    #[arg(long, default_value = DEFAULT_SAVE_MANIFEST)]
    pub save_manifest: PathBuf,

    /// Maximum URLs per purge request
    #[arg(long, default_value = "30")]
    pub batch_size: NonZeroUsize,

    /// Purge every file, ignoring the previous manifest
    #[arg(long)]
    pub full_purge: bool,

    /// Show what would be purged without purging or saving the manifest
    #[arg(long)]
    pub dry_run: bool,

    /// Cloudflare API root
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Pause between purge batches, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub throttle_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

pub fn execute(args: SyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    let transport = HttpPurgeTransport::new(HttpTransportConfig {
        api_base: args.api_base,
        api_token: Sensitive::new(args.api_token),
        timeout: Duration::from_secs(args.timeout_secs),
    })?;

    let options = SyncOptions {
        public_dir: args.public_dir,
        base_url: args.base_url,
        zone_id: args.zone_id,
        prev_manifest: args.prev_manifest,
        save_manifest: args.save_manifest,
        batch_size: args.batch_size,
        full_purge: args.full_purge,
        dry_run: args.dry_run,
        throttle: Duration::from_millis(args.throttle_ms),
    };

    let report = run_sync(&options, &transport)?;

    if options.dry_run {
        println!("Dry run (no purge, manifest not saved):");
        println!("  mode: {}", report.mode);
        println!("  files: {}", report.file_count);
        println!("  urls: {}", report.urls.len());
        for url in &report.urls {
            println!("    {}", url);
        }
    } else {
        println!("Purge complete:");
        println!("  mode: {}", report.mode);
        println!("  files: {}", report.file_count);
        println!("  changed: {}", report.changed_paths.len());
        println!("  batches: {}", report.batches_sent);
        if let Some(path) = &report.manifest_written {
            println!("  manifest: {}", path.display());
        }
    }

    Ok(())
}
