//! edgepurge CLI
//!
//! Purges changed files of a static site from the Cloudflare edge cache.

use clap::{Parser, ValueEnum};
use edgepurge_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable progress lines
    Human,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "edgepurge")]
#[command(
    about = "edgepurge - Purge changed static files from the Cloudflare cache",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    sync: commands::sync::SyncArgs,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,
}

fn main() {
    // A missing .env is fine; flags and the real environment still apply.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Human => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    if let Err(e) = commands::sync::execute(cli.sync) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
