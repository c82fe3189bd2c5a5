//! Manifest file load/write.
//!
//! ## Format
//!
//! UTF-8 text, one record per line: `"<64 hex digest>  <relative_path>\n"`.
//! No header, no trailer, records in `FingerprintSet` order.
//!
//! ## Semantics
//!
//! - A missing manifest means "no prior state" and loads as an empty set
//! - Lines are kept verbatim (no trimming), empty lines are dropped
//! - Writes overwrite the destination in place; the last write wins

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

use edgepurge_core::fingerprint::FingerprintSet;
use edgepurge_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{manifest_read_error, manifest_write_error, Result};

/// Load the previous manifest as a set of raw lines.
///
/// # Errors
///
/// Returns an `Io` error if the file exists but cannot be read or is not
/// valid UTF-8.
pub fn load_manifest(path: &Path) -> Result<BTreeSet<String>> {
    let started = Instant::now();
    log_op_start!("load_manifest", manifest_path = %path.display());

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(manifest_path = %path.display(), "no previous manifest");
            String::new()
        }
        Err(e) => {
            let err = manifest_read_error(path, e);
            log_op_error!(
                "load_manifest",
                &err,
                duration_ms = started.elapsed().as_millis() as u64
            );
            return Err(err);
        }
    };

    let lines: BTreeSet<String> = parse_lines(&content);
    log_op_end!(
        "load_manifest",
        duration_ms = started.elapsed().as_millis() as u64,
        line_count = lines.len()
    );
    Ok(lines)
}

/// Write `set` as the new manifest, replacing whatever is at `path`.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be written.
pub fn write_manifest(path: &Path, set: &FingerprintSet) -> Result<()> {
    let started = Instant::now();
    log_op_start!("write_manifest", manifest_path = %path.display());

    let content = render(set);
    if let Err(e) = fs::write(path, content) {
        let err = manifest_write_error(path, e);
        log_op_error!(
            "write_manifest",
            &err,
            duration_ms = started.elapsed().as_millis() as u64
        );
        return Err(err);
    }

    log_op_end!(
        "write_manifest",
        duration_ms = started.elapsed().as_millis() as u64,
        file_count = set.len()
    );
    Ok(())
}

/// Serialize a set into manifest text.
pub fn render(set: &FingerprintSet) -> String {
    set.lines().fold(String::new(), |mut out, line| {
        out.push_str(&line);
        out.push('\n');
        out
    })
}

/// Split manifest text into its non-empty lines.
pub fn parse_lines(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
