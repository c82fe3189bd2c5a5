//! Directory walk producing a `FingerprintSet`.

use std::fs;
use std::path::{Component, Path};
use std::time::Instant;

use ignore::WalkBuilder;

use crate::errors::{io_error, EdgeError, EdgeErrorKind, Result};
use crate::fingerprint::{digest_bytes, FileFingerprint, FingerprintSet};
use crate::{log_op_end, log_op_error, log_op_start};

/// Fingerprint every regular file under `root`.
///
/// Hidden files are included and no ignore files are honoured: the publish
/// directory is hashed exactly as it will be served. Symlinks to files are
/// hashed through the link, symlinked directories are not descended, broken
/// links and special files are skipped.
///
/// The caller checks that `root` is a readable directory.
///
/// # Errors
///
/// - `Io` if any directory entry or file cannot be read (no partial result)
/// - `InvalidPath` if a path under `root` is not valid UTF-8
pub fn fingerprint_tree(root: &Path) -> Result<FingerprintSet> {
    let started = Instant::now();
    log_op_start!("fingerprint_tree", public_dir = %root.display());

    match walk(root) {
        Ok(set) => {
            log_op_end!(
                "fingerprint_tree",
                duration_ms = started.elapsed().as_millis() as u64,
                file_count = set.len()
            );
            Ok(set)
        }
        Err(err) => {
            log_op_error!(
                "fingerprint_tree",
                &err,
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn walk(root: &Path) -> Result<FingerprintSet> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            EdgeError::new(EdgeErrorKind::Io)
                .with_op("walk_tree")
                .with_path(root)
                .with_message(e.to_string())
        })?;
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        // Follows symlinks: dangling links and directories report false.
        if !path.is_file() {
            continue;
        }

        let content = fs::read(path).map_err(|e| io_error("read_file", path, e))?;
        entries.push(FileFingerprint::new(
            digest_bytes(&content),
            relative_path(root, path)?,
        ));
    }

    Ok(FingerprintSet::from_unsorted(entries))
}

/// Slash-separated path of `path` relative to `root`.
fn relative_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        EdgeError::new(EdgeErrorKind::Internal)
            .with_op("relative_path")
            .with_path(path)
            .with_message("walked entry is outside the publish root")
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            let segment = segment.to_str().ok_or_else(|| {
                EdgeError::new(EdgeErrorKind::InvalidPath)
                    .with_op("relative_path")
                    .with_path(path)
                    .with_message("file name is not valid UTF-8")
            })?;
            segments.push(segment);
        }
    }
    Ok(segments.join("/"))
}
