use std::collections::BTreeSet;

use crate::diff::ChangeSet;
use crate::fingerprint::FingerprintSet;

/// Paths whose exact manifest line is missing from `previous_lines`.
///
/// A path is reported when its content digest changed or when it is new.
/// Paths present only in `previous_lines` (deleted files) are never
/// reported. Lines are compared byte for byte, so any formatting difference
/// in the previous manifest also marks the path as changed.
///
/// ```
/// use std::collections::BTreeSet;
/// use edgepurge_core::diff::diff;
/// use edgepurge_core::fingerprint::{FileFingerprint, FingerprintSet};
///
/// let current = FingerprintSet::from_unsorted(vec![
///     FileFingerprint::new("aa", "index.html"),
///     FileFingerprint::new("bb", "new.html"),
/// ]);
/// let previous: BTreeSet<String> = ["aa  index.html".to_string()].into();
/// assert_eq!(diff(&current, &previous), vec!["new.html".to_string()]);
/// ```
pub fn diff(current: &FingerprintSet, previous_lines: &BTreeSet<String>) -> ChangeSet {
    let mut changed: ChangeSet = current
        .iter()
        .filter(|fp| !previous_lines.contains(&fp.manifest_line()))
        .map(|fp| fp.relative_path.clone())
        .collect();
    changed.sort();
    changed
}

/// Every current path, used for a full purge.
pub fn all_paths(current: &FingerprintSet) -> ChangeSet {
    current.paths().map(str::to_string).collect()
}
