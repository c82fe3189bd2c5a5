//! Content fingerprinting of a publish directory.
//!
//! ## Responsibilities
//!
//! - Walk the publish root and hash every regular file (SHA256, lowercase hex)
//! - Produce a `FingerprintSet` sorted by slash-separated relative path
//! - Define the manifest line encoding `"<digest>  <relative_path>"`
//!
//! ## Non-Responsibilities
//!
//! - Reading or writing manifest files (handled by `edgepurge-store`)
//! - Deciding what to purge (handled by `diff` and `edgepurge-engine`)

pub mod digest;
pub mod walk;

pub use digest::digest_bytes;
pub use walk::fingerprint_tree;

/// Separator between digest and path in a manifest line.
pub const LINE_SEPARATOR: &str = "  ";

/// Content digest of one file, keyed by its path relative to the publish root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFingerprint {
    /// Lowercase hex SHA256 of the file bytes (64 characters)
    pub digest: String,
    /// Slash-separated path relative to the publish root
    pub relative_path: String,
}

impl FileFingerprint {
    pub fn new(digest: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Manifest encoding of this entry, without the trailing newline.
    pub fn manifest_line(&self) -> String {
        format!("{}{}{}", self.digest, LINE_SEPARATOR, self.relative_path)
    }
}

/// Fingerprints of a whole tree, always sorted ascending by relative path.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintSet {
    entries: Vec<FileFingerprint>,
}

impl FingerprintSet {
    /// Build a set from entries in any order.
    pub fn from_unsorted(mut entries: Vec<FileFingerprint>) -> Self {
        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileFingerprint> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relative paths in set order
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.relative_path.as_str())
    }

    /// Manifest lines in set order
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(FileFingerprint::manifest_line)
    }
}

impl<'a> IntoIterator for &'a FingerprintSet {
    type Item = &'a FileFingerprint;
    type IntoIter = std::slice::Iter<'a, FileFingerprint>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
