//! SHA256 content digests.

use sha2::{Digest, Sha256};

/// Hash raw bytes with SHA256 and return lowercase hex (64 characters).
///
/// ```
/// use edgepurge_core::fingerprint::digest_bytes;
///
/// assert_eq!(
///     digest_bytes(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn digest_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
