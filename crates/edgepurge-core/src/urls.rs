//! Public URL construction for changed paths.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped in a URL path: everything except ASCII alphanumerics,
/// `_ . - ~` and the `/` directory separator.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a slash-separated relative path for use in a URL path.
///
/// ```
/// use edgepurge_core::urls::encode_path;
///
/// assert_eq!(encode_path("a b.txt"), "a%20b.txt");
/// assert_eq!(encode_path("dir/file.txt"), "dir/file.txt");
/// ```
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ENCODE_SET).to_string()
}

/// Map relative paths to absolute public URLs, preserving input order.
///
/// All trailing `/` are stripped from `base_url` before joining.
///
/// ```
/// use edgepurge_core::urls::build_urls;
///
/// let urls = build_urls(&["a b.txt".to_string()], "https://ex.com/");
/// assert_eq!(urls, vec!["https://ex.com/a%20b.txt".to_string()]);
/// ```
pub fn build_urls(paths: &[String], base_url: &str) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    paths
        .iter()
        .map(|path| format!("{}/{}", base, encode_path(path)))
        .collect()
}
