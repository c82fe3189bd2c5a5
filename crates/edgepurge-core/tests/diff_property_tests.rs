//! Property tests for change detection and URL building.

use std::collections::{BTreeMap, BTreeSet};

use edgepurge_core::diff::diff;
use edgepurge_core::fingerprint::{FileFingerprint, FingerprintSet};
use edgepurge_core::urls::build_urls;
use proptest::prelude::*;

fn fingerprint_set() -> impl Strategy<Value = FingerprintSet> {
    prop::collection::btree_map("[a-z]{1,4}(/[a-z]{1,4}){0,2}\\.txt", "[0-9a-f]{64}", 0..20)
        .prop_map(|entries: BTreeMap<String, String>| {
            FingerprintSet::from_unsorted(
                entries
                    .into_iter()
                    .map(|(path, digest)| FileFingerprint::new(digest, path))
                    .collect(),
            )
        })
}

proptest! {
    #[test]
    fn diff_against_own_lines_is_empty(set in fingerprint_set()) {
        let lines: BTreeSet<String> = set.lines().collect();
        prop_assert!(diff(&set, &lines).is_empty());
    }

    #[test]
    fn diff_is_empty_iff_every_line_present(
        set in fingerprint_set(),
        drop_mask in prop::collection::vec(any::<bool>(), 20),
    ) {
        let lines: BTreeSet<String> = set
            .lines()
            .zip(drop_mask.iter())
            .filter(|(_, drop)| !**drop)
            .map(|(line, _)| line)
            .collect();
        let all_present = set.lines().all(|l| lines.contains(&l));
        prop_assert_eq!(diff(&set, &lines).is_empty(), all_present);
    }

    #[test]
    fn diff_output_is_sorted_subset(set in fingerprint_set()) {
        let changed = diff(&set, &BTreeSet::new());
        let mut sorted = changed.clone();
        sorted.sort();
        prop_assert_eq!(&changed, &sorted);
        prop_assert_eq!(changed.len(), set.len());
    }

    #[test]
    fn urls_keep_separators_and_order(set in fingerprint_set()) {
        let paths: Vec<String> = set.paths().map(str::to_string).collect();
        let urls = build_urls(&paths, "https://cdn.example.com/");
        prop_assert_eq!(urls.len(), paths.len());
        for (url, path) in urls.iter().zip(paths.iter()) {
            prop_assert_eq!(url, &format!("https://cdn.example.com/{}", path));
        }
    }
}
