//! Purge client batching tests: ordering, sizes, abort on failure, progress
//! events.

mod common;

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use common::RecordingTransport;
use edgepurge_core::errors::EdgeErrorKind;
use edgepurge_core::logging_facility::test_capture::init_test_capture;
use edgepurge_core_types::schema::{EVENT_BATCH_PURGED, EVENT_BATCH_SENT};
use edgepurge_engine::purge::PurgeClient;

fn urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://ex.com/page-{:03}.html", i)).collect()
}

fn batch_size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_empty_url_list_makes_no_calls() {
    let transport = RecordingTransport::default();
    let summary = PurgeClient::new(&transport, batch_size(30))
        .purge("zone-1", &[])
        .unwrap();

    assert_eq!(summary.batches_sent, 0);
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn test_sixty_five_urls_in_three_ordered_batches() {
    let transport = RecordingTransport::default();
    let all = urls(65);

    let summary = PurgeClient::new(&transport, batch_size(30))
        .with_throttle(Duration::ZERO)
        .purge("zone-1", &all)
        .unwrap();

    assert_eq!(summary.batches_sent, 3);
    assert_eq!(summary.urls_purged, 65);
    assert_eq!(transport.batch_sizes(), vec![30, 30, 5]);

    // Concatenated batches reproduce the input order exactly
    let sent: Vec<String> = transport
        .calls
        .borrow()
        .iter()
        .flat_map(|(_, files)| files.clone())
        .collect();
    assert_eq!(sent, all);
    assert!(transport.calls.borrow().iter().all(|(zone, _)| zone == "zone-1"));
}

#[test]
fn test_failure_on_second_batch_stops_third() {
    let transport = RecordingTransport::failing_on(2);

    let err = PurgeClient::new(&transport, batch_size(30))
        .with_throttle(Duration::ZERO)
        .purge("zone-1", &urls(65))
        .unwrap_err();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(err.kind(), EdgeErrorKind::UpstreamRejected);
    assert_eq!(err.batch_index(), Some(2));
    assert_eq!(err.status(), Some(500));
}

#[test]
fn test_failure_on_first_batch_sends_nothing_else() {
    let transport = RecordingTransport::failing_on(1);

    let err = PurgeClient::new(&transport, batch_size(10))
        .with_throttle(Duration::ZERO)
        .purge("zone-1", &urls(25))
        .unwrap_err();

    assert_eq!(transport.call_count(), 1);
    assert_eq!(err.batch_index(), Some(1));
}

#[test]
fn test_throttle_pauses_between_batches_only() {
    let transport = RecordingTransport::default();
    let started = Instant::now();

    PurgeClient::new(&transport, batch_size(2))
        .with_throttle(Duration::from_millis(30))
        .purge("zone-1", &urls(5))
        .unwrap();

    // Three batches, two pauses
    assert!(started.elapsed() >= Duration::from_millis(60));
    assert_eq!(transport.batch_sizes(), vec![2, 2, 1]);
}

#[test]
fn test_progress_events_per_batch() {
    let capture = init_test_capture();
    let transport = RecordingTransport::default();
    let zone = "zone-progress-events";

    PurgeClient::new(&transport, batch_size(4))
        .with_throttle(Duration::ZERO)
        .purge(zone, &urls(9))
        .unwrap();

    let sent: Vec<_> = capture
        .events_for("purge_batch", EVENT_BATCH_SENT)
        .into_iter()
        .filter(|e| e.field("url_count").is_some())
        .collect();
    let purged = capture.events_for("purge_batch", EVENT_BATCH_PURGED);

    // Other tests share the capture buffer; look for this run's indices.
    let indices: Vec<_> = sent
        .iter()
        .filter_map(|e| e.field("batch_index"))
        .collect();
    assert!(indices.contains(&"1") && indices.contains(&"2") && indices.contains(&"3"));
    assert!(purged.iter().any(|e| e.field("status") == Some("200")));
    assert!(sent
        .iter()
        .any(|e| e.field("sample").is_some_and(|s| s.contains("page-000"))));
}
