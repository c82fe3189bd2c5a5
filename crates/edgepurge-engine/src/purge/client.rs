use std::num::NonZeroUsize;
use std::thread;
use std::time::{Duration, Instant};

use edgepurge_core::errors::Result;
use edgepurge_core::{log_op_end, log_op_error, log_op_start};
use edgepurge_core_types::schema::{EVENT_BATCH_PURGED, EVENT_BATCH_SENT};

use crate::purge::batch::plan_batches;
use crate::purge::transport::{PurgeRequest, PurgeTransport};

/// Pause between consecutive batches, to stay under the API rate limit.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(500);

/// What a completed purge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeSummary {
    pub batches_sent: usize,
    pub urls_purged: usize,
}

/// Sends URLs to the purge API in ordered, sequential batches.
pub struct PurgeClient<'t, T: PurgeTransport + ?Sized> {
    transport: &'t T,
    batch_size: NonZeroUsize,
    throttle: Duration,
}

impl<'t, T: PurgeTransport + ?Sized> PurgeClient<'t, T> {
    pub fn new(transport: &'t T, batch_size: NonZeroUsize) -> Self {
        Self {
            transport,
            batch_size,
            throttle: DEFAULT_THROTTLE,
        }
    }

    /// Override the inter-batch pause. Zero disables it.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Purge `urls` from `zone_id`.
    ///
    /// No request is made when `urls` is empty. Otherwise batches go out one
    /// at a time in order; the first failure stops the run, and batches
    /// already sent stay purged.
    ///
    /// # Errors
    ///
    /// `Transport`, `UpstreamRejected` or `InvalidResponse`, carrying the
    /// 1-based index of the failed batch.
    pub fn purge(&self, zone_id: &str, urls: &[String]) -> Result<PurgeSummary> {
        if urls.is_empty() {
            tracing::info!(op = "purge", "no files changed, no purge needed");
            return Ok(PurgeSummary::default());
        }

        let started = Instant::now();
        let batches = plan_batches(urls, self.batch_size);
        log_op_start!(
            "purge",
            zone_id = zone_id,
            url_count = urls.len(),
            batch_count = batches.len()
        );
        tracing::info!(
            "purging {} URLs in batches of {}",
            urls.len(),
            self.batch_size
        );

        let mut summary = PurgeSummary::default();
        for (position, batch) in batches.iter().enumerate() {
            if position > 0 && !self.throttle.is_zero() {
                thread::sleep(self.throttle);
            }

            tracing::info!(
                op = "purge_batch",
                event = EVENT_BATCH_SENT,
                batch_index = batch.index,
                url_count = batch.urls.len(),
                sample = ?batch.sample(),
                "sending batch {} ({} URLs)",
                batch.index,
                batch.urls.len()
            );

            let request = PurgeRequest {
                zone_id,
                files: batch.urls,
            };
            let response = match self.transport.send(&request) {
                Ok(response) => response,
                Err(failure) => {
                    let err = failure.into_error(batch.index);
                    log_op_error!(
                        "purge",
                        &err,
                        duration_ms = started.elapsed().as_millis() as u64,
                        batch_index = batch.index
                    );
                    return Err(err);
                }
            };

            tracing::info!(
                op = "purge_batch",
                event = EVENT_BATCH_PURGED,
                batch_index = batch.index,
                status = response.status,
                response = %response.body,
                "batch {} sent, status {}",
                batch.index,
                response.status
            );
            summary.batches_sent += 1;
            summary.urls_purged += batch.urls.len();
        }

        log_op_end!(
            "purge",
            duration_ms = started.elapsed().as_millis() as u64,
            batch_count = summary.batches_sent
        );
        Ok(summary)
    }
}
