//! Batched cache purge against the Cloudflare zone API.
//!
//! ## Responsibilities
//!
//! - Split URLs into contiguous batches of bounded size
//! - Send batches strictly in order, one request at a time, pausing between them
//! - Abort on the first failed batch and report its index
//!
//! ## Non-Responsibilities
//!
//! - Retries (re-running the tool is the retry)
//! - Providers other than Cloudflare

pub mod batch;
pub mod client;
pub mod transport;

pub use batch::{plan_batches, PurgeBatch};
pub use client::{PurgeClient, PurgeSummary, DEFAULT_THROTTLE};
pub use transport::{
    HttpPurgeTransport, HttpTransportConfig, PurgeFailure, PurgeRequest, PurgeResponse,
    PurgeTransport, DEFAULT_API_BASE, DEFAULT_TIMEOUT,
};
