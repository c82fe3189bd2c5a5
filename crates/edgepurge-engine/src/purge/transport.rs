//! Purge request transport.
//!
//! `PurgeTransport` is the seam between the batching logic and the network.
//! `HttpPurgeTransport` talks to the real API; tests substitute a recorder.

use std::time::Duration;

use edgepurge_core::errors::{invalid_input, EdgeError, EdgeErrorKind, Result};
use edgepurge_core_types::Sensitive;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use thiserror::Error;

/// Cloudflare API v4 root.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Per-request timeout for purge calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single purge call: the zone and the URLs to evict.
#[derive(Debug, Clone, Copy)]
pub struct PurgeRequest<'a> {
    pub zone_id: &'a str,
    pub files: &'a [String],
}

/// A successful (2xx, JSON) response.
#[derive(Debug, Clone, PartialEq)]
pub struct PurgeResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Why a single purge call failed.
#[derive(Debug, Error)]
pub enum PurgeFailure {
    #[error("purge request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("purge API returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("purge API returned HTTP {status} with a non-JSON body: {reason}")]
    InvalidBody { status: u16, reason: String },
}

impl PurgeFailure {
    /// Convert into the canonical error, tagged with the failing batch.
    pub fn into_error(self, batch_index: usize) -> EdgeError {
        let err = match &self {
            PurgeFailure::Transport(_) => EdgeError::new(EdgeErrorKind::Transport),
            PurgeFailure::Rejected { status, .. } => {
                EdgeError::new(EdgeErrorKind::UpstreamRejected).with_status(*status)
            }
            PurgeFailure::InvalidBody { status, .. } => {
                EdgeError::new(EdgeErrorKind::InvalidResponse).with_status(*status)
            }
        };
        err.with_op("purge_batch")
            .with_batch_index(batch_index)
            .with_message(format!("failed to purge batch {}: {}", batch_index, self))
    }
}

/// Sends one purge request and waits for the answer.
pub trait PurgeTransport {
    /// Send `request`, returning the parsed response on 2xx with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a `PurgeFailure` for transport errors, non-2xx statuses and
    /// non-JSON bodies.
    fn send(&self, request: &PurgeRequest<'_>) -> std::result::Result<PurgeResponse, PurgeFailure>;
}

/// Connection settings for the HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// API root, without the `/zones/...` suffix
    pub api_base: String,
    pub api_token: Sensitive<String>,
    pub timeout: Duration,
}

impl HttpTransportConfig {
    pub fn new(api_token: Sensitive<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_token,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct PurgeBody<'a> {
    files: &'a [String],
}

/// Blocking HTTP transport for `POST /zones/{zone_id}/purge_cache`.
#[derive(Clone)]
pub struct HttpPurgeTransport {
    client: Client,
    api_base: String,
}

impl HttpPurgeTransport {
    /// Builds the client with the bearer token and JSON content type as
    /// default headers.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the token is blank or not a valid header value,
    /// `Internal` if the HTTP client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        if config.api_token.is_blank() {
            return Err(invalid_input("http_transport", "missing API token"));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token.expose().trim()))
            .map_err(|_| invalid_input("http_transport", "API token is not a valid header value"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                EdgeError::new(EdgeErrorKind::Internal)
                    .with_op("http_transport")
                    .with_message(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Purge endpoint for a zone.
    pub fn endpoint(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/purge_cache", self.api_base, zone_id)
    }
}

impl PurgeTransport for HttpPurgeTransport {
    fn send(&self, request: &PurgeRequest<'_>) -> std::result::Result<PurgeResponse, PurgeFailure> {
        let response = self
            .client
            .post(self.endpoint(request.zone_id))
            .json(&PurgeBody {
                files: request.files,
            })
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(PurgeFailure::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = serde_json::from_str(&text).map_err(|e| PurgeFailure::InvalidBody {
            status: status.as_u16(),
            reason: e.to_string(),
        })?;
        Ok(PurgeResponse {
            status: status.as_u16(),
            body,
        })
    }
}
