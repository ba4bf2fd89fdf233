//! Single-hop HTTP probing.
//!
//! The walker never talks to the network directly. It asks an [`HttpProbe`]
//! for one response at a time, which keeps redirect following under the
//! walker's control and lets tests substitute scripted servers.

mod probe;
mod request;

use std::time::Duration;

use async_trait::async_trait;

use crate::error_handling::ProbeError;

pub use probe::ReqwestProbe;
pub use request::ProbeHeaders;

/// Status line and headers of one probe. The body is never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status_code: u16,
    pub status_text: String,
    /// Raw `Location` header value, if the response carried one
    pub location: Option<String>,
}

impl ProbeResponse {
    /// Builds a response using the canonical reason phrase for `status_code`.
    pub fn new(status_code: u16, location: Option<String>) -> Self {
        Self {
            status_code,
            status_text: status_text_for(status_code),
            location,
        }
    }
}

/// Canonical reason phrase, or `"Unknown"` for non-standard codes.
pub fn status_text_for(status_code: u16) -> String {
    reqwest::StatusCode::from_u16(status_code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}

/// Performs one non-body HTTP request against a URL.
///
/// Implementations must not follow redirects: a 3xx response is returned
/// as-is so the caller can inspect its `Location` header.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Probes `url`, giving up after `timeout`.
    async fn head(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError>;
}

#[async_trait]
impl<P: HttpProbe + ?Sized> HttpProbe for std::sync::Arc<P> {
    async fn head(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        (**self).head(url, timeout).await
    }
}
