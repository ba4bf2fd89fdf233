//! `reqwest`-backed probe.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::request::ProbeHeaders;
use super::{HttpProbe, ProbeResponse};
use crate::error_handling::{probe_error_from_reqwest, ProbeError, ProbeErrorKind};
use crate::security::validate_url_safe;

/// Production [`HttpProbe`] that issues `HEAD` requests through a shared
/// `reqwest::Client`.
///
/// The client must be built with redirects disabled (see
/// `initialization::init_probe_client`), otherwise `reqwest` would swallow the
/// hops the walker needs to see.
#[derive(Clone)]
pub struct ReqwestProbe {
    client: Arc<reqwest::Client>,
    block_private_targets: bool,
    get_fallback: bool,
}

impl ReqwestProbe {
    /// Creates a probe with the SSRF guard on and `GET` fallback enabled.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            block_private_targets: true,
            get_fallback: true,
        }
    }

    /// Refuse (or allow) targets on localhost and private address ranges.
    ///
    /// Validation of the start URL happens before walking; this guard also
    /// covers every redirect target the walker resolves afterwards.
    pub fn block_private_targets(mut self, enabled: bool) -> Self {
        self.block_private_targets = enabled;
        self
    }

    /// Re-issue as `GET` when a server rejects `HEAD` with 405 or 501.
    pub fn get_fallback(mut self, enabled: bool) -> Self {
        self.get_fallback = enabled;
        self
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, ProbeError> {
        if log::log_enabled!(log::Level::Debug) {
            let headers: Vec<String> = ProbeHeaders::as_vec()
                .into_iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
            log::debug!("{} {} [{}]", method, url, headers.join(", "));
        }
        ProbeHeaders::apply_to_request_builder(self.client.request(method, url))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| probe_error_from_reqwest(&e))
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn head(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        if self.block_private_targets {
            validate_url_safe(url)
                .map_err(|e| ProbeError::new(ProbeErrorKind::Blocked, e.to_string()))?;
        }

        let mut response = self.send(Method::HEAD, url, timeout).await?;
        if self.get_fallback
            && matches!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
            )
        {
            log::debug!(
                "HEAD rejected with {} for {}, retrying as GET",
                response.status().as_u16(),
                url
            );
            // Body is never read; dropping the response closes the stream
            response = self.send(Method::GET, url, timeout).await?;
        }

        let status = response.status();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        Ok(ProbeResponse {
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            location,
        })
    }
}
