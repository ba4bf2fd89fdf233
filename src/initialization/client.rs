//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::security::SafeResolver;

/// Initializes the shared HTTP client used for probing.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirects disabled, so every hop reaches the walker
/// - Per-request timeout from `probe_timeout_ms`
/// - User-Agent from the configuration
/// - Rustls TLS backend
/// - `SafeResolver` for DNS unless `allow_private` is set, so hostnames that
///   resolve to private addresses are refused at connect time
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_millis(config.probe_timeout_ms))
        .connect_timeout(Duration::from_millis(config.probe_timeout_ms))
        .user_agent(config.user_agent.clone());
    if !config.allow_private {
        builder = builder.dns_resolver(Arc::new(SafeResolver));
    }
    Ok(Arc::new(builder.build()?))
}
