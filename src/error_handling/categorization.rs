//! Error categorization and retry strategy.
//!
//! This module maps `reqwest` failures onto `ProbeErrorKind` and configures the
//! backoff used when a caller chooses to retry failed walks.

use std::error::Error as StdError;
use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

use super::types::{ProbeError, ProbeErrorKind};
use crate::security::BLOCKED_RESOLUTION_MARKER;

/// Creates an exponential backoff retry strategy.
///
/// Returns a strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR`
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `retries` delays (one per retry after the initial attempt)
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Categorizes a `reqwest::Error` into a `ProbeErrorKind`.
///
/// `reqwest` does not expose DNS or TLS failures as distinct kinds, so connect
/// errors are refined by inspecting the source chain messages. A lookup that
/// `SafeResolver` refused counts as `Blocked`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ProbeErrorKind {
    if error.is_timeout() {
        return ProbeErrorKind::Timeout;
    }
    if error.is_builder() {
        return ProbeErrorKind::Request;
    }

    let chain = source_chain_text(error);
    if chain.contains(BLOCKED_RESOLUTION_MARKER) {
        return ProbeErrorKind::Blocked;
    }
    if chain.contains("dns error")
        || chain.contains("failed to lookup address")
        || chain.contains("name or service not known")
        || chain.contains("no such host")
    {
        return ProbeErrorKind::Dns;
    }
    if chain.contains("certificate")
        || chain.contains("tls")
        || chain.contains("handshake")
        || chain.contains("ssl")
    {
        return ProbeErrorKind::Tls;
    }

    if error.is_connect() {
        ProbeErrorKind::Connect
    } else if error.is_request() {
        ProbeErrorKind::Request
    } else {
        ProbeErrorKind::Other
    }
}

/// Converts a `reqwest::Error` into a `ProbeError` with the full cause chain
/// in the message.
pub fn probe_error_from_reqwest(error: &reqwest::Error) -> ProbeError {
    let kind = categorize_reqwest_error(error);
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ProbeError::new(kind, message)
}

fn source_chain_text(error: &reqwest::Error) -> String {
    let mut text = String::new();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(&cause.to_string().to_lowercase());
        text.push(' ');
        source = cause.source();
    }
    text
}
