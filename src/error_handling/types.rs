//! Error type definitions.
//!
//! This module defines the error enums shared across the walker, the probe,
//! URL validation and the batch runner.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Contract violations rejected by the walker before any probe is sent.
///
/// Network behavior and target-site configuration never produce a `WalkError`;
/// those end up as a `Terminal` on the returned result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// The URL could not be parsed, has no host, or is not http/https.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// `max_hops` must allow at least one probe.
    #[error("max_hops must be at least 1")]
    ZeroMaxHops,
}

/// Category of a failed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ProbeErrorKind {
    /// The probe did not answer within the per-hop timeout
    Timeout,
    /// TCP connection refused, reset or unreachable
    Connect,
    /// Host name could not be resolved
    Dns,
    /// TLS handshake or certificate failure
    Tls,
    /// Target refused by the SSRF guard
    Blocked,
    /// Request could not be built or sent (bad URL, unsupported scheme)
    Request,
    /// Anything else
    Other,
}

impl ProbeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeErrorKind::Timeout => "Probe timeout",
            ProbeErrorKind::Connect => "Connection error",
            ProbeErrorKind::Dns => "DNS resolution error",
            ProbeErrorKind::Tls => "TLS error",
            ProbeErrorKind::Blocked => "Blocked target",
            ProbeErrorKind::Request => "Request error",
            ProbeErrorKind::Other => "Other probe error",
        }
    }
}

impl std::fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single probe failure, as reported by an `HttpProbe`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ProbeError {
    pub kind: ProbeErrorKind,
    pub message: String,
}

impl ProbeError {
    pub fn new(kind: ProbeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Timeout after `timeout_ms` milliseconds.
    pub fn timeout(url: &str, timeout_ms: u64) -> Self {
        Self::new(
            ProbeErrorKind::Timeout,
            format!("no response from {url} within {timeout_ms} ms"),
        )
    }
}

/// Reasons a candidate URL is rejected before walking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL exceeds maximum length ({len} > {max})")]
    TooLong { len: usize, max: usize },

    #[error("Invalid URL '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Unsupported URL scheme '{scheme}' (only http:// and https:// allowed)")]
    UnsupportedScheme { scheme: String },

    #[error("URL has no host component: {0}")]
    MissingHost(String),

    /// Host points at localhost or a private, link-local or reserved range.
    #[error("Unsafe URL: {0}")]
    Unsafe(String),
}

/// Item-level failures counted by the batch runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Input rejected by validation (malformed or bad scheme)
    InvalidUrl,
    /// Input rejected by the SSRF guard
    UnsafeUrl,
    /// The whole walk exceeded its wall-clock ceiling
    WalkTimeout,
    /// The walk task panicked or was cancelled
    TaskFailed,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::UnsafeUrl => "Unsafe URL",
            ErrorType::WalkTimeout => "Walk timeout",
            ErrorType::TaskFailed => "Task failed",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&UrlValidationError> for ErrorType {
    fn from(e: &UrlValidationError) -> Self {
        match e {
            UrlValidationError::Unsafe(_) => ErrorType::UnsafeUrl,
            _ => ErrorType::InvalidUrl,
        }
    }
}
