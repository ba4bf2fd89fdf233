//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (`thiserror` enums for each layer)
//! - Probe failure categorization from `reqwest` errors
//! - Retry strategy configuration for callers that retry failed walks
//! - Processing statistics tracking
//!
//! Loops and redirect overflows are not errors; they are terminal
//! classifications carried on `RedirectResult`.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, get_retry_strategy, probe_error_from_reqwest};
pub use stats::ProcessingStats;
pub use types::{
    ErrorType, InitializationError, ProbeError, ProbeErrorKind, UrlValidationError, WalkError,
};
