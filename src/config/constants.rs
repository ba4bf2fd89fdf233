//! Configuration constants.
//!
//! Defaults for walk limits, batch sizing, input validation and retry backoff.

use std::time::Duration;

// Walk limits
/// Maximum number of redirect hops to follow
pub const DEFAULT_MAX_HOPS: usize = 10;
/// Per-probe timeout in milliseconds
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;
/// Wall-clock ceiling on a whole walk when run through the batch runner.
/// `DEFAULT_MAX_HOPS` probes at `DEFAULT_PROBE_TIMEOUT_MS` each is the implicit bound;
/// this cuts it short for pathological chains of slow-but-answering servers.
pub const WALK_TIMEOUT: Duration = Duration::from_secs(60);

// Batch processing
/// Maximum walks in flight at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
/// Maximum URLs accepted by one API request
pub const MAX_URLS_PER_REQUEST: usize = 100;
/// Progress log interval in seconds while a CLI batch runs
pub const LOGGING_INTERVAL: u64 = 5;

// Input validation
/// Maximum URL length (2048 characters), matching common browser and server limits
pub const MAX_URL_LENGTH: usize = 2048;

// Retry strategy (caller-side; the walker itself never retries)
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which the retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;

// HTTP API
/// Default listen address for `serve`
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default User-Agent for probes. Identifies the tool so site operators can
/// tell where the HEAD requests come from.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; redirect_walker/",
    env!("CARGO_PKG_VERSION"),
    "; redirect chain checker)"
);
