//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - TLS crypto provider
//! - HTTP probe client
//! - Concurrency semaphore

mod client;
mod logger;

use std::sync::Arc;

use rustls::crypto::{ring::default_provider, CryptoProvider};
use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_probe_client;
pub use logger::init_logger_with;

/// Initializes a semaphore that bounds the number of concurrent walks.
///
/// A `count` of zero would deadlock every acquire, so it is raised to one.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

/// Initializes the crypto provider for TLS operations.
///
/// Must run before the first TLS connection; repeated calls are harmless.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
