//! Main application modules.
//!
//! Input validation, progress logging, shutdown handling and statistics
//! printing used by the CLI runner and the HTTP server.

pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::{log_progress, spawn_progress_logger};
pub use shutdown::{shutdown_gracefully, shutdown_signal};
pub use statistics::print_statistics;
pub use url::{normalize_url, validate_candidate};
