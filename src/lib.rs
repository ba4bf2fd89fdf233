//! redirect_walker library: bounded HTTP redirect chain walking
//!
//! This library follows a URL's redirect chain one request at a time, recording
//! every hop, and classifies how the walk ended: a final destination, a
//! redirect loop, too many redirects, or a failed probe.
//!
//! # Example
//!
//! ```no_run
//! use redirect_walker::{init_probe_client, Config, RedirectWalker, ReqwestProbe};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let probe = ReqwestProbe::new(init_probe_client(&config)?);
//! let walker = RedirectWalker::new(probe, config.walk_options());
//!
//! let result = walker.walk("http://example.com").await?;
//! if result.is_completed() {
//!     println!("{} hop(s) to {:?}", result.hop_count, result.final_url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod run;
pub mod security;
pub mod server;
pub mod walker;

// Re-export public API
pub use app::{normalize_url, validate_candidate};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{ProbeError, ProbeErrorKind, UrlValidationError, WalkError};
pub use export::{StepReport, WalkReport};
pub use fetch::{HttpProbe, ProbeResponse, ReqwestProbe};
pub use initialization::init_probe_client;
pub use run::{run_check, walk_batch, BatchItem, BatchOptions, CheckReport};
pub use walker::{
    RedirectKind, RedirectResult, RedirectStep, RedirectWalker, Terminal, WalkOptions,
};
