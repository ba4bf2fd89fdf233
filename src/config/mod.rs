//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (walk limits, batch sizing, retry backoff)
//! - The library `Config` struct
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    CheckArgs, Cli, Command, Config, LogFormat, LogLevel, OutputFormat, ServeArgs, WalkerArgs,
};
