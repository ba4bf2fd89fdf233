//! Configuration types and CLI options.
//!
//! `Config` is the library-facing configuration; the `clap` structs below
//! parse the command line and convert into it.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_HOPS, DEFAULT_PROBE_TIMEOUT_MS,
    DEFAULT_USER_AGENT, WALK_TIMEOUT,
};
use crate::walker::WalkOptions;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use redirect_walker::Config;
///
/// let config = Config {
///     urls: vec!["example.com".to_string()],
///     max_hops: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// URLs given directly
    pub urls: Vec<String>,

    /// File to read additional URLs from (`-` for stdin)
    pub file: Option<PathBuf>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Maximum redirect hops per walk
    pub max_hops: usize,

    /// Per-probe timeout in milliseconds
    pub probe_timeout_ms: u64,

    /// Wall-clock ceiling on one walk
    pub walk_timeout: Duration,

    /// Maximum walks in flight
    pub max_concurrency: usize,

    /// Extra attempts for walks that end in a probe failure
    pub retries: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Permit localhost and private-range targets
    pub allow_private: bool,

    /// Report format
    pub format: OutputFormat,

    /// Report destination (stdout when `None`)
    pub output: Option<PathBuf>,

    /// Exit non-zero when any item failed
    pub fail_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            file: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_hops: DEFAULT_MAX_HOPS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            walk_timeout: WALK_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            retries: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_private: false,
            format: OutputFormat::Json,
            output: None,
            fail_on_error: false,
        }
    }
}

impl Config {
    /// Walk limits derived from this configuration.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            max_hops: self.max_hops,
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
        }
    }
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Walk a couple of URLs
/// redirect_walker check example.com http://github.com
///
/// # Walk a file of URLs, one JSON object per line
/// redirect_walker check --file urls.txt --format jsonl --max-concurrency 20
///
/// # Serve the HTTP API
/// redirect_walker serve --bind 0.0.0.0:8080
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "redirect_walker",
    version,
    about = "Follows HTTP redirect chains and reports every hop."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk redirect chains for URLs given on the command line or in a file
    Check(CheckArgs),
    /// Serve the redirect walker over HTTP
    Serve(ServeArgs),
}

/// Options shared by `check` and `serve`.
#[derive(Debug, Clone, Args)]
pub struct WalkerArgs {
    /// Maximum redirect hops to follow per URL
    #[arg(long, default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: usize,

    /// Per-probe timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Wall-clock ceiling on one whole walk, in seconds
    #[arg(long, default_value_t = WALK_TIMEOUT.as_secs())]
    pub walk_timeout_secs: u64,

    /// Maximum walks in flight
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Extra attempts for walks that end in a probe failure
    #[arg(long, default_value_t = 0)]
    pub retries: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Allow localhost and private-network targets (disables SSRF protection)
    #[arg(long)]
    pub allow_private: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// URLs to check (scheme defaults to https://)
    pub urls: Vec<String>,

    /// File with one URL per line, or `-` for stdin
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Report format: json|jsonl
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Exit with status 2 when any URL failed validation or probing
    #[arg(long)]
    pub fail_on_error: bool,

    #[command(flatten)]
    pub walker: WalkerArgs,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    #[command(flatten)]
    pub walker: WalkerArgs,
}

impl WalkerArgs {
    /// Applies the shared walker options to a `Config`.
    fn apply(&self, config: &mut Config) {
        config.max_hops = self.max_hops;
        config.probe_timeout_ms = self.timeout_ms;
        config.walk_timeout = Duration::from_secs(self.walk_timeout_secs);
        config.max_concurrency = self.max_concurrency;
        config.retries = self.retries;
        config.user_agent = self.user_agent.clone();
        config.allow_private = self.allow_private;
        config.log_level = self.log_level.clone();
        config.log_format = self.log_format.clone();
    }
}

impl From<CheckArgs> for Config {
    fn from(args: CheckArgs) -> Self {
        let mut config = Config {
            urls: args.urls,
            file: args.file,
            format: args.format,
            output: args.output,
            fail_on_error: args.fail_on_error,
            ..Default::default()
        };
        args.walker.apply(&mut config);
        config
    }
}

impl From<&ServeArgs> for Config {
    fn from(args: &ServeArgs) -> Self {
        let mut config = Config::default();
        args.walker.apply(&mut config);
        config
    }
}
