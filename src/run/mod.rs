//! Batch execution for the `check` command.
//!
//! This module provides:
//! - Input collection from arguments, files and stdin
//! - The concurrent batch walker shared by the CLI and the HTTP API
//! - `run_check`, which wires both to the real probe and the report writer

mod batch;
mod input;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, print_statistics, shutdown_gracefully, spawn_progress_logger};
use crate::config::{Config, LOGGING_INTERVAL};
use crate::export::{export_reports, WalkReport};
use crate::fetch::ReqwestProbe;
use crate::initialization::init_probe_client;
use crate::walker::{RedirectWalker, Terminal};

pub use batch::{walk_batch, BatchCounters, BatchItem, BatchOptions, ItemOutcome};
pub use input::{collect_inputs, read_inputs};

/// Summary of a `check` run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    /// Inputs seen
    pub total: usize,
    /// Walks that reached a final destination
    pub completed: usize,
    pub loops: usize,
    pub too_many_redirects: usize,
    /// Walks that ended in a probe failure
    pub probe_failures: usize,
    /// Inputs rejected before walking, timed out, or lost to a failed task
    pub errors: usize,
    pub elapsed_seconds: f64,
}

impl CheckReport {
    /// Tallies a finished batch.
    pub fn from_items(items: &[BatchItem], elapsed_seconds: f64) -> Self {
        let mut report = CheckReport {
            total: items.len(),
            elapsed_seconds,
            ..Default::default()
        };
        for item in items {
            match item.result().map(|r| r.terminal) {
                Some(Terminal::Completed) => report.completed += 1,
                Some(Terminal::LoopDetected) => report.loops += 1,
                Some(Terminal::TooManyRedirects) => report.too_many_redirects += 1,
                Some(Terminal::ProbeFailed) => report.probe_failures += 1,
                None => report.errors += 1,
            }
        }
        report
    }

    /// Items that produced no usable chain.
    pub fn failed(&self) -> usize {
        self.probe_failures + self.errors
    }
}

/// Walks every configured input and writes the report.
///
/// # Errors
///
/// Returns an error when no inputs were given, the input file cannot be read,
/// the HTTP client cannot be built, or the report cannot be written. Failures
/// of individual URLs are reported per item and never abort the run.
pub async fn run_check(config: Config) -> Result<CheckReport> {
    if config.max_hops == 0 {
        bail!("--max-hops must be at least 1");
    }

    let inputs = collect_inputs(&config.urls, config.file.as_deref()).await?;
    if inputs.is_empty() {
        bail!("No URLs to check; pass URLs as arguments or use --file");
    }

    let client = init_probe_client(&config).context("Failed to initialize HTTP client")?;
    let probe = ReqwestProbe::new(client).block_private_targets(!config.allow_private);
    let walker = Arc::new(RedirectWalker::new(probe, config.walk_options()));
    let options = BatchOptions::from(&config);
    let counters = BatchCounters::default();

    let total = inputs.len();
    info!(
        "Checking {} URL(s) with up to {} concurrent walks (max {} hops)",
        total, options.max_concurrency, config.max_hops
    );

    let start_time = Instant::now();
    let cancel = CancellationToken::new();
    let logging_task = spawn_progress_logger(
        start_time,
        Arc::clone(&counters.completed),
        total,
        Duration::from_secs(LOGGING_INTERVAL),
        cancel.clone(),
    );

    let items = walk_batch(walker, inputs, &options, &counters).await;

    shutdown_gracefully(cancel, Some(logging_task)).await;
    log_progress(start_time, &counters.completed, total);

    let reports: Vec<WalkReport> = items.iter().map(WalkReport::from).collect();
    export_reports(&reports, config.format, config.output.as_deref())
        .context("Failed to write report")?;

    print_statistics(&counters.stats);

    Ok(CheckReport::from_items(
        &items,
        start_time.elapsed().as_secs_f64(),
    ))
}
