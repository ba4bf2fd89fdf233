//! Concurrent batch walking.
//!
//! Every input is validated, then walked on its own spawned task. A semaphore
//! bounds how many walks are in flight. Items never influence each other: a
//! rejected, timed-out or panicked item is reported in its slot and the rest
//! of the batch carries on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, warn};
use tokio_retry::RetryIf;

use crate::app::validate_candidate;
use crate::config::{Config, DEFAULT_MAX_CONCURRENCY, WALK_TIMEOUT};
use crate::error_handling::{
    get_retry_strategy, ErrorType, ProcessingStats, UrlValidationError, WalkError,
};
use crate::fetch::HttpProbe;
use crate::initialization::init_semaphore;
use crate::walker::{RedirectResult, RedirectWalker, Terminal, WalkOutcome};

/// Batch-level knobs. Per-walk limits live in `WalkOptions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub max_concurrency: usize,
    /// Wall-clock ceiling on each walk attempt
    pub walk_timeout: Duration,
    /// Extra attempts for walks that end in `ProbeFailed`
    pub retries: usize,
    /// Skip the SSRF check on inputs
    pub allow_private: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            walk_timeout: WALK_TIMEOUT,
            retries: 0,
            allow_private: false,
        }
    }
}

impl From<&Config> for BatchOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_concurrency: config.max_concurrency,
            walk_timeout: config.walk_timeout,
            retries: config.retries,
            allow_private: config.allow_private,
        }
    }
}

/// Shared counters a batch reports into.
#[derive(Clone, Default)]
pub struct BatchCounters {
    pub stats: Arc<ProcessingStats>,
    /// Items finished so far, for progress logging
    pub completed: Arc<AtomicUsize>,
}

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The walk ran; its terminal says how it ended
    Walked(RedirectResult),
    /// The input never became a walkable URL
    Rejected(UrlValidationError),
    /// The walk was started but produced no result
    Failed {
        url: String,
        message: String,
        error_type: ErrorType,
    },
}

/// One input paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub input: String,
    pub outcome: ItemOutcome,
}

impl BatchItem {
    /// The walk result, when the walk ran.
    pub fn result(&self) -> Option<&RedirectResult> {
        match &self.outcome {
            ItemOutcome::Walked(result) => Some(result),
            _ => None,
        }
    }

    /// True for rejected inputs, failed tasks and walks that ended in a probe failure.
    pub fn is_failure(&self) -> bool {
        match &self.outcome {
            ItemOutcome::Walked(result) => result.terminal == Terminal::ProbeFailed,
            ItemOutcome::Rejected(_) | ItemOutcome::Failed { .. } => true,
        }
    }
}

/// Why a single walk attempt did not produce a final outcome.
enum AttemptError {
    /// Walk finished in `ProbeFailed`; retryable
    Probe(WalkOutcome),
    /// Walker refused the URL
    Contract(WalkError),
    /// `walk_timeout` elapsed
    Timeout,
}

/// Walks every input and returns one item per input, in input order.
///
/// The walker is shared by all tasks; it carries no per-walk state.
pub async fn walk_batch<P>(
    walker: Arc<RedirectWalker<P>>,
    inputs: Vec<String>,
    options: &BatchOptions,
    counters: &BatchCounters,
) -> Vec<BatchItem>
where
    P: HttpProbe + 'static,
{
    let total = inputs.len();
    let mut slots: Vec<Option<BatchItem>> = (0..total).map(|_| None).collect();
    let semaphore = init_semaphore(options.max_concurrency);
    let mut tasks = FuturesUnordered::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let url = match validate_candidate(&input, options.allow_private) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping input '{}': {}", input, e);
                counters.stats.increment_error(ErrorType::from(&e));
                counters.completed.fetch_add(1, Ordering::SeqCst);
                slots[index] = Some(BatchItem {
                    input,
                    outcome: ItemOutcome::Rejected(e),
                });
                continue;
            }
        };

        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Semaphore closed, skipping URL: {url}");
                counters.stats.increment_error(ErrorType::TaskFailed);
                counters.completed.fetch_add(1, Ordering::SeqCst);
                slots[index] = Some(BatchItem {
                    input,
                    outcome: ItemOutcome::Failed {
                        message: format!("Walk for {url} was not scheduled"),
                        url,
                        error_type: ErrorType::TaskFailed,
                    },
                });
                continue;
            }
        };

        let walker = Arc::clone(&walker);
        let stats = Arc::clone(&counters.stats);
        let completed = Arc::clone(&counters.completed);
        let walk_timeout = options.walk_timeout;
        let retries = options.retries;
        let task_url = url.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            let outcome = walk_one(&walker, &task_url, walk_timeout, retries, &stats).await;
            completed.fetch_add(1, Ordering::SeqCst);
            outcome
        });

        let completed = Arc::clone(&counters.completed);
        let stats = Arc::clone(&counters.stats);
        tasks.push(async move {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Walk task for {} failed: {}", url, e);
                    stats.increment_error(ErrorType::TaskFailed);
                    completed.fetch_add(1, Ordering::SeqCst);
                    ItemOutcome::Failed {
                        message: format!("Walk task failed: {e}"),
                        url,
                        error_type: ErrorType::TaskFailed,
                    }
                }
            };
            (index, BatchItem { input, outcome })
        });
    }

    while let Some((index, item)) = tasks.next().await {
        slots[index] = Some(item);
    }

    debug!("Batch of {} input(s) finished", total);
    slots.into_iter().flatten().collect()
}

/// Walks one normalized URL with the batch timeout and retry policy applied.
async fn walk_one<P: HttpProbe>(
    walker: &RedirectWalker<P>,
    url: &str,
    walk_timeout: Duration,
    retries: usize,
    stats: &ProcessingStats,
) -> ItemOutcome {
    let attempt = move || async move {
        match tokio::time::timeout(walk_timeout, walker.walk_with_outcome(url)).await {
            Ok(Ok(outcome)) if outcome.result.terminal == Terminal::ProbeFailed => {
                Err(AttemptError::Probe(outcome))
            }
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(e)) => Err(AttemptError::Contract(e)),
            Err(_) => Err(AttemptError::Timeout),
        }
    };

    let retryable = |e: &AttemptError| {
        let retry = matches!(e, AttemptError::Probe(_));
        if retry {
            debug!("Probe failure for {url}; retrying if attempts remain");
        }
        retry
    };

    match RetryIf::spawn(get_retry_strategy(retries), attempt, retryable).await {
        Ok(outcome) | Err(AttemptError::Probe(outcome)) => {
            if !outcome.result.is_completed() {
                debug!(
                    "Walk for {} ended as {} after {} hop(s)",
                    url,
                    outcome.result.terminal.as_str(),
                    outcome.result.hop_count
                );
            }
            stats.record_walk(&outcome.result, outcome.probe_error);
            ItemOutcome::Walked(outcome.result)
        }
        Err(AttemptError::Contract(e)) => {
            warn!("Walker rejected {}: {}", url, e);
            stats.increment_error(ErrorType::InvalidUrl);
            ItemOutcome::Failed {
                url: url.to_string(),
                message: e.to_string(),
                error_type: ErrorType::InvalidUrl,
            }
        }
        Err(AttemptError::Timeout) => {
            warn!(
                "Walk for {} exceeded {} seconds",
                url,
                walk_timeout.as_secs_f64()
            );
            stats.increment_error(ErrorType::WalkTimeout);
            ItemOutcome::Failed {
                url: url.to_string(),
                message: format!("Walk timeout after {} seconds", walk_timeout.as_secs_f64()),
                error_type: ErrorType::WalkTimeout,
            }
        }
    }
}
