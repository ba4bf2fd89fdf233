//! Bounded redirect walker.
//!
//! Follows a redirect chain one probe at a time, recording every hop, until
//! it reaches a non-redirect response, revisits a URL, runs out of hops, or
//! the probe fails.
//!
//! Loop detection compares resolved URL strings exactly. Two URLs that differ
//! only by a trailing slash, query order or host case count as different
//! URLs, so such loops are only caught by `max_hops`.

mod resolve;
mod types;


use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::{DEFAULT_MAX_HOPS, DEFAULT_PROBE_TIMEOUT_MS};
use crate::error_handling::ProbeErrorKind;
use crate::fetch::HttpProbe;

pub use crate::error_handling::WalkError;
pub use resolve::{has_scheme, resolve_location};
pub use types::{RedirectKind, RedirectResult, RedirectStep, Terminal};

/// Per-walk limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum number of redirect hops to follow
    pub max_hops: usize,
    /// Upper bound on each individual probe
    pub probe_timeout: Duration,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }
}

/// A finished walk plus the category of the probe failure that ended it.
///
/// The category is not part of the result's wire shape; it feeds statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOutcome {
    pub result: RedirectResult,
    pub probe_error: Option<ProbeErrorKind>,
}

/// Follows redirect chains through an [`HttpProbe`].
///
/// The walker holds no per-walk state; one instance can serve any number of
/// concurrent walks.
pub struct RedirectWalker<P> {
    probe: P,
    options: WalkOptions,
}

impl<P: HttpProbe> RedirectWalker<P> {
    pub fn new(probe: P, options: WalkOptions) -> Self {
        Self { probe, options }
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Walks the redirect chain starting at `start_url`.
    ///
    /// # Errors
    ///
    /// Only contract violations are errors: a start URL that is not an absolute
    /// http/https URL, or `max_hops == 0`. Loops, overflows, timeouts and
    /// connection failures are reported through [`RedirectResult::terminal`].
    pub async fn walk(&self, start_url: &str) -> Result<RedirectResult, WalkError> {
        self.walk_with_outcome(start_url).await.map(|o| o.result)
    }

    /// Same as [`RedirectWalker::walk`], also returning the probe failure category.
    pub async fn walk_with_outcome(&self, start_url: &str) -> Result<WalkOutcome, WalkError> {
        check_start_url(start_url)?;
        if self.options.max_hops == 0 {
            return Err(WalkError::ZeroMaxHops);
        }

        let started = Instant::now();
        let mut visited: HashSet<String> = HashSet::new();
        let mut chain: Vec<RedirectStep> = Vec::new();
        let mut current = start_url.to_string();
        let mut hops = 0usize;

        let finish = |chain: Vec<RedirectStep>,
                      final_url: String,
                      final_status_code: Option<u16>,
                      hop_count: usize,
                      terminal: Terminal,
                      error_message: Option<String>| RedirectResult {
            original_url: start_url.to_string(),
            chain,
            final_url: Some(final_url),
            final_status_code,
            hop_count,
            terminal,
            total_time_ms: elapsed_ms(started),
            error_message,
        };

        while hops < self.options.max_hops {
            if visited.contains(&current) {
                info!(
                    "Redirect loop for {} after {} hop(s): {} already visited",
                    start_url, hops, current
                );
                return Ok(WalkOutcome {
                    result: finish(chain, current, None, hops, Terminal::LoopDetected, None),
                    probe_error: None,
                });
            }
            visited.insert(current.clone());

            let probe_started = Instant::now();
            let probed = tokio::time::timeout(
                self.options.probe_timeout,
                self.probe.head(&current, self.options.probe_timeout),
            )
            .await
            .unwrap_or_else(|_| {
                Err(crate::error_handling::ProbeError::timeout(
                    &current,
                    duration_ms(self.options.probe_timeout),
                ))
            });
            let response_time_ms = elapsed_ms(probe_started);

            let response = match probed {
                Ok(response) => response,
                Err(e) => {
                    warn!("Probe failed for {} (hop {}): {}", current, hops, e);
                    let kind = e.kind;
                    return Ok(WalkOutcome {
                        result: finish(
                            chain,
                            current,
                            None,
                            hops,
                            Terminal::ProbeFailed,
                            Some(e.to_string()),
                        ),
                        probe_error: Some(kind),
                    });
                }
            };

            let redirect_kind =
                RedirectKind::classify(response.status_code, response.location.is_some());
            debug!(
                "Hop {}: {} -> {} {} ({}, {} ms)",
                hops,
                current,
                response.status_code,
                response.status_text,
                redirect_kind,
                response_time_ms
            );

            let step = RedirectStep {
                url: current.clone(),
                status_code: response.status_code,
                status_text: response.status_text,
                redirect_kind,
                location: if redirect_kind.is_redirect() {
                    response.location
                } else {
                    None
                },
                response_time_ms,
            };
            let status_code = step.status_code;
            let next = match (&step.location, redirect_kind.is_redirect()) {
                (Some(location), true) => Some(resolve_location(&current, location)),
                _ => None,
            };
            chain.push(step);

            match next {
                None => {
                    return Ok(WalkOutcome {
                        result: finish(
                            chain,
                            current,
                            Some(status_code),
                            hops,
                            Terminal::Completed,
                            None,
                        ),
                        probe_error: None,
                    });
                }
                Some(Ok(next_url)) => {
                    current = next_url;
                    hops += 1;
                }
                Some(Err(e)) => {
                    // `current` came from an absolute Location with no usable
                    // base (e.g. `mailto:`), so a relative Location cannot resolve
                    warn!("Cannot resolve Location from {}: {}", current, e);
                    return Ok(WalkOutcome {
                        result: finish(
                            chain,
                            current,
                            None,
                            hops,
                            Terminal::ProbeFailed,
                            Some(e.to_string()),
                        ),
                        probe_error: Some(ProbeErrorKind::Request),
                    });
                }
            }
        }

        info!(
            "Too many redirects for {}: stopped after {} hops at {}",
            start_url, hops, current
        );
        Ok(WalkOutcome {
            result: finish(chain, current, None, hops, Terminal::TooManyRedirects, None),
            probe_error: None,
        })
    }
}

/// Rejects start URLs that are not absolute http/https URLs with a host.
fn check_start_url(start_url: &str) -> Result<(), WalkError> {
    let invalid = |reason: String| WalkError::InvalidUrl {
        url: start_url.to_string(),
        reason,
    };
    let parsed = url::Url::parse(start_url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("URL has no host component".to_string()));
    }
    Ok(())
}

fn elapsed_ms(since: Instant) -> u64 {
    duration_ms(since.elapsed())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
