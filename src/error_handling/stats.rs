//! Processing statistics tracking.
//!
//! Thread-safe counters for walk outcomes, probe failure categories, redirect
//! kinds and item-level batch errors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, ProbeErrorKind};
use crate::walker::{RedirectKind, RedirectResult, Terminal};

/// Thread-safe processing statistics tracker.
///
/// Every enum variant is pre-registered with a zero counter, so increments
/// never allocate and the struct can be shared across tasks behind an `Arc`.
pub struct ProcessingStats {
    terminals: HashMap<Terminal, AtomicUsize>,
    probe_errors: HashMap<ProbeErrorKind, AtomicUsize>,
    redirect_kinds: HashMap<RedirectKind, AtomicUsize>,
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            terminals: Terminal::iter().map(|t| (t, AtomicUsize::new(0))).collect(),
            probe_errors: ProbeErrorKind::iter()
                .map(|k| (k, AtomicUsize::new(0)))
                .collect(),
            redirect_kinds: RedirectKind::iter()
                .map(|k| (k, AtomicUsize::new(0)))
                .collect(),
            errors: ErrorType::iter().map(|e| (e, AtomicUsize::new(0))).collect(),
        }
    }

    /// Records every counter a finished walk contributes to.
    ///
    /// `probe_error` is the failure that ended a `ProbeFailed` walk, if known.
    pub fn record_walk(&self, result: &RedirectResult, probe_error: Option<ProbeErrorKind>) {
        self.increment_terminal(result.terminal);
        for step in &result.chain {
            bump(&self.redirect_kinds, &step.redirect_kind);
        }
        if let Some(kind) = probe_error {
            self.increment_probe_error(kind);
        }
    }

    pub fn increment_terminal(&self, terminal: Terminal) {
        bump(&self.terminals, &terminal);
    }

    pub fn increment_probe_error(&self, kind: ProbeErrorKind) {
        bump(&self.probe_errors, &kind);
    }

    pub fn increment_error(&self, error: ErrorType) {
        bump(&self.errors, &error);
    }

    pub fn get_terminal_count(&self, terminal: Terminal) -> usize {
        load(&self.terminals, &terminal)
    }

    pub fn get_probe_error_count(&self, kind: ProbeErrorKind) -> usize {
        load(&self.probe_errors, &kind)
    }

    pub fn get_redirect_kind_count(&self, kind: RedirectKind) -> usize {
        load(&self.redirect_kinds, &kind)
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        load(&self.errors, &error)
    }

    pub fn total_walks(&self) -> usize {
        self.terminals.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn total_probe_errors(&self) -> usize {
        self.probe_errors
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Redirect hops seen across all walks (final destinations excluded).
    pub fn total_redirects(&self) -> usize {
        self.redirect_kinds
            .iter()
            .filter(|(kind, _)| kind.is_redirect())
            .map(|(_, c)| c.load(Ordering::SeqCst))
            .sum()
    }
}

fn bump<K: std::hash::Hash + Eq + std::fmt::Debug>(map: &HashMap<K, AtomicUsize>, key: &K) {
    if let Some(counter) = map.get(key) {
        counter.fetch_add(1, Ordering::Relaxed);
    } else {
        // Every variant is registered in new(); reaching this is a bug, not a reason to crash
        log::error!("No counter registered for {:?}", key);
    }
}

fn load<K: std::hash::Hash + Eq>(map: &HashMap<K, AtomicUsize>, key: &K) -> usize {
    map.get(key).map(|c| c.load(Ordering::SeqCst)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::RedirectStep;

    fn step(url: &str, code: u16, kind: RedirectKind) -> RedirectStep {
        RedirectStep {
            url: url.to_string(),
            status_code: code,
            status_text: String::new(),
            redirect_kind: kind,
            location: None,
            response_time_ms: 1,
        }
    }

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for terminal in Terminal::iter() {
            assert_eq!(stats.get_terminal_count(terminal), 0);
        }
        for kind in ProbeErrorKind::iter() {
            assert_eq!(stats.get_probe_error_count(kind), 0);
        }
        for error in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error), 0);
        }
        assert_eq!(stats.total_walks(), 0);
    }

    #[test]
    fn test_record_walk_counts_kinds_and_terminal() {
        let stats = ProcessingStats::new();
        let result = RedirectResult {
            original_url: "http://a.test".to_string(),
            chain: vec![
                step("http://a.test", 301, RedirectKind::Permanent301),
                step("https://a.test", 302, RedirectKind::Temporary302),
                step("https://a.test/home", 200, RedirectKind::FinalDestination),
            ],
            final_url: Some("https://a.test/home".to_string()),
            final_status_code: Some(200),
            hop_count: 2,
            terminal: Terminal::Completed,
            total_time_ms: 3,
            error_message: None,
        };

        stats.record_walk(&result, None);

        assert_eq!(stats.get_terminal_count(Terminal::Completed), 1);
        assert_eq!(stats.total_walks(), 1);
        assert_eq!(stats.total_redirects(), 2);
        assert_eq!(
            stats.get_redirect_kind_count(RedirectKind::FinalDestination),
            1
        );
        assert_eq!(stats.total_probe_errors(), 0);
    }

    #[test]
    fn test_record_walk_with_probe_error() {
        let stats = ProcessingStats::new();
        let result = RedirectResult {
            original_url: "https://down.test".to_string(),
            chain: Vec::new(),
            final_url: Some("https://down.test".to_string()),
            final_status_code: None,
            hop_count: 0,
            terminal: Terminal::ProbeFailed,
            total_time_ms: 10,
            error_message: Some("timeout".to_string()),
        };

        stats.record_walk(&result, Some(ProbeErrorKind::Timeout));
        stats.increment_error(ErrorType::InvalidUrl);

        assert_eq!(stats.get_terminal_count(Terminal::ProbeFailed), 1);
        assert_eq!(stats.get_probe_error_count(ProbeErrorKind::Timeout), 1);
        assert_eq!(stats.total_errors(), 1);
    }
}
