//! JSON report shape.
//!
//! This is the presentation boundary: `RedirectKind` becomes a label string
//! and `Terminal` collapses into the `hasLoop` / `hasTooManyRedirects` flags
//! plus an `error` field. `schemeChanged` flags walks such as `http://` to
//! `https://` upgrades.

use serde::{Deserialize, Serialize};

use crate::run::{BatchItem, ItemOutcome};
use crate::walker::{RedirectResult, RedirectStep};

/// One hop as serialized in `redirectChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub url: String,
    pub status_code: u16,
    pub status_text: String,
    pub redirect_type: String,
    pub location: Option<String>,
    /// Milliseconds
    pub response_time: u64,
}

/// One walked (or rejected) URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkReport {
    pub original_url: String,
    pub redirect_chain: Vec<StepReport>,
    pub final_url: Option<String>,
    pub final_status_code: Option<u16>,
    pub redirect_count: usize,
    pub has_loop: bool,
    pub has_too_many_redirects: bool,
    /// Original and final URL use different schemes
    #[serde(default)]
    pub scheme_changed: bool,
    /// Milliseconds
    pub total_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&RedirectStep> for StepReport {
    fn from(step: &RedirectStep) -> Self {
        Self {
            url: step.url.clone(),
            status_code: step.status_code,
            status_text: step.status_text.clone(),
            redirect_type: step.redirect_kind.as_str().to_string(),
            location: step.location.clone(),
            response_time: step.response_time_ms,
        }
    }
}

impl From<&RedirectResult> for WalkReport {
    fn from(result: &RedirectResult) -> Self {
        Self {
            original_url: result.original_url.clone(),
            redirect_chain: result.chain.iter().map(StepReport::from).collect(),
            final_url: result.final_url.clone(),
            final_status_code: result.final_status_code,
            redirect_count: result.hop_count,
            has_loop: result.has_loop(),
            has_too_many_redirects: result.has_too_many_redirects(),
            scheme_changed: result.changed_scheme(),
            total_time: result.total_time_ms,
            error: result.error_message.clone(),
        }
    }
}

impl WalkReport {
    /// Report for a URL that never produced a walk.
    pub fn failed(original_url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            redirect_chain: Vec::new(),
            final_url: None,
            final_status_code: None,
            redirect_count: 0,
            has_loop: false,
            has_too_many_redirects: false,
            scheme_changed: false,
            total_time: 0,
            error: Some(error.into()),
        }
    }
}

impl From<&BatchItem> for WalkReport {
    fn from(item: &BatchItem) -> Self {
        match &item.outcome {
            ItemOutcome::Walked(result) => WalkReport::from(result),
            ItemOutcome::Rejected(e) => WalkReport::failed(item.input.clone(), e.to_string()),
            ItemOutcome::Failed { url, message, .. } => {
                WalkReport::failed(url.clone(), message.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::{ErrorType, UrlValidationError};
    use crate::walker::{RedirectKind, Terminal};
    use serde_json::json;

    fn sample_result() -> RedirectResult {
        RedirectResult {
            original_url: "http://a.test".to_string(),
            chain: vec![
                RedirectStep {
                    url: "http://a.test".to_string(),
                    status_code: 301,
                    status_text: "Moved Permanently".to_string(),
                    redirect_kind: RedirectKind::Permanent301,
                    location: Some("https://a.test/".to_string()),
                    response_time_ms: 12,
                },
                RedirectStep {
                    url: "https://a.test/".to_string(),
                    status_code: 200,
                    status_text: "OK".to_string(),
                    redirect_kind: RedirectKind::FinalDestination,
                    location: None,
                    response_time_ms: 30,
                },
            ],
            final_url: Some("https://a.test/".to_string()),
            final_status_code: Some(200),
            hop_count: 1,
            terminal: Terminal::Completed,
            total_time_ms: 45,
            error_message: None,
        }
    }

    #[test]
    fn test_report_wire_shape() {
        let report = WalkReport::from(&sample_result());
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(
            value,
            json!({
                "originalUrl": "http://a.test",
                "redirectChain": [
                    {
                        "url": "http://a.test",
                        "statusCode": 301,
                        "statusText": "Moved Permanently",
                        "redirectType": "Permanent (301)",
                        "location": "https://a.test/",
                        "responseTime": 12
                    },
                    {
                        "url": "https://a.test/",
                        "statusCode": 200,
                        "statusText": "OK",
                        "redirectType": "Final Destination",
                        "location": null,
                        "responseTime": 30
                    }
                ],
                "finalUrl": "https://a.test/",
                "finalStatusCode": 200,
                "redirectCount": 1,
                "hasLoop": false,
                "hasTooManyRedirects": false,
                "schemeChanged": true,
                "totalTime": 45
            })
        );
    }

    #[test]
    fn test_report_flags_follow_terminal() {
        let mut result = sample_result();
        result.terminal = Terminal::LoopDetected;
        let report = WalkReport::from(&result);
        assert!(report.has_loop);
        assert!(!report.has_too_many_redirects);

        result.terminal = Terminal::TooManyRedirects;
        let report = WalkReport::from(&result);
        assert!(!report.has_loop);
        assert!(report.has_too_many_redirects);
    }

    #[test]
    fn test_scheme_changed_compares_origin_and_final_url() {
        let mut result = sample_result();
        assert!(WalkReport::from(&result).scheme_changed);

        result.final_url = Some("http://a.test/home".to_string());
        assert!(!WalkReport::from(&result).scheme_changed);

        // A walk that never reached a final URL has nothing to compare
        result.final_url = None;
        assert!(!WalkReport::from(&result).scheme_changed);
    }

    #[test]
    fn test_probe_failure_carries_error_and_partial_chain() {
        let mut result = sample_result();
        result.chain.truncate(1);
        result.terminal = Terminal::ProbeFailed;
        result.final_status_code = None;
        result.error_message = Some("Probe timeout: no response".to_string());

        let value = serde_json::to_value(WalkReport::from(&result)).expect("serialize");
        assert_eq!(value["error"], "Probe timeout: no response");
        assert_eq!(value["redirectChain"].as_array().map(Vec::len), Some(1));
        assert!(value["finalStatusCode"].is_null());
    }

    #[test]
    fn test_rejected_and_failed_items() {
        let rejected = BatchItem {
            input: "ftp://x".to_string(),
            outcome: ItemOutcome::Rejected(UrlValidationError::UnsupportedScheme {
                scheme: "ftp".to_string(),
            }),
        };
        let report = WalkReport::from(&rejected);
        assert_eq!(report.original_url, "ftp://x");
        assert!(report.redirect_chain.is_empty());
        assert!(!report.scheme_changed);
        assert!(report
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("Unsupported URL scheme"));

        let failed = BatchItem {
            input: "slow.test".to_string(),
            outcome: ItemOutcome::Failed {
                url: "https://slow.test".to_string(),
                message: "Walk timeout after 60 seconds".to_string(),
                error_type: ErrorType::WalkTimeout,
            },
        };
        let report = WalkReport::from(&failed);
        assert_eq!(report.original_url, "https://slow.test");
        assert_eq!(report.error.as_deref(), Some("Walk timeout after 60 seconds"));
    }
}
