// src/checker/status.rs
// =============================================================================
// The records the checker hands to whoever is displaying results.
//
// - LinkStatus: where one URL is in its check lifecycle
// - CheckResult: one row per extracted URL
// - RunProgress: the "Checking 3/12" counter
// - Summary: counts per final status, always recomputed from results
//
// All of these derive Serialize so the CLI can print them as JSON.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a link.
///
/// A probe moves `Queued -> Checking -> (one terminal state)` and never
/// goes backwards. A recheck runs the whole sequence again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Waiting for a free worker
    Queued,
    /// A worker has claimed it and a request is in flight
    Checking,
    /// HEAD or GET answered with 2xx
    Ok,
    /// GET answered 404 or 410
    Broken,
    /// GET deadline elapsed
    Timeout,
    /// The request failed for a non-timeout reason, so liveness is unknown
    Unknown,
    /// GET answered some other non-success status
    Error,
}

impl LinkStatus {
    /// True once the probe has finished, whatever the outcome.
    pub fn is_terminal(self) -> bool {
        !matches!(self, LinkStatus::Queued | LinkStatus::Checking)
    }

    /// True for outcomes that prove the link is bad.
    ///
    /// `Timeout` and `Unknown` are not failures: they only mean we could
    /// not tell.
    pub fn is_failure(self) -> bool {
        matches!(self, LinkStatus::Broken | LinkStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Queued => "queued",
            LinkStatus::Checking => "checking",
            LinkStatus::Ok => "ok",
            LinkStatus::Broken => "broken",
            LinkStatus::Timeout => "timeout",
            LinkStatus::Unknown => "unknown",
            LinkStatus::Error => "error",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking a single extracted URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The URL exactly as the extractor produced it
    pub url: String,
    pub status: LinkStatus,
    /// HTTP status code, when a response was seen
    pub code: Option<u16>,
    /// Diagnostic for failures that produced no HTTP status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// Placeholder published before any worker picks the URL up.
    pub fn queued(url: impl Into<String>) -> Self {
        Self::with_status(url, LinkStatus::Queued)
    }

    pub fn checking(url: impl Into<String>) -> Self {
        Self::with_status(url, LinkStatus::Checking)
    }

    fn with_status(url: impl Into<String>, status: LinkStatus) -> Self {
        CheckResult {
            url: url.into(),
            status,
            code: None,
            error: None,
        }
    }
}

/// Progress of one run: `done` of `total` probes have finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProgress {
    pub done: usize,
    pub total: usize,
}

impl RunProgress {
    pub fn is_complete(&self) -> bool {
        self.done == self.total
    }
}

/// Count of results per final status.
///
/// Derived data: build it from the current results whenever they change.
/// Queued and checking rows are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub ok: usize,
    pub broken: usize,
    pub timeout: usize,
    pub unknown: usize,
    pub error: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(Summary::default(), |mut summary, result| {
            match result.status {
                LinkStatus::Ok => summary.ok += 1,
                LinkStatus::Broken => summary.broken += 1,
                LinkStatus::Timeout => summary.timeout += 1,
                LinkStatus::Unknown => summary.unknown += 1,
                LinkStatus::Error => summary.error += 1,
                LinkStatus::Queued | LinkStatus::Checking => {}
            }
            summary
        })
    }

    /// Number of results that prove a link is bad.
    pub fn failures(&self) -> usize {
        self.broken + self.error
    }
}

/// Process exit code for a finished check.
///
/// 0 when nothing is proven bad, 1 when at least one link is `broken` or
/// `error`. `timeout` and `unknown` never fail a run.
pub fn exit_code(results: &[CheckResult]) -> i32 {
    if Summary::from_results(results).failures() > 0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: LinkStatus) -> CheckResult {
        CheckResult {
            url: "https://example.com".to_string(),
            status,
            code: None,
            error: None,
        }
    }

    #[test]
    fn test_summary_counts_terminal_states_only() {
        let results = vec![
            result(LinkStatus::Ok),
            result(LinkStatus::Ok),
            result(LinkStatus::Broken),
            result(LinkStatus::Timeout),
            result(LinkStatus::Unknown),
            result(LinkStatus::Error),
            result(LinkStatus::Queued),
            result(LinkStatus::Checking),
        ];

        let summary = Summary::from_results(&results);
        assert_eq!(
            summary,
            Summary {
                ok: 2,
                broken: 1,
                timeout: 1,
                unknown: 1,
                error: 1,
            }
        );
        assert_eq!(summary.failures(), 2);
    }

    #[test]
    fn test_exit_code_ignores_inconclusive_results() {
        let inconclusive = vec![
            result(LinkStatus::Timeout),
            result(LinkStatus::Unknown),
            result(LinkStatus::Ok),
        ];
        assert_eq!(exit_code(&inconclusive), 0);
        assert_eq!(exit_code(&[]), 0);
    }

    #[test]
    fn test_exit_code_fails_on_broken_or_error() {
        let mut with_broken = vec![result(LinkStatus::Timeout), result(LinkStatus::Ok)];
        with_broken.push(result(LinkStatus::Broken));
        assert_eq!(exit_code(&with_broken), 1);

        let with_error = vec![result(LinkStatus::Unknown), result(LinkStatus::Error)];
        assert_eq!(exit_code(&with_error), 1);
    }

    #[test]
    fn test_failure_statuses() {
        assert!(LinkStatus::Broken.is_failure());
        assert!(LinkStatus::Error.is_failure());
        assert!(!LinkStatus::Timeout.is_failure());
        assert!(!LinkStatus::Unknown.is_failure());
        assert!(!LinkStatus::Ok.is_failure());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!LinkStatus::Queued.is_terminal());
        assert!(!LinkStatus::Checking.is_terminal());
        assert!(LinkStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_json_shape() {
        let broken = CheckResult {
            url: "https://example.com/gone".to_string(),
            status: LinkStatus::Broken,
            code: Some(410),
            error: None,
        };
        let json = serde_json::to_value(&broken).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://example.com/gone",
                "status": "broken",
                "code": 410
            })
        );

        let queued = serde_json::to_value(CheckResult::queued("https://a.com")).unwrap();
        assert_eq!(queued["status"], "queued");
        assert!(queued["code"].is_null());
    }
}
