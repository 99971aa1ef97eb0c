// src/report.rs
// =============================================================================
// Turns check results into text for the terminal.
//
// Three formats:
// - table: human-readable rows plus a summary block (default)
// - json: { video_url, summary, results } pretty-printed
// - csv: url,status,code with the URL JSON-quoted, ready to paste into a
//   spreadsheet
//
// Everything here returns a String instead of printing, so the CLI decides
// where output goes and tests can look at it.
// =============================================================================

use crate::checker::{CheckResult, LinkStatus, Summary};
use serde::Serialize;
use std::fmt::Write;

// Longest URL shown in the table before it gets cut with "..."
const URL_COLUMN: usize = 60;

#[derive(Serialize)]
struct JsonReport<'a> {
    video_url: Option<&'a str>,
    summary: Summary,
    results: &'a [CheckResult],
}

/// Renders the pretty-printed JSON report.
pub fn render_json(
    results: &[CheckResult],
    video_url: Option<&str>,
) -> serde_json::Result<String> {
    let report = JsonReport {
        video_url,
        summary: Summary::from_results(results),
        results,
    };
    serde_json::to_string_pretty(&report)
}

/// Renders `url,status,code` CSV with a header row.
pub fn render_csv(results: &[CheckResult]) -> String {
    let mut csv = String::from("url,status,code\n");
    for result in results {
        // JSON string syntax doubles as CSV quoting for URLs
        let quoted = serde_json::Value::String(result.url.clone());
        let code = result.code.map(|c| c.to_string()).unwrap_or_default();
        let _ = writeln!(csv, "{},{},{}", quoted, result.status, code);
    }
    csv
}

/// Renders the table and the summary block.
pub fn render_table(results: &[CheckResult], video_url: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(video_url) = video_url {
        let _ = writeln!(out, "🎬 Video: {}\n", video_url);
    }

    let _ = writeln!(out, "{:<60} {:<18} {}", "URL", "STATUS", "DETAIL");
    let _ = writeln!(out, "{}", "=".repeat(100));

    for result in results {
        let detail = result.error.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "{:<60} {:<18} {}",
            truncate_url(&result.url),
            format_status(result),
            detail
        );
    }

    let summary = Summary::from_results(results);
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Summary:");
    let _ = writeln!(out, "   ✅ OK: {}", summary.ok);
    let _ = writeln!(out, "   ❌ Broken: {}", summary.broken);
    let _ = writeln!(out, "   ⚠️  Error: {}", summary.error);
    let _ = writeln!(out, "   ⏱️  Timeout: {}", summary.timeout);
    let _ = writeln!(out, "   ❓ Unknown: {}", summary.unknown);
    let _ = writeln!(out, "   📋 Total: {}", results.len());

    out
}

fn truncate_url(url: &str) -> String {
    if url.chars().count() > URL_COLUMN - 3 {
        let head: String = url.chars().take(URL_COLUMN - 6).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}

// Status label, with the HTTP code when there is one
fn format_status(result: &CheckResult) -> String {
    let label = match result.status {
        LinkStatus::Ok => "✅ OK",
        LinkStatus::Broken => "❌ BROKEN",
        LinkStatus::Error => "⚠️  ERROR",
        LinkStatus::Timeout => "⏱️  TIMEOUT",
        LinkStatus::Unknown => "❓ UNKNOWN",
        LinkStatus::Queued => "⏳ QUEUED",
        LinkStatus::Checking => "🔄 CHECKING",
    };

    match result.code {
        Some(code) => format!("{} {}", label, code),
        None => label.to_string(),
    }
}
