// src/lib.rs
// =============================================================================
// linkpulse: find the links in a pasted video description and check which
// ones still work.
//
// The library is the engine; src/main.rs is the command-line front end.
//
// - extract: free text -> ordered, deduplicated list of URLs
// - checker: HEAD-then-GET probes, the worker pool, and LinkChecker
// - config: defaults, TOML file, command-line overrides
// - report: table / JSON / CSV rendering
// - logging: tracing subscriber setup
// =============================================================================

pub mod checker;
pub mod config;
pub mod extract;
pub mod logging;
pub mod report;

pub use checker::{
    exit_code, CheckOptions, CheckResult, HttpTransport, LinkChecker, LinkStatus, ReqwestTransport,
    RunProgress, Summary, TransportError,
};
pub use config::Config;
pub use extract::{extract_urls, split_pasted_url};
