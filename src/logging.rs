// src/logging.rs
// =============================================================================
// Sets up tracing for the binary.
//
// Everything goes to stderr so stdout stays clean for results. By default
// only warnings show up; --verbose adds per-link debug lines. RUST_LOG, when
// set, replaces both.
// =============================================================================

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,linkpulse=debug";

/// Initialize structured logging to stderr.
///
/// stdout is reserved for results (table, JSON or CSV), so log lines never
/// end up mixed into piped output. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
