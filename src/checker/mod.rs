// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - status: result records (LinkStatus, CheckResult, RunProgress, Summary)
// - transport: the HttpTransport trait and its reqwest implementation
// - probe: HEAD-then-GET check of a single URL
// - pool: runs probes for a list of URLs with a concurrency cap
// - session: LinkChecker, which publishes results to a front end
// =============================================================================

mod pool;
mod probe;
mod session;
mod status;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use pool::{run_all, CheckOptions, DEFAULT_CONCURRENCY};
pub use probe::{probe, DEFAULT_TIMEOUT};
pub use session::{LinkChecker, RecheckError};
pub use status::{exit_code, CheckResult, LinkStatus, RunProgress, Summary};
pub use transport::{HttpTransport, ProbeMethod, ReqwestTransport, TransportError};
