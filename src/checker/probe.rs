// src/checker/probe.rs
// =============================================================================
// Checks one URL: HEAD first, GET as a fallback.
//
// Many servers answer HEAD with 403/405 or drop it entirely, so a failed
// HEAD proves nothing. Only the GET phase is allowed to report a failure.
//
//   HEAD 2xx                       -> ok
//   otherwise GET:
//     2xx                          -> ok
//     404 / 410                    -> broken
//     any other status             -> error   (code kept)
//     deadline elapsed             -> timeout
//     failed without a status      -> unknown (diagnostic kept)
//
// Each phase gets its own fresh deadline. tokio::time::timeout owns the
// timer, so it is gone as soon as the phase settles and can never fire into
// the next request.
// =============================================================================

use super::status::{CheckResult, LinkStatus};
use super::transport::{HttpTransport, ProbeMethod, TransportError};
use std::time::Duration;
use tracing::debug;

/// Default per-phase deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Probes `url` and classifies the outcome. Never fails: every failure ends
/// up in the returned result's `status` and `error`.
pub async fn probe<T>(transport: &T, url: &str, timeout: Duration) -> CheckResult
where
    T: HttpTransport + ?Sized,
{
    // Phase 1: HEAD. Only a 2xx is trusted, everything else falls through
    match attempt(transport, ProbeMethod::Head, url, timeout).await {
        Ok(code) if is_success(code) => return ok(url, code),
        Ok(code) => debug!(url, code, "HEAD not successful, falling back to GET"),
        Err(error) => debug!(url, %error, "HEAD failed, falling back to GET"),
    }

    // Phase 2: GET decides the final status
    let result = match attempt(transport, ProbeMethod::Get, url, timeout).await {
        Ok(code) => classify_status(url, code),
        Err(error) => classify_failure(url, error),
    };

    debug!(url, status = %result.status, code = ?result.code, "probe finished");
    result
}

// One request with its own deadline
async fn attempt<T>(
    transport: &T,
    method: ProbeMethod,
    url: &str,
    timeout: Duration,
) -> Result<u16, TransportError>
where
    T: HttpTransport + ?Sized,
{
    // Rust concept: timeout() wraps the future; Err means the deadline won
    match tokio::time::timeout(timeout, transport.send(method, url)).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => Err(TransportError::Timeout),
    }
}

fn is_success(code: u16) -> bool {
    (200..300).contains(&code)
}

fn ok(url: &str, code: u16) -> CheckResult {
    CheckResult {
        url: url.to_string(),
        status: LinkStatus::Ok,
        code: Some(code),
        error: None,
    }
}

// Classifies a GET response that did arrive
fn classify_status(url: &str, code: u16) -> CheckResult {
    if is_success(code) {
        return ok(url, code);
    }

    let status = match code {
        404 | 410 => LinkStatus::Broken,
        _ => LinkStatus::Error,
    };

    CheckResult {
        url: url.to_string(),
        status,
        code: Some(code),
        error: None,
    }
}

// Classifies a GET that produced no status at all
fn classify_failure(url: &str, error: TransportError) -> CheckResult {
    let status = match error {
        TransportError::Timeout => LinkStatus::Timeout,
        TransportError::NetworkFailure(_) | TransportError::CrossOriginOpaque(_) => {
            LinkStatus::Unknown
        }
    };

    CheckResult {
        url: url.to_string(),
        status,
        code: None,
        error: Some(error.to_string()),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `T: HttpTransport + ?Sized` mean?
//    - probe() works with any transport: the real reqwest one or a scripted
//      one in tests
//    - ?Sized also allows `&dyn HttpTransport` to be passed in
//
// 2. Why does probe() return CheckResult and not Result<CheckResult, _>?
//    - A dead link is an answer, not a failure of our program
//    - Network errors become LinkStatus::Unknown with the message kept
//
// 3. What happens to the timer when a request finishes early?
//    - timeout() owns it, so it is dropped together with the future
//    - No cleanup code needed
// -----------------------------------------------------------------------------
