// src/checker/transport.rs
// =============================================================================
// The HTTP side of a probe.
//
// The probe logic only needs one thing from the network: "send this method
// to this URL and tell me the status code, or tell me what kind of failure
// happened". That is the HttpTransport trait. Keeping it a trait lets tests
// script responses without a network, and keeps reqwest details in one file.
//
// Failures come back as a closed enum (TransportError) so the probe can
// classify them with a match instead of looking at error message text.
// =============================================================================

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{redirect, Client, Method};
use std::fmt;
use thiserror::Error;
use url::Url;

/// HTTP method used by a probe phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMethod {
    Head,
    Get,
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeMethod::Head => f.write_str("HEAD"),
            ProbeMethod::Get => f.write_str("GET"),
        }
    }
}

/// Why a request produced no HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// DNS, connection, TLS, redirect loop, malformed URL...
    #[error("{0}")]
    NetworkFailure(String),
    /// The deadline for this attempt elapsed
    #[error("timeout")]
    Timeout,
    /// A response arrived but its status cannot be inspected (cross-origin)
    #[error("opaque response: {0}")]
    CrossOriginOpaque(String),
}

/// Something that can send one request and report its status code.
///
/// Implementations follow redirects themselves. They do not need to enforce
/// a deadline: the probe wraps every call in its own timeout.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, method: ProbeMethod, url: &str) -> Result<u16, TransportError>;
}

/// The real transport, backed by a reqwest client.
///
/// Clone is cheap: reqwest's Client is reference counted internally, so
/// clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client that follows up to `config.max_redirects` redirects
    /// and sends `config.user_agent`.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, method: ProbeMethod, url: &str) -> Result<u16, TransportError> {
        // Catch garbage before reqwest does, with a readable message
        let parsed = Url::parse(url)
            .map_err(|e| TransportError::NetworkFailure(format!("invalid URL: {}", e)))?;

        let method = match method {
            ProbeMethod::Head => Method::HEAD,
            ProbeMethod::Get => Method::GET,
        };

        // We only look at the status line; the body is dropped unread
        let response = self
            .client
            .request(method, parsed)
            .send()
            .await
            .map_err(categorize_error)?;

        Ok(response.status().as_u16())
    }
}

// Sorts a reqwest error into one of our failure kinds.
//
// reqwest exposes what went wrong through is_*() predicates; we use those
// rather than the Display text to decide the kind. The message is only for
// people reading the output.
fn categorize_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout;
    }

    let message = if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("could not connect: {}", root_cause(&error))
    } else if error.is_builder() {
        format!("invalid request: {}", root_cause(&error))
    } else {
        root_cause(&error)
    };

    TransportError::NetworkFailure(message)
}

// reqwest wraps hyper wraps io; the innermost error says the most
fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - It lets a trait have async methods that work with generics and
//      trait objects alike
//    - Under the hood each async fn returns a boxed future
//
// 2. Why `Send + Sync` on the trait?
//    - A transport is shared by reference between many in-flight probes
//    - async_trait makes the returned futures Send, which needs &self: Send,
//      which in turn needs Self: Sync
//
// 3. What is thiserror?
//    - A derive macro that writes the Display and Error impls for an enum
//    - #[error("...")] is the message printed for that variant
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(ProbeMethod::Head.to_string(), "HEAD");
        assert_eq!(ProbeMethod::Get.to_string(), "GET");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TransportError::Timeout.to_string(), "timeout");
        assert_eq!(
            TransportError::NetworkFailure("could not connect".into()).to_string(),
            "could not connect"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_failure() {
        let transport = ReqwestTransport::new(&Config::default()).unwrap();
        let result = transport.send(ProbeMethod::Head, "not a url").await;
        assert!(matches!(result, Err(TransportError::NetworkFailure(msg)) if msg.starts_with("invalid URL")));
    }
}
