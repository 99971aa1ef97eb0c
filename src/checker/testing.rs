// src/checker/testing.rs
// Scripted HttpTransport for unit tests: no sockets, replies chosen per
// (method, url), and a record of how many requests were in flight at once.

use super::transport::{HttpTransport, ProbeMethod, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Status(u16),
    /// Answer with a status after waiting
    Delayed(Duration, u16),
    Fail(TransportError),
    /// Never answers; only a timeout ends it
    Hang,
}

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<HashMap<(ProbeMethod, String), Reply>>,
    fallback: Mutex<Option<Reply>>,
    calls: Mutex<Vec<(ProbeMethod, String)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on(self, method: ProbeMethod, url: &str, reply: Reply) -> Self {
        self.set(method, url, reply);
        self
    }

    /// Reply used for both methods of `url`
    pub(crate) fn on_any(self, url: &str, reply: Reply) -> Self {
        self.set_any(url, reply);
        self
    }

    /// Reply for anything not scripted (default: 200)
    pub(crate) fn otherwise(self, reply: Reply) -> Self {
        *self.fallback.lock().unwrap() = Some(reply);
        self
    }

    pub(crate) fn set(&self, method: ProbeMethod, url: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert((method, url.to_string()), reply);
    }

    /// Rescripts both methods of `url`
    pub(crate) fn set_any(&self, url: &str, reply: Reply) {
        self.set(ProbeMethod::Head, url, reply.clone());
        self.set(ProbeMethod::Get, url, reply);
    }

    pub(crate) fn calls(&self) -> Vec<(ProbeMethod, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn reply_for(&self, method: ProbeMethod, url: &str) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .get(&(method, url.to_string()))
            .cloned()
            .or_else(|| self.fallback.lock().unwrap().clone())
            .unwrap_or(Reply::Status(200))
    }
}

// Decrements the in-flight counter even when the request future is dropped
// by a timeout
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, method: ProbeMethod, url: &str) -> Result<u16, TransportError> {
        self.calls.lock().unwrap().push((method, url.to_string()));
        let reply = self.reply_for(method, url);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        match reply {
            Reply::Status(code) => {
                tokio::task::yield_now().await;
                Ok(code)
            }
            Reply::Delayed(delay, code) => {
                tokio::time::sleep(delay).await;
                Ok(code)
            }
            Reply::Fail(error) => Err(error),
            Reply::Hang => futures::future::pending().await,
        }
    }
}
