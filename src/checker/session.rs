// src/checker/session.rs
// =============================================================================
// LinkChecker: the object a front end talks to.
//
// It owns the transport and the published state of the current run:
// - results: one row per extracted URL
// - progress: done/total
//
// Both live in tokio watch channels. A front end can read the latest value
// at any time (results(), progress()) or subscribe and wake up on changes.
//
// Publication order for run(text):
// 1. the queued placeholders and {done: 0, total}
// 2. progress after every finished probe
// 3. the complete result list once every worker is done
//
// Every run() gets a new generation number. A run or recheck that finishes
// after a newer run started is stale and publishes nothing.
// =============================================================================

use super::pool::{run_all, CheckOptions};
use super::probe::probe;
use super::status::{CheckResult, LinkStatus, RunProgress, Summary};
use super::transport::HttpTransport;
use crate::extract::extract_urls;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Why a recheck did not replace anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecheckError {
    #[error("no result at index {index} (current run has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("a run is still in progress")]
    RunInProgress,
    #[error("a new run started before the recheck finished")]
    Superseded,
}

/// Extraction plus checking, with results published to observers.
pub struct LinkChecker<T> {
    transport: T,
    options: CheckOptions,
    results: watch::Sender<Vec<CheckResult>>,
    progress: watch::Sender<RunProgress>,
    generation: AtomicU64,
    // Set while the current generation's run has not published its final list
    running: AtomicBool,
}

impl<T: HttpTransport> LinkChecker<T> {
    pub fn new(transport: T, options: CheckOptions) -> Self {
        let (results, _) = watch::channel(Vec::new());
        let (progress, _) = watch::channel(RunProgress::default());

        Self {
            transport,
            options,
            results,
            progress,
            generation: AtomicU64::new(0),
            running: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> CheckOptions {
        self.options
    }

    /// Snapshot of the published results.
    pub fn results(&self) -> Vec<CheckResult> {
        self.results.borrow().clone()
    }

    pub fn progress(&self) -> RunProgress {
        *self.progress.borrow()
    }

    /// Counts per status over the published results.
    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results.borrow())
    }

    pub fn subscribe_results(&self) -> watch::Receiver<Vec<CheckResult>> {
        self.results.subscribe()
    }

    /// True while a run is checking and has not published its final list.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<RunProgress> {
        self.progress.subscribe()
    }

    /// Extracts the URLs in `text` and checks all of them.
    ///
    /// Replaces whatever the previous run published. Returns the final
    /// results, which are also published unless a newer run has started
    /// in the meantime.
    pub async fn run(&self, text: &str) -> Vec<CheckResult> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.running.store(true, Ordering::SeqCst);
        let urls = extract_urls(text);
        let total = urls.len();

        debug!(generation, total, "starting link check");

        self.results
            .send_replace(urls.iter().map(CheckResult::queued).collect());
        self.progress.send_replace(RunProgress { done: 0, total });

        let results = run_all(&self.transport, &urls, self.options, |progress| {
            if self.is_current(generation) {
                self.progress.send_replace(progress);
            }
        })
        .await;

        if self.is_current(generation) {
            let summary = Summary::from_results(&results);
            debug!(
                generation,
                ok = summary.ok,
                broken = summary.broken,
                timeout = summary.timeout,
                unknown = summary.unknown,
                error = summary.error,
                "link check finished"
            );
            self.results.send_replace(results.clone());
            // Only the current run owns the flag; a stale run leaves it alone
            self.running.store(false, Ordering::SeqCst);
        } else {
            debug!(generation, "run was superseded, results dropped");
        }

        results
    }

    /// Checks one URL again and replaces slot `index` with the outcome.
    ///
    /// Runs outside the worker pool and leaves every other slot and the
    /// progress counter alone. The slot shows `checking` while the probe
    /// is in flight.
    ///
    /// Refused while a run is in progress: the run's final list would
    /// overwrite the slot.
    pub async fn recheck_one(&self, url: &str, index: usize) -> Result<CheckResult, RecheckError> {
        let generation = self.generation.load(Ordering::SeqCst);

        if self.is_running() {
            warn!(index, url, "recheck refused while a run is in progress");
            return Err(RecheckError::RunInProgress);
        }

        let len = self.results.borrow().len();
        if index >= len {
            warn!(index, len, url, "recheck for a slot that does not exist");
            return Err(RecheckError::IndexOutOfRange { index, len });
        }

        self.replace_slot(index, CheckResult::checking(url));

        let result = probe(&self.transport, url, self.options.timeout).await;

        if !self.is_current(generation) {
            debug!(index, url, "recheck finished after a new run started, dropped");
            return Err(RecheckError::Superseded);
        }

        self.replace_slot(index, result.clone());
        Ok(result)
    }

    /// Rechecks every `timeout` and `unknown` slot once, one after another,
    /// and returns the published results afterwards.
    ///
    /// Those two statuses don't prove anything about the link, so a second
    /// look often settles them. `broken`, `error` and `ok` are left alone.
    pub async fn recheck_inconclusive(&self) -> Result<Vec<CheckResult>, RecheckError> {
        let targets: Vec<(usize, String)> = self
            .results()
            .into_iter()
            .enumerate()
            .filter(|(_, r)| matches!(r.status, LinkStatus::Timeout | LinkStatus::Unknown))
            .map(|(index, r)| (index, r.url))
            .collect();

        for (index, url) in targets {
            debug!(index, url = %url, "rechecking inconclusive link");
            self.recheck_one(&url, index).await?;
        }

        Ok(self.results())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn replace_slot(&self, index: usize, result: CheckResult) {
        self.results.send_modify(|results| {
            if let Some(slot) = results.get_mut(index) {
                *slot = result;
            }
        });
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a watch channel?
//    - A channel that only keeps the latest value
//    - Receivers can borrow() it at any time or await changed()
//    - Good fit for "current state" like results and progress, where a slow
//      observer only cares about the newest value
//
// 2. Why send_replace instead of send?
//    - send() fails when nobody is subscribed
//    - send_replace() always stores the value, subscribers or not
//
// 3. Why AtomicU64 / AtomicBool?
//    - Every method takes &self, so the generation counter and the running
//      flag need interior mutability
//    - Atomics give that without a lock and keep LinkChecker Sync
//
// 4. What does `?` do inside recheck_inconclusive?
//    - It stops at the first RecheckError and returns it to the caller
// -----------------------------------------------------------------------------
