// src/checker/pool.rs
// =============================================================================
// Runs probes for a whole URL list with a fixed concurrency cap.
//
// How it works:
// 1. Start min(cap, urls.len()) workers
// 2. Each worker claims the next index from a shared cursor, probes that
//    URL and writes the result into the slot with the same index
// 3. A worker stops when the cursor runs past the end of the list
// 4. When every worker has stopped, the slots are returned in order
//
// All workers are futures polled by one task (join_all), not spawned tasks.
// They interleave only at .await points, and there is no .await between
// reading the cursor and bumping it, or between getting a result and
// storing it. So a Cell and a RefCell are enough: no two workers can claim
// the same index, and no borrow is ever held across a suspension.
//
// Results land by index, not in completion order, so the output order is
// always the extraction order.
// =============================================================================

use super::probe::{probe, DEFAULT_TIMEOUT};
use super::status::{CheckResult, LinkStatus, RunProgress};
use super::transport::HttpTransport;
use futures::future::join_all;
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Default number of probes allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Knobs for a checking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Maximum number of probes in flight (values below 1 are treated as 1)
    pub concurrency: usize,
    /// Deadline for each HEAD and each GET
    pub timeout: Duration,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Probes every URL with at most `options.concurrency` probes in flight.
///
/// `on_progress` is called once after each probe finishes, with `done`
/// counting up from 1 to `urls.len()`. The returned list has one result per
/// URL, in the same order as `urls`.
pub async fn run_all<T, F>(
    transport: &T,
    urls: &[String],
    options: CheckOptions,
    on_progress: F,
) -> Vec<CheckResult>
where
    T: HttpTransport + ?Sized,
    F: Fn(RunProgress),
{
    let pool = Pool {
        transport,
        urls,
        timeout: options.timeout,
        cursor: Cell::new(0),
        done: Cell::new(0),
        slots: RefCell::new(urls.iter().map(CheckResult::queued).collect()),
        on_progress,
    };

    let workers = options.concurrency.max(1).min(urls.len());
    join_all((0..workers).map(|_| pool.worker())).await;

    pool.slots.into_inner()
}

// State shared by the workers of one run
struct Pool<'a, T: ?Sized, F> {
    transport: &'a T,
    urls: &'a [String],
    timeout: Duration,
    cursor: Cell<usize>,
    done: Cell<usize>,
    slots: RefCell<Vec<CheckResult>>,
    on_progress: F,
}

impl<T, F> Pool<'_, T, F>
where
    T: HttpTransport + ?Sized,
    F: Fn(RunProgress),
{
    // Claim-and-advance in one step; no await in here
    fn claim(&self) -> Option<usize> {
        let index = self.cursor.get();
        if index >= self.urls.len() {
            return None;
        }
        self.cursor.set(index + 1);
        self.slots.borrow_mut()[index].status = LinkStatus::Checking;
        Some(index)
    }

    async fn worker(&self) {
        while let Some(index) = self.claim() {
            let result = probe(self.transport, &self.urls[index], self.timeout).await;

            self.slots.borrow_mut()[index] = result;
            self.done.set(self.done.get() + 1);

            (self.on_progress)(RunProgress {
                done: self.done.get(),
                total: self.urls.len(),
            });
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Cell and RefCell instead of a Mutex?
//    - Cell/RefCell give mutation through a shared reference (&self)
//    - They are not thread-safe, and they don't need to be: every worker is
//      polled by the same task, one at a time
//    - RefCell panics on overlapping borrows; we never hold a borrow across
//      an .await, so borrows can't overlap
//
// 2. What does join_all do?
//    - Takes many futures and polls all of them until every one finishes
//    - Unlike tokio::spawn, nothing runs on another thread
//
// 3. Why is `pool.worker()` allowed to borrow `pool`?
//    - join_all is awaited before `pool.slots.into_inner()`, so every
//      borrow has ended by the time we take the slots out
// -----------------------------------------------------------------------------
