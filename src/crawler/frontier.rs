//! Shared crawl frontier
//!
//! The frontier owns everything the crawl workers share:
//! - the pending queue of candidate URLs (breadth-first by submission order)
//! - the set of URLs ever queued, for deduplication
//! - the set of visited URLs
//! - the accumulated page records, bounded by the page cap
//!
//! All of it lives behind one mutex so that every operation observes and
//! leaves a consistent state. A `Notify` wakes workers that are parked
//! waiting for other workers' discoveries.

use crate::page::PageRecord;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use url::Url;

/// Counters describing the frontier at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierStats {
    pub pending: usize,
    pub visited: usize,
    pub results: usize,
    pub in_flight: usize,
}

#[derive(Debug, Default)]
struct FrontierState {
    pending: VecDeque<Url>,
    /// Every URL ever accepted into `pending`
    queued: HashSet<String>,
    visited: HashSet<String>,
    results: Vec<PageRecord>,
    in_flight: usize,
    closed: bool,
}

impl FrontierState {
    fn push(&mut self, url: Url) -> bool {
        let key = url.as_str().to_string();
        if self.visited.contains(&key) || !self.queued.insert(key) {
            return false;
        }
        self.pending.push_back(url);
        true
    }
}

/// Thread-safe queue + visited set + result accumulator with a page cap
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    notify: Notify,
    page_cap: usize,
}

impl Frontier {
    /// Creates an empty frontier that accepts at most `page_cap` results
    pub fn new(page_cap: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            notify: Notify::new(),
            page_cap,
        }
    }

    /// Returns the configured page cap
    pub fn page_cap(&self) -> usize {
        self.page_cap
    }

    /// Appends candidates that are not already visited or queued
    ///
    /// # Returns
    ///
    /// The number of candidates actually added
    pub fn seed<I>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = Url>,
    {
        let mut added = 0;
        {
            let mut state = self.lock();
            if state.closed {
                return 0;
            }
            for url in urls {
                if state.push(url) {
                    added += 1;
                }
            }
        }

        if added > 0 {
            self.notify.notify_waiters();
        }
        added
    }

    /// Appends newly discovered links; same deduplication as `seed`
    pub fn discovered<I>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = Url>,
    {
        self.seed(urls)
    }

    /// Takes the next candidate and marks it visited in one step
    ///
    /// The caller owns an in-flight slot until it calls `complete`. While
    /// the queue is empty but other workers are in flight, or while the
    /// in-flight pages alone could fill the cap, this waits for them.
    ///
    /// # Returns
    ///
    /// * `Some(Url)` - The next URL to process
    /// * `None` - The cap is reached, the frontier is closed, or no work is
    ///   left anywhere
    pub async fn next(&self) -> Option<Url> {
        loop {
            let notified = self.notify.notified();
            {
                let mut state = self.lock();

                if state.closed || state.results.len() >= self.page_cap {
                    return None;
                }

                if state.results.len() + state.in_flight < self.page_cap {
                    if let Some(url) = state.pending.pop_front() {
                        state.visited.insert(url.as_str().to_string());
                        state.in_flight += 1;
                        tracing::trace!(
                            "Dequeued {} ({} pending, {} in flight)",
                            url,
                            state.pending.len(),
                            state.in_flight
                        );
                        return Some(url);
                    }
                }

                if state.in_flight == 0 {
                    return None;
                }
            }
            notified.await;
        }
    }

    /// Releases the in-flight slot taken by `next`
    pub fn complete(&self) {
        {
            let mut state = self.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.notify.notify_waiters();
    }

    /// Appends a page record if the cap has not been reached
    ///
    /// # Returns
    ///
    /// * `true` - The record was kept
    /// * `false` - The cap was already reached or the frontier is closed
    pub fn record(&self, record: PageRecord) -> bool {
        let accepted = {
            let mut state = self.lock();
            if state.closed || state.results.len() >= self.page_cap {
                false
            } else {
                state.results.push(record);
                true
            }
        };

        if accepted {
            self.notify.notify_waiters();
        }
        accepted
    }

    /// Returns true once the results have reached the page cap
    pub fn is_full(&self) -> bool {
        self.lock().results.len() >= self.page_cap
    }

    /// Stops handing out work and freezes the results
    pub fn close(&self) {
        self.lock().closed = true;
        self.notify.notify_waiters();
    }

    /// Returns a copy of the records accumulated so far
    pub fn results(&self) -> Vec<PageRecord> {
        self.lock().results.clone()
    }

    /// Closes the frontier and moves the accumulated records out
    pub fn take_results(&self) -> Vec<PageRecord> {
        let mut state = self.lock();
        state.closed = true;
        std::mem::take(&mut state.results)
    }

    /// Returns true if the URL has been handed out by `next`
    pub fn is_visited(&self, url: &Url) -> bool {
        self.lock().visited.contains(url.as_str())
    }

    /// Returns a consistent snapshot of the frontier counters
    pub fn stats(&self) -> FrontierStats {
        let state = self.lock();
        FrontierStats {
            pending: state.pending.len(),
            visited: state.visited.len(),
            results: state.results.len(),
            in_flight: state.in_flight,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // A panicking worker cannot leave the state half-updated: every
        // critical section is a handful of infallible collection calls.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
