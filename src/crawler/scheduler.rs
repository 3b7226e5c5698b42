//! Fetch scheduling for harvest passes
//!
//! This module handles:
//! - Bounding the number of concurrent fetches via a semaphore
//! - Spacing requests to the same origin by a minimum delay
//!
//! Passes never overlap, so one scheduler shared by every pass bounds each
//! pass on its own.

use crate::config::CrawlerConfig;
use crate::url::extract_origin;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

/// Gate that every page fetch passes through
///
/// Cloning is cheap; clones share the same permits and origin slots.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    semaphore: Arc<Semaphore>,

    /// Earliest instant the next request to each origin may start
    next_slot: Arc<Mutex<HashMap<String, Instant>>>,

    /// Minimum time between requests to the same origin
    delay: Duration,

    max_concurrent: usize,
}

impl Scheduler {
    /// Creates a scheduler from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        let max_concurrent = config.max_concurrent_fetches.max(1) as usize;
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            next_slot: Arc::new(Mutex::new(HashMap::new())),
            delay: Duration::from_millis(config.request_delay_ms),
            max_concurrent,
        }
    }

    /// Maximum number of fetches in flight at once
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Waits for a fetch slot for `url`
    ///
    /// The returned permit must be held for the duration of the fetch.
    /// Returns `None` only if the semaphore has been closed.
    pub async fn acquire(&self, url: &str) -> Option<OwnedSemaphorePermit> {
        let permit = self.semaphore.clone().acquire_owned().await.ok()?;

        let wait = self.reserve_slot(&extract_origin(url), Instant::now());
        if !wait.is_zero() {
            tracing::trace!("Waiting {:?} before requesting {}", wait, url);
            tokio::time::sleep(wait).await;
        }

        Some(permit)
    }

    /// Books the next request slot for an origin and returns how long to wait
    fn reserve_slot(&self, origin: &str, now: Instant) -> Duration {
        let mut slots = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(origin.to_string()).or_insert(now);
        let start = (*slot).max(now);
        *slot = start + self.delay;
        start.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(max: u32, delay_ms: u64) -> Scheduler {
        Scheduler::new(&CrawlerConfig {
            max_concurrent_fetches: max,
            request_delay_ms: delay_ms,
            request_timeout_secs: 30,
        })
    }

    #[test]
    fn test_same_origin_requests_are_spaced() {
        let scheduler = scheduler(4, 100);
        let now = Instant::now();

        assert_eq!(scheduler.reserve_slot("example.edu", now), Duration::ZERO);
        assert_eq!(
            scheduler.reserve_slot("example.edu", now),
            Duration::from_millis(100)
        );
        assert_eq!(
            scheduler.reserve_slot("example.edu", now),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_origins_are_independent() {
        let scheduler = scheduler(4, 100);
        let now = Instant::now();

        assert_eq!(scheduler.reserve_slot("a.example.edu", now), Duration::ZERO);
        assert_eq!(scheduler.reserve_slot("b.example.edu", now), Duration::ZERO);
    }

    #[test]
    fn test_elapsed_delay_does_not_wait() {
        let scheduler = scheduler(4, 100);
        let now = Instant::now();

        scheduler.reserve_slot("example.edu", now);
        let later = now + Duration::from_millis(250);
        assert_eq!(scheduler.reserve_slot("example.edu", later), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_permits_bound_concurrency() {
        let scheduler = scheduler(2, 0);
        assert_eq!(scheduler.max_concurrent(), 2);

        let first = scheduler.acquire("https://example.edu/a").await;
        let second = scheduler.acquire("https://example.edu/b").await;
        assert!(first.is_some() && second.is_some());
        assert_eq!(scheduler.semaphore.available_permits(), 0);

        drop(first);
        assert_eq!(scheduler.semaphore.available_permits(), 1);
    }
}
