//! Mutex-guarded limiter for concurrent workers

use crate::{LimiterError, RateLimiter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`RateLimiter`] shared between ingestion workers
///
/// Every `acquire` runs under one mutex, so concurrent workers cannot
/// corrupt the window count. Cloning yields another handle to the same
/// limiter.
#[derive(Debug, Clone)]
pub struct SharedRateLimiter {
    inner: Arc<Mutex<RateLimiter>>,
}

impl SharedRateLimiter {
    /// Create a shared limiter accepting at most `max_per_second` calls per window
    pub fn new(max_per_second: u32) -> Result<Self, LimiterError> {
        Ok(Self::from_limiter(RateLimiter::new(max_per_second)?))
    }

    /// Wrap an existing limiter
    pub fn from_limiter(limiter: RateLimiter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(limiter)),
        }
    }

    /// Try to take a slot at time `now`; see [`RateLimiter::acquire`]
    pub fn acquire(&self, now: u64) -> bool {
        self.lock().acquire(now)
    }

    /// Take a slot, or report when one frees up
    ///
    /// Returns `Ok(())` if a slot was taken, `Err(retry_at)` otherwise. Both
    /// steps happen under one lock.
    pub fn try_acquire(&self, now: u64) -> Result<(), u64> {
        let mut limiter = self.lock();
        if limiter.acquire(now) {
            return Ok(());
        }
        Err(limiter.next_available_at().unwrap_or(now))
    }

    /// Number of accepted calls still inside the window at `now`
    pub fn in_window(&self, now: u64) -> usize {
        self.lock().in_window(now)
    }

    /// Configured maximum per window
    pub fn max_per_second(&self) -> u32 {
        self.lock().max_per_second()
    }

    /// Forget all accepted calls
    pub fn reset(&self) {
        self.lock().reset();
    }

    // The window holds only timestamps, so a panic mid-update cannot leave
    // it inconsistent; a poisoned lock is taken over.
    fn lock(&self) -> MutexGuard<'_, RateLimiter> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
