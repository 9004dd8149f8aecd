//! Sliding-window rate limiter

use crate::LimiterError;
use std::collections::VecDeque;

/// Length of the rolling window in milliseconds
pub const WINDOW_MS: u64 = 1_000;

/// Bounds accepted calls to at most `max_per_second` in any trailing second
///
/// The window slides with each call rather than resetting on fixed
/// boundaries, so a burst straddling a second boundary cannot get twice the
/// allowance. Time is always passed in; the limiter never reads a clock.
///
/// Not synchronized: workers sharing one limiter go through
/// [`SharedRateLimiter`](crate::SharedRateLimiter).
///
/// # Examples
///
/// ```
/// use sluice_limiter::RateLimiter;
///
/// let mut limiter = RateLimiter::new(2).unwrap();
/// assert!(limiter.acquire(0));
/// assert!(limiter.acquire(10));
/// assert!(!limiter.acquire(20));
/// assert_eq!(limiter.next_available_at(), Some(1_000));
/// assert!(limiter.acquire(1_000));
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_per_second: usize,
    /// Accepted-call timestamps, oldest first. Never longer than `max_per_second`.
    accepted: VecDeque<u64>,
}

impl RateLimiter {
    /// Create a limiter accepting at most `max_per_second` calls per window
    ///
    /// # Errors
    ///
    /// [`LimiterError::InvalidMax`] if `max_per_second` is zero.
    pub fn new(max_per_second: u32) -> Result<Self, LimiterError> {
        if max_per_second == 0 {
            return Err(LimiterError::InvalidMax(max_per_second));
        }
        let max_per_second = max_per_second as usize;

        Ok(Self {
            max_per_second,
            accepted: VecDeque::with_capacity(max_per_second),
        })
    }

    /// Configured maximum per window
    pub fn max_per_second(&self) -> u32 {
        self.max_per_second as u32
    }

    /// Try to take a slot at time `now` (milliseconds)
    ///
    /// Purges accepted calls that have left the window `(now - 1000, now]`,
    /// then accepts and records `now` if fewer than the maximum remain.
    /// Returns false, leaving the window as purged, when it is full; the
    /// caller must not make the external call.
    pub fn acquire(&mut self, now: u64) -> bool {
        self.purge(now);

        if self.accepted.len() >= self.max_per_second {
            return false;
        }
        self.accepted.push_back(now);
        true
    }

    /// Number of accepted calls still inside the window at `now`
    pub fn in_window(&mut self, now: u64) -> usize {
        self.purge(now);
        self.accepted.len()
    }

    /// Earliest time a call can be accepted, or `None` if a slot is free
    ///
    /// Based on the state as of the last call; a full window frees its first
    /// slot once the oldest accepted call is a full window old.
    pub fn next_available_at(&self) -> Option<u64> {
        if self.accepted.len() < self.max_per_second {
            return None;
        }
        self.accepted.front().map(|oldest| oldest + WINDOW_MS)
    }

    /// Forget all accepted calls
    pub fn reset(&mut self) {
        self.accepted.clear();
    }

    fn purge(&mut self, now: u64) {
        // Nothing has left the window during the first second of the epoch
        let Some(cutoff) = now.checked_sub(WINDOW_MS) else {
            return;
        };
        while self.accepted.front().is_some_and(|&ts| ts <= cutoff) {
            self.accepted.pop_front();
        }
    }
}
