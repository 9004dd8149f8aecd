//! Sluice Limiter
//!
//! Throttles outbound calls to regulated external data sources.
//!
//! - [`RateLimiter`]: sliding one-second window over accepted-call timestamps
//! - [`SharedRateLimiter`]: the same limiter behind a mutex for concurrent workers
//! - [`LimiterRegistry`]: one shared limiter per named dependency
//! - [`SystemClock`] / [`ManualClock`]: sources of `now`
//!
//! A refusal is not an error: `acquire` returns false and any waiting or
//! backoff is up to the caller.
//!
//! # Examples
//!
//! ```
//! use sluice_domain::traits::Clock;
//! use sluice_limiter::{LimiterConfig, LimiterRegistry, ManualClock};
//!
//! let config = LimiterConfig::default().with_limit("ecb-sdw", 1);
//! let registry = LimiterRegistry::from_config(&config).unwrap();
//! let clock = ManualClock::new(10_000);
//!
//! let ecb = registry.get("ecb-sdw").unwrap();
//! assert!(ecb.acquire(clock.now_millis()));
//! assert!(!ecb.acquire(clock.now_millis()));
//!
//! clock.advance(1_000);
//! assert!(ecb.acquire(clock.now_millis()));
//! ```

#![warn(missing_docs)]

mod clock;
mod config;
mod error;
mod limiter;
mod registry;
mod shared;

pub use clock::{ManualClock, SystemClock};
pub use config::{LimitSpec, LimiterConfig};
pub use error::LimiterError;
pub use limiter::{RateLimiter, WINDOW_MS};
pub use registry::LimiterRegistry;
pub use shared::SharedRateLimiter;
