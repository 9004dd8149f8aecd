//! Limiter configuration
//!
//! One entry per rate-limited external dependency:
//!
//! ```toml
//! [limiters.ecb-sdw]
//! max_per_second = 10
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rate limit for one external dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSpec {
    /// Maximum accepted calls in any trailing second (must be positive)
    pub max_per_second: u32,
}

/// Named rate limits, keyed by dependency name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimiterConfig {
    /// Limits per dependency
    pub limiters: BTreeMap<String, LimitSpec>,
}

impl LimiterConfig {
    /// Add or replace the limit for `name`
    pub fn with_limit(mut self, name: impl Into<String>, max_per_second: u32) -> Self {
        self.limiters.insert(name.into(), LimitSpec { max_per_second });
        self
    }
}
