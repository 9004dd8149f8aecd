//! Per-dependency limiter registry

use crate::{LimiterConfig, LimiterError, SharedRateLimiter};
use std::collections::HashMap;

/// Shared limiters keyed by external dependency name
///
/// Each regulated dependency gets its own window; workers look up the
/// limiter for the dependency they are about to call.
#[derive(Debug, Clone, Default)]
pub struct LimiterRegistry {
    limiters: HashMap<String, SharedRateLimiter>,
}

impl LimiterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration
    ///
    /// # Errors
    ///
    /// [`LimiterError::Config`] naming the first entry with a zero maximum.
    pub fn from_config(config: &LimiterConfig) -> Result<Self, LimiterError> {
        let mut registry = Self::new();
        for (name, spec) in &config.limiters {
            registry
                .register(name.clone(), spec.max_per_second)
                .map_err(|e| LimiterError::Config {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(registry)
    }

    /// Register (or replace) the limiter for `name`
    pub fn register(&mut self, name: impl Into<String>, max_per_second: u32) -> Result<(), LimiterError> {
        let name = name.into();
        let limiter = SharedRateLimiter::new(max_per_second)?;
        tracing::debug!(dependency = %name, max_per_second, "Registered rate limiter");
        self.limiters.insert(name, limiter);
        Ok(())
    }

    /// Handle to the limiter for `name`, if one is registered
    pub fn get(&self, name: &str) -> Option<SharedRateLimiter> {
        self.limiters.get(name).cloned()
    }

    /// Registered dependency names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.limiters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered limiters
    pub fn len(&self) -> usize {
        self.limiters.len()
    }

    /// Whether no limiter is registered
    pub fn is_empty(&self) -> bool {
        self.limiters.is_empty()
    }
}
