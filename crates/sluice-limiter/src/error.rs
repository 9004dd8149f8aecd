//! Limiter error types

use thiserror::Error;

/// Errors from limiter construction and lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimiterError {
    /// Maximum calls per second must be positive
    #[error("max_per_second must be positive, got {0}")]
    InvalidMax(u32),

    /// Invalid limiter entry in configuration
    #[error("Limiter '{name}': {reason}")]
    Config {
        /// Limiter name
        name: String,
        /// What is wrong with it
        reason: String,
    },
}
