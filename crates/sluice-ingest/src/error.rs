//! Error types for ingestion runs

use thiserror::Error;

/// Errors that stop ingestion of a source
#[derive(Error, Debug)]
pub enum IngestError {
    /// Source is permanently forbidden; nothing was fetched or stored
    #[error("Source '{0}' is hard-blocked")]
    HardBlocked(String),

    /// The external fetch failed
    #[error("Fetch from '{source_name}' failed: {message}")]
    Fetch {
        /// Source being fetched
        source_name: String,
        /// Fetcher error message
        message: String,
    },

    /// Rate limiter kept refusing after the configured number of retries
    #[error("Gave up on '{source_name}' after {retries} throttled attempts")]
    ThrottleExhausted {
        /// Source being fetched
        source_name: String,
        /// Attempts made
        retries: u32,
    },

    /// Limiter setup failed
    #[error("Limiter error: {0}")]
    Limiter(#[from] sluice_limiter::LimiterError),
}
