//! Trait definitions for external interactions
//!
//! The actual data fetch and any persistence are owned by the surrounding
//! pipeline. These traits are the seams it plugs into.

use crate::Record;

/// Fetches a batch of records from a named upstream source
///
/// Implemented by the pipeline's HTTP or file adapters. Callers consult the
/// rate limiter before calling `fetch`.
pub trait RecordFetcher {
    /// Error type for fetch operations
    type Error;

    /// Fetch the next batch of records for `source_name`
    fn fetch(&mut self, source_name: &str) -> Result<Vec<Record>, Self::Error>;
}

/// Source of the current time in milliseconds since the Unix epoch
///
/// Rate-limit decisions take time as an explicit input; this trait lets
/// callers choose between the wall clock and a synthetic one.
pub trait Clock {
    /// Current time in milliseconds
    fn now_millis(&self) -> u64;
}
