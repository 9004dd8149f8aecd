//! Sluice Ingest
//!
//! Reference ingestion harness wiring the limiter and the gatekeeper
//! around an external fetch.
//!
//! # Overview
//!
//! - [`IngestPipeline`]: one synchronous attempt (hard-block check, rate-limit
//!   slot, fetch, gate evaluation)
//! - [`IngestWorker`]: async driver that sleeps through throttles
//! - [`IngestMetrics`]: counters across attempts
//!
//! Fetching is behind [`sluice_domain::traits::RecordFetcher`]; storing the
//! evaluated batch is left to the caller.
//!
//! # Configuration
//!
//! ```toml
//! [ingest]
//! max_throttle_retries = 5
//!
//! [ingest.dependency_for_source]
//! ecb-exr = "ecb-sdw"
//! ecb-mir = "ecb-sdw"
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod pipeline;
mod worker;

pub use config::IngestConfig;
pub use error::IngestError;
pub use metrics::IngestMetrics;
pub use pipeline::{IngestOutcome, IngestPipeline};
pub use worker::IngestWorker;
