//! Configuration for ingestion runs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the ingest pipeline
///
/// # Examples
///
/// ```
/// use sluice_ingest::IngestConfig;
///
/// let config = IngestConfig::default().route("ecb-exr", "ecb-sdw");
/// assert_eq!(config.dependency_for("ecb-exr"), "ecb-sdw");
/// assert_eq!(config.dependency_for("eurostat"), "eurostat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// How many throttled attempts to wait out before giving up on a source
    /// Default: 5
    pub max_throttle_retries: u32,

    /// Limiter (external dependency) name per source name
    ///
    /// Sources not listed use a limiter named after themselves, if one is
    /// registered, and are unthrottled otherwise.
    pub dependency_for_source: BTreeMap<String, String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_throttle_retries: 5,
            dependency_for_source: BTreeMap::new(),
        }
    }
}

impl IngestConfig {
    /// Route `source` through the limiter named `dependency`
    pub fn route(mut self, source: impl Into<String>, dependency: impl Into<String>) -> Self {
        self.dependency_for_source.insert(source.into(), dependency.into());
        self
    }

    /// Limiter name for `source`
    pub fn dependency_for<'a>(&'a self, source: &'a str) -> &'a str {
        self.dependency_for_source
            .get(source)
            .map(String::as_str)
            .unwrap_or(source)
    }
}
