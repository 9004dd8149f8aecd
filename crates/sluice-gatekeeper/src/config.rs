//! Gatekeeper configuration
//!
//! Only the evaluator's optional behaviour is configurable. The allow-list,
//! banned-field list and hard-blocked source are fixed policy. Files are
//! loaded by the embedding application, which nests this under `[gate]`.

use serde::{Deserialize, Serialize};

/// Configuration for the gate evaluator
///
/// # Examples
///
/// ```
/// use sluice_gatekeeper::GateConfig;
///
/// let config: GateConfig = toml::from_str("require_license_snapshot = true").unwrap();
/// assert_eq!(config, GateConfig::strict());
/// assert!(config.block_unresolved_license);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Reject records that carry no `license_id`
    ///
    /// Runs after the geography filter, so dropped rows are never reported
    /// as rejections.
    /// Default: false
    pub require_license_snapshot: bool,

    /// Block production display for sources with no license on file
    /// Default: true
    pub block_unresolved_license: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            require_license_snapshot: false,
            block_unresolved_license: true,
        }
    }
}

impl GateConfig {
    /// Configuration for pipelines that store per-record license snapshots
    ///
    /// Every kept record must carry a `license_id`; records without one are
    /// rejected as remediable.
    pub fn strict() -> Self {
        Self {
            require_license_snapshot: true,
            ..Self::default()
        }
    }
}
