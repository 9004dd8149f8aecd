//! Sluice Gatekeeper
//!
//! Decides, for every ingested record, whether it may be stored, displayed,
//! or must be blocked or quarantined because of licensing, attribution or
//! jurisdiction constraints.
//!
//! The Gatekeeper provides:
//! - [`rules`]: independent compliance predicates and transforms
//! - [`GateEvaluator`]: the rules applied in a fixed order to a record or batch
//! - [`GateError`]: hard blocks and record-level policy violations
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use sluice_domain::{CommercialStatus, LicenseRecord, SourceContext};
//! use sluice_gatekeeper::{Disposition, GateEvaluator};
//!
//! let license = LicenseRecord::new("CC-BY-4.0", CommercialStatus::Conditional).unwrap();
//! let ctx = SourceContext::new("ecb-sdw").unwrap().with_license(license);
//! let record = json!({"license_id": "ecb-2024", "value": 1.08}).as_object().cloned().unwrap();
//!
//! let decision = GateEvaluator::default_config().evaluate(&ctx, record).unwrap();
//! assert_eq!(decision.disposition(), Disposition::ProductionBlocked);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod evaluator;
pub mod rules;

pub use config::GateConfig;
pub use error::{ErrorClass, GateError};
pub use evaluator::{BatchReport, DecisionReason, Disposition, GateDecision, GateEvaluator, RejectedItem};
