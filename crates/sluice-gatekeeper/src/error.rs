//! Gatekeeper error types

use thiserror::Error;

/// Policy failures raised by the gate rules
///
/// None of these are retryable: they report a policy violation, not a
/// transient condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Source is permanently forbidden; ingestion of the whole source must stop
    #[error("Source '{source_name}' is hard-blocked")]
    HardBlock {
        /// Name of the blocked source
        source_name: String,
    },

    /// Record has no resolved license reference
    #[error("Record has no license_id")]
    MissingLicense,

    /// Record carries publisher-owned content
    #[error("Forbidden field '{field}' present in news metadata")]
    ForbiddenField {
        /// The first banned field found
        field: &'static str,
    },
}

/// Coarse classification of a [`GateError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Source-level, unrecoverable
    HardBlock,

    /// Record-level; the record is rejected, siblings are unaffected
    PolicyViolation,
}

impl GateError {
    /// Classify the error
    pub fn class(&self) -> ErrorClass {
        match self {
            GateError::HardBlock { .. } => ErrorClass::HardBlock,
            GateError::MissingLicense | GateError::ForbiddenField { .. } => ErrorClass::PolicyViolation,
        }
    }

    /// Always false
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Whether the rejected record may be queued for remediation
    pub fn is_remediable(&self) -> bool {
        matches!(self, GateError::MissingLicense)
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            GateError::HardBlock { .. } => "hard_block",
            GateError::MissingLicense => "missing_license",
            GateError::ForbiddenField { .. } => "forbidden_field",
        }
    }
}
