//! Domain validation errors

use thiserror::Error;

/// Errors raised while validating domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// License code was empty or whitespace
    #[error("License code must not be empty")]
    EmptyLicenseCode,

    /// Policy URL could not be parsed or used an unsupported scheme
    #[error("Invalid policy URL '{url}': {reason}")]
    InvalidPolicyUrl {
        /// The rejected URL text
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Source name was empty or whitespace
    #[error("Source name must not be empty")]
    EmptySourceName,

    /// Identifier could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}
