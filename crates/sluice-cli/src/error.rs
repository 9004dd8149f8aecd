//! Error types for the CLI application.

use sluice_gatekeeper::{ErrorClass, GateError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gate failure that stops the whole command
    #[error("{0}")]
    Gate(#[from] GateError),

    /// Invalid domain value (license, source name)
    #[error("Invalid input: {0}")]
    Domain(#[from] sluice_domain::DomainError),

    /// Limiter configuration error
    #[error("Limiter error: {0}")]
    Limiter(#[from] sluice_limiter::LimiterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Process exit code: 2 for a hard-blocked source, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Gate(e) if e.class() == ErrorClass::HardBlock => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let hard = CliError::from(GateError::HardBlock { source_name: "FRED".to_string() });
        assert_eq!(hard.exit_code(), 2);

        assert_eq!(CliError::from(GateError::MissingLicense).exit_code(), 1);
        assert_eq!(CliError::InvalidInput("x".to_string()).exit_code(), 1);
    }
}
