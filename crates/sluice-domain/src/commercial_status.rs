//! Commercial status of a license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commercial status attached to a license record
///
/// Determines whether data under the license may be shown in production:
/// - Allowed: production display permitted
/// - Conditional: permitted only under terms that have not been cleared
/// - Disallowed: never permitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommercialStatus {
    /// Commercial use and production display permitted
    Allowed,

    /// Permitted subject to conditions (attribution, quotas, contracts)
    Conditional,

    /// Commercial use not permitted
    Disallowed,
}

impl CommercialStatus {
    /// All statuses, in order of increasing restriction
    pub const ALL: [CommercialStatus; 3] = [
        CommercialStatus::Allowed,
        CommercialStatus::Conditional,
        CommercialStatus::Disallowed,
    ];

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CommercialStatus::Allowed => "allowed",
            CommercialStatus::Conditional => "conditional",
            CommercialStatus::Disallowed => "disallowed",
        }
    }

    /// Parse a status from a string, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "allowed" => Some(CommercialStatus::Allowed),
            "conditional" => Some(CommercialStatus::Conditional),
            "disallowed" => Some(CommercialStatus::Disallowed),
            _ => None,
        }
    }
}

impl fmt::Display for CommercialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommercialStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid commercial status: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(CommercialStatus::parse("ALLOWED"), Some(CommercialStatus::Allowed));
        assert_eq!(CommercialStatus::parse(" Conditional "), Some(CommercialStatus::Conditional));
        assert_eq!(CommercialStatus::parse("disallowed"), Some(CommercialStatus::Disallowed));
        assert_eq!(CommercialStatus::parse("maybe"), None);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for status in CommercialStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "open".parse::<CommercialStatus>().unwrap_err();
        assert!(err.contains("open"));
    }
}
