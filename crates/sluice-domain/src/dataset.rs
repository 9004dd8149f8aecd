//! Publisher-declared dataset flags

use serde::{Deserialize, Serialize};

/// Flags a publisher declares about a dataset
///
/// Derived from publisher metadata and never mutated by the gate. Any
/// field missing from serialized input takes its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFlags {
    /// Dataset contains third-party material
    pub third_party_flag: bool,

    /// Licensing terms could not be established
    pub unclear_license: bool,

    /// Free-text restriction notes from the publisher
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_notes: Option<String>,
}

impl DatasetFlags {
    /// Restriction notes with surrounding whitespace removed, if any remain
    pub fn restriction_notes(&self) -> Option<&str> {
        self.restriction_notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }
}
