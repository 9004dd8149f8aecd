//! Source context - what the gate knows about the source of a batch

use crate::{DatasetFlags, DomainError, LicenseRecord};
use serde::{Deserialize, Serialize};

/// Kind of content a source delivers
///
/// Selects the optional evaluation steps: geography filtering for
/// region-coded statistical rows, metadata-only enforcement for
/// third-party news.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceScope {
    /// No scope-specific rules
    #[default]
    General,

    /// Rows carry a `geo` region code (Eurostat-style statistics)
    GeoScoped,

    /// Items describe third-party news articles
    ThirdPartyNews,
}

impl SourceScope {
    /// Get the scope name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceScope::General => "general",
            SourceScope::GeoScoped => "geo_scoped",
            SourceScope::ThirdPartyNews => "third_party_news",
        }
    }
}

/// Per-source context handed to the gate evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    /// Upstream source name (e.g. `eurostat`, `ecb-sdw`)
    pub source_name: String,

    /// Resolved license for the source, if one is on file
    #[serde(default)]
    pub license: Option<LicenseRecord>,

    /// Publisher-declared dataset flags
    #[serde(default)]
    pub dataset_flags: DatasetFlags,

    /// Content scope of the source
    #[serde(default)]
    pub scope: SourceScope,
}

impl SourceContext {
    /// Create a general-scope context with no license and default flags
    pub fn new(source_name: impl Into<String>) -> Result<Self, DomainError> {
        let source_name = source_name.into();
        if source_name.trim().is_empty() {
            return Err(DomainError::EmptySourceName);
        }

        Ok(Self {
            source_name,
            license: None,
            dataset_flags: DatasetFlags::default(),
            scope: SourceScope::General,
        })
    }

    /// Set the resolved license
    pub fn with_license(mut self, license: LicenseRecord) -> Self {
        self.license = Some(license);
        self
    }

    /// Set the dataset flags
    pub fn with_flags(mut self, flags: DatasetFlags) -> Self {
        self.dataset_flags = flags;
        self
    }

    /// Set the content scope
    pub fn with_scope(mut self, scope: SourceScope) -> Self {
        self.scope = scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommercialStatus;

    #[test]
    fn test_builder() {
        let license = LicenseRecord::new("CC-BY-4.0", CommercialStatus::Allowed).unwrap();
        let ctx = SourceContext::new("eurostat")
            .unwrap()
            .with_license(license.clone())
            .with_scope(SourceScope::GeoScoped);

        assert_eq!(ctx.source_name, "eurostat");
        assert_eq!(ctx.license, Some(license));
        assert_eq!(ctx.scope, SourceScope::GeoScoped);
        assert_eq!(ctx.dataset_flags, DatasetFlags::default());
    }

    #[test]
    fn test_empty_source_name_rejected() {
        assert_eq!(SourceContext::new(" "), Err(DomainError::EmptySourceName));
    }

    #[test]
    fn test_scope_serde_names() {
        let scope: SourceScope = serde_json::from_str("\"third_party_news\"").unwrap();
        assert_eq!(scope, SourceScope::ThirdPartyNews);
        assert_eq!(serde_json::to_string(&SourceScope::GeoScoped).unwrap(), "\"geo_scoped\"");
    }
}
