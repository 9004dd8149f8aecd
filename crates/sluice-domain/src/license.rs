//! License records - validated license metadata for a data source

use crate::{CommercialStatus, DomainError};
use serde::{Deserialize, Serialize};
use url::Url;

/// License metadata attached to a source
///
/// Created when a source's license metadata is ingested. Validation happens
/// at construction (and on deserialization), after which the record is
/// immutable: re-ingesting a license produces a new record that supersedes
/// the old one.
///
/// # Examples
///
/// ```
/// use sluice_domain::{CommercialStatus, LicenseRecord};
///
/// let license = LicenseRecord::new("CC-BY-4.0", CommercialStatus::Allowed).unwrap();
/// assert_eq!(license.code(), "CC-BY-4.0");
/// assert!(!license.attribution_required());
///
/// assert!(LicenseRecord::new("  ", CommercialStatus::Allowed).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLicenseRecord", into = "RawLicenseRecord")]
pub struct LicenseRecord {
    code: String,
    commercial_status: CommercialStatus,
    attribution_required: bool,
    attribution_template: Option<String>,
    policy_url: Option<Url>,
}

/// Wire shape of a license record, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawLicenseRecord {
    code: String,
    commercial_status: CommercialStatus,
    #[serde(default)]
    attribution_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribution_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy_url: Option<String>,
}

impl LicenseRecord {
    /// Create a license record with no attribution requirement or policy URL
    pub fn new(code: impl Into<String>, commercial_status: CommercialStatus) -> Result<Self, DomainError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::EmptyLicenseCode);
        }

        Ok(Self {
            code,
            commercial_status,
            attribution_required: false,
            attribution_template: None,
            policy_url: None,
        })
    }

    /// Require attribution, optionally with a template such as `"Source: {source}"`
    pub fn with_attribution(mut self, template: Option<String>) -> Self {
        self.attribution_required = true;
        self.attribution_template = template;
        self
    }

    /// Attach a policy URL (http or https only)
    pub fn with_policy_url(mut self, policy_url: &str) -> Result<Self, DomainError> {
        self.policy_url = Some(parse_policy_url(policy_url)?);
        Ok(self)
    }

    /// License code (e.g. `CC-BY-4.0`)
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Commercial status of the license
    pub fn commercial_status(&self) -> CommercialStatus {
        self.commercial_status
    }

    /// Whether displayed data must carry attribution
    pub fn attribution_required(&self) -> bool {
        self.attribution_required
    }

    /// Attribution template, if one was declared
    pub fn attribution_template(&self) -> Option<&str> {
        self.attribution_template.as_deref()
    }

    /// Policy URL, if one was declared
    pub fn policy_url(&self) -> Option<&Url> {
        self.policy_url.as_ref()
    }

    /// Render the attribution line for `source`
    ///
    /// Returns `None` when attribution is not required or no template exists.
    /// The `{source}` placeholder is replaced with the source name.
    pub fn attribution_text(&self, source: &str) -> Option<String> {
        if !self.attribution_required {
            return None;
        }
        self.attribution_template
            .as_deref()
            .map(|template| template.replace("{source}", source))
    }
}

fn parse_policy_url(text: &str) -> Result<Url, DomainError> {
    let url = Url::parse(text.trim()).map_err(|e| DomainError::InvalidPolicyUrl {
        url: text.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DomainError::InvalidPolicyUrl {
            url: text.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

impl TryFrom<RawLicenseRecord> for LicenseRecord {
    type Error = DomainError;

    fn try_from(raw: RawLicenseRecord) -> Result<Self, Self::Error> {
        let mut record = LicenseRecord::new(raw.code, raw.commercial_status)?;
        record.attribution_required = raw.attribution_required;
        record.attribution_template = raw.attribution_template;
        if let Some(url) = raw.policy_url.as_deref() {
            record = record.with_policy_url(url)?;
        }
        Ok(record)
    }
}

impl From<LicenseRecord> for RawLicenseRecord {
    fn from(record: LicenseRecord) -> Self {
        Self {
            code: record.code,
            commercial_status: record.commercial_status,
            attribution_required: record.attribution_required,
            attribution_template: record.attribution_template,
            policy_url: record.policy_url.map(String::from),
        }
    }
}
