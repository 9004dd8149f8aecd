//! Compliance rules
//!
//! Each rule is an independent, pure function enforcing one policy against a
//! source name, license status, record or dataset. The evaluator composes
//! them in a fixed order; they can also be called directly.

use crate::GateError;
use sluice_domain::record::{has_field, is_blank, str_field};
use sluice_domain::{CommercialStatus, DatasetFlags, Record};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Region codes admitted for geography-scoped statistics
///
/// Exhaustive policy, not configuration.
pub const EUROSTAT_GEO_ALLOWLIST: [&str; 11] = [
    "EU", "EA", "EFTA", "AL", "BA", "MD", "ME", "MK", "RS", "TR", "UA",
];

/// Publisher-owned fields that must never pass through, in scan order
pub const BANNED_NEWS_FIELDS: [&str; 7] = [
    "publisher_headline",
    "headline_original",
    "article_body",
    "body",
    "publisher_image",
    "image_url",
    "quote_text",
];

/// Suffix marking a series id as a computed artifact rather than a raw feed
pub const DERIVED_SERIES_SUFFIX: &str = ".DERIVED";

/// Field holding a record's license reference
pub const LICENSE_ID_FIELD: &str = "license_id";

/// Field holding a row's region code
pub const GEO_FIELD: &str = "geo";

const BLOCKED_SOURCE_MARKER: &str = "FRED";

static GEO_ALLOWLIST: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| EUROSTAT_GEO_ALLOWLIST.into_iter().collect());

/// Fail with [`GateError::HardBlock`] if the source name contains "FRED" in any case
///
/// This source is forbidden regardless of any other flag, so the check runs
/// before every other gate.
///
/// # Examples
///
/// ```
/// use sluice_gatekeeper::rules::assert_no_fred;
///
/// assert!(assert_no_fred("eurostat").is_ok());
/// assert!(assert_no_fred("stlouisfed-fred-api").is_err());
/// ```
pub fn assert_no_fred(source_name: &str) -> Result<(), GateError> {
    if source_name.to_uppercase().contains(BLOCKED_SOURCE_MARKER) {
        return Err(GateError::HardBlock {
            source_name: source_name.to_string(),
        });
    }
    Ok(())
}

/// Whether data under `status` must be kept out of production display
///
/// True for everything except [`CommercialStatus::Allowed`]. Conditional and
/// disallowed are treated alike here; callers that need the difference
/// inspect the status directly.
pub fn must_block_in_production(status: CommercialStatus) -> bool {
    status != CommercialStatus::Allowed
}

/// Require a resolved `license_id` on the record
///
/// Fails with [`GateError::MissingLicense`] when the field is absent, null
/// or empty-equivalent. Returns the record unchanged otherwise.
pub fn require_license_snapshot(record: Record) -> Result<Record, GateError> {
    match record.get(LICENSE_ID_FIELD) {
        Some(value) if !is_blank(value) => Ok(record),
        _ => Err(GateError::MissingLicense),
    }
}

/// Whether `code`, uppercased, is an allowed region
///
/// Only case is normalized; padded or otherwise decorated codes are not
/// on the allow-list.
pub fn is_allowed_geo(code: &str) -> bool {
    GEO_ALLOWLIST.contains(code.to_uppercase().as_str())
}

/// Whether a row's `geo` field names an allowed region
///
/// Rows without a string `geo` are not allowed.
pub fn row_has_allowed_geo(row: &Record) -> bool {
    str_field(row, GEO_FIELD).is_some_and(is_allowed_geo)
}

/// Keep only rows whose `geo` is on the allow-list, preserving order
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sluice_domain::Record;
/// use sluice_gatekeeper::rules::filter_eurostat_rows_by_geo;
///
/// let rows: Vec<Record> = [json!({"geo": "eu"}), json!({"geo": "US"}), json!({})]
///     .into_iter()
///     .map(|v| v.as_object().cloned().unwrap())
///     .collect();
///
/// let kept = filter_eurostat_rows_by_geo(rows);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0]["geo"], "eu");
/// ```
pub fn filter_eurostat_rows_by_geo(rows: Vec<Record>) -> Vec<Record> {
    rows.into_iter().filter(row_has_allowed_geo).collect()
}

/// Whether a dataset must be quarantined pending manual review
///
/// True if it is flagged third-party, has an unclear license, or carries
/// restriction notes that are not blank.
pub fn should_quarantine_dataset(flags: &DatasetFlags) -> bool {
    flags.third_party_flag || flags.unclear_license || flags.restriction_notes().is_some()
}

/// Reject news items that carry publisher-owned content
///
/// Scans [`BANNED_NEWS_FIELDS`] in order and fails with
/// [`GateError::ForbiddenField`] on the first one present with a non-null
/// value. Returns the input unchanged otherwise.
pub fn ensure_news_metadata_only(input: Record) -> Result<Record, GateError> {
    if let Some(field) = BANNED_NEWS_FIELDS.iter().copied().find(|field| has_field(&input, field)) {
        return Err(GateError::ForbiddenField { field });
    }
    Ok(input)
}

/// Mark an ECB series code as derived
///
/// Keeps raw licensed series and computed series in distinguishable
/// namespaces by appending [`DERIVED_SERIES_SUFFIX`].
///
/// Policy: derivation is idempotent. A code that already ends in the suffix
/// names a derived series and is returned unchanged, so re-deriving a
/// stored id never produces `.DERIVED.DERIVED`. The result always differs
/// from a raw (non-derived) code.
pub fn ecb_derived_series_id(raw_code: &str) -> String {
    if is_derived_series_id(raw_code) {
        return raw_code.to_string();
    }
    format!("{}{}", raw_code, DERIVED_SERIES_SUFFIX)
}

/// Whether a series id carries the derived suffix
pub fn is_derived_series_id(series_id: &str) -> bool {
    series_id.ends_with(DERIVED_SERIES_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_assert_no_fred() {
        assert!(assert_no_fred("eurostat").is_ok());
        assert!(assert_no_fred("ecb-sdw").is_ok());
        assert!(assert_no_fred("").is_ok());

        for name in ["FRED", "fred", "St. Louis Fred", "alfred-archive"] {
            assert_eq!(
                assert_no_fred(name),
                Err(GateError::HardBlock { source_name: name.to_string() })
            );
        }
    }

    #[test]
    fn test_must_block_in_production() {
        assert!(!must_block_in_production(CommercialStatus::Allowed));
        assert!(must_block_in_production(CommercialStatus::Conditional));
        assert!(must_block_in_production(CommercialStatus::Disallowed));
    }

    #[test]
    fn test_require_license_snapshot() {
        let ok = record(json!({"license_id": "lic-42", "value": 1}));
        assert_eq!(require_license_snapshot(ok.clone()), Ok(ok));

        let numeric = record(json!({"license_id": 7}));
        assert!(require_license_snapshot(numeric).is_ok());

        for bad in [
            json!({"value": 1}),
            json!({"license_id": null}),
            json!({"license_id": ""}),
            json!({"license_id": "   "}),
            json!({"license_id": []}),
        ] {
            assert_eq!(require_license_snapshot(record(bad)), Err(GateError::MissingLicense));
        }
    }

    #[test]
    fn test_is_allowed_geo() {
        for code in EUROSTAT_GEO_ALLOWLIST {
            assert!(is_allowed_geo(code));
            assert!(is_allowed_geo(&code.to_lowercase()));
        }
        assert!(!is_allowed_geo(" efta "));
        assert!(!is_allowed_geo("EU\n"));
        assert!(!is_allowed_geo("US"));
        assert!(!is_allowed_geo("DE"));
        assert!(!is_allowed_geo(""));
    }

    #[test]
    fn test_filter_drops_missing_and_non_string_geo() {
        let rows = vec![
            record(json!({"geo": "EU", "value": 1})),
            record(json!({"value": 2})),
            record(json!({"geo": null})),
            record(json!({"geo": ""})),
            record(json!({"geo": 42})),
            record(json!({"geo": "ua", "value": 3})),
        ];

        let kept = filter_eurostat_rows_by_geo(rows);
        assert_eq!(kept, vec![
            record(json!({"geo": "EU", "value": 1})),
            record(json!({"geo": "ua", "value": 3})),
        ]);
    }

    #[test]
    fn test_eurostat_batch() {
        let rows = vec![
            record(json!({"geo": "EU", "value": 1})),
            record(json!({"geo": "US", "value": 2})),
            record(json!({"geo": "EFTA", "value": 3})),
        ];

        assert_eq!(filter_eurostat_rows_by_geo(rows), vec![
            record(json!({"geo": "EU", "value": 1})),
            record(json!({"geo": "EFTA", "value": 3})),
        ]);
    }

    #[test]
    fn test_should_quarantine_dataset() {
        assert!(!should_quarantine_dataset(&DatasetFlags::default()));

        let third_party = DatasetFlags { third_party_flag: true, ..Default::default() };
        assert!(should_quarantine_dataset(&third_party));

        let unclear = DatasetFlags { unclear_license: true, ..Default::default() };
        assert!(should_quarantine_dataset(&unclear));

        let notes = DatasetFlags {
            restriction_notes: Some("non-commercial only".to_string()),
            ..Default::default()
        };
        assert!(should_quarantine_dataset(&notes));

        let blank_notes = DatasetFlags {
            restriction_notes: Some("  \t ".to_string()),
            ..Default::default()
        };
        assert!(!should_quarantine_dataset(&blank_notes));
    }

    #[test]
    fn test_ensure_news_metadata_only() {
        let headline = record(json!({"publisher_headline": "x"}));
        assert_eq!(
            ensure_news_metadata_only(headline),
            Err(GateError::ForbiddenField { field: "publisher_headline" })
        );

        let metadata = record(json!({"external_url": "https://example.com/a"}));
        assert_eq!(ensure_news_metadata_only(metadata.clone()), Ok(metadata));
    }

    #[test]
    fn test_ensure_news_metadata_reports_first_banned_field_in_scan_order() {
        // JSON key order differs from scan order
        let item = record(json!({"quote_text": "q", "body": "b", "external_url": "u"}));
        assert_eq!(
            ensure_news_metadata_only(item),
            Err(GateError::ForbiddenField { field: "body" })
        );
    }

    #[test]
    fn test_ensure_news_metadata_ignores_null_banned_fields() {
        let item = record(json!({"article_body": null, "image_url": null, "title_hash": "abc"}));
        assert!(ensure_news_metadata_only(item).is_ok());
    }

    #[test]
    fn test_ecb_derived_series_id() {
        let derived = ecb_derived_series_id("EXR.D.USD.EUR.SP00.A");
        assert_eq!(derived, "EXR.D.USD.EUR.SP00.A.DERIVED");
        assert!(is_derived_series_id(&derived));
        assert!(!is_derived_series_id("EXR.D.USD.EUR.SP00.A"));
        assert_eq!(ecb_derived_series_id(&derived), derived);
    }
}
