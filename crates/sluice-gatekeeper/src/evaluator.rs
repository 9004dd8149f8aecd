//! Gate evaluation - composes the rules into one decision per record

use crate::rules::{
    assert_no_fred, ensure_news_metadata_only, must_block_in_production, require_license_snapshot,
    row_has_allowed_geo, should_quarantine_dataset, GEO_FIELD,
};
use crate::{GateConfig, GateError};
use sluice_domain::record::str_field;
use sluice_domain::{BatchId, CommercialStatus, Record, SourceContext, SourceScope};
use tracing::{debug, info, warn};

/// What the pipeline should do with an evaluated record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Store and display
    Admit,

    /// Store for internal use; keep out of production display
    ProductionBlocked,

    /// Store, exclude from display pipelines pending manual review
    Quarantine,

    /// Do not store (geography outside the allow-list)
    Dropped,
}

impl Disposition {
    /// Get the disposition name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Admit => "admit",
            Disposition::ProductionBlocked => "production_blocked",
            Disposition::Quarantine => "quarantine",
            Disposition::Dropped => "dropped",
        }
    }
}

/// Why a record received a non-admit state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionReason {
    /// The source's license status does not allow production display
    CommercialStatus(CommercialStatus),

    /// The source has no license on file
    LicenseUnresolved,

    /// Dataset flags require quarantine
    DatasetQuarantine {
        /// Dataset is flagged third-party
        third_party: bool,
        /// Dataset license is unclear
        unclear_license: bool,
        /// Non-blank restriction notes, if any
        restriction_notes: Option<String>,
    },

    /// Row geography is not on the allow-list
    GeoNotAllowed {
        /// The row's `geo` value, if it had a string one
        geo: Option<String>,
    },
}

impl DecisionReason {
    /// Human-readable description
    pub fn describe(&self) -> String {
        match self {
            DecisionReason::CommercialStatus(status) => {
                format!("license commercial status is {}", status)
            }
            DecisionReason::LicenseUnresolved => "no license on file for source".to_string(),
            DecisionReason::DatasetQuarantine {
                third_party,
                unclear_license,
                restriction_notes,
            } => {
                let mut causes = Vec::new();
                if *third_party {
                    causes.push("third-party".to_string());
                }
                if *unclear_license {
                    causes.push("unclear license".to_string());
                }
                if let Some(notes) = restriction_notes {
                    causes.push(format!("restricted: {}", notes));
                }
                format!("dataset quarantined ({})", causes.join(", "))
            }
            DecisionReason::GeoNotAllowed { geo: Some(geo) } => {
                format!("geo '{}' not on allow-list", geo)
            }
            DecisionReason::GeoNotAllowed { geo: None } => "row has no geo".to_string(),
        }
    }
}

/// Outcome of evaluating one record
#[derive(Debug, Clone, PartialEq)]
pub struct GateDecision {
    /// The record, unchanged
    pub record: Record,

    /// Keep out of production display
    pub production_blocked: bool,

    /// Exclude from display pending manual review
    pub quarantined: bool,

    /// Do not store
    pub dropped: bool,

    /// Reasons for every non-admit state, in rule order
    pub reasons: Vec<DecisionReason>,
}

impl GateDecision {
    /// Overall disposition
    ///
    /// Precedence: dropped, then quarantine, then production block.
    pub fn disposition(&self) -> Disposition {
        if self.dropped {
            Disposition::Dropped
        } else if self.quarantined {
            Disposition::Quarantine
        } else if self.production_blocked {
            Disposition::ProductionBlocked
        } else {
            Disposition::Admit
        }
    }
}

/// A record rejected by a policy violation
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedItem {
    /// Position of the record in the input batch
    pub index: usize,

    /// The violation
    pub error: GateError,
}

/// Result of evaluating a batch from one source
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Identifier of this batch
    pub batch_id: BatchId,

    /// Source the batch came from
    pub source_name: String,

    /// Decisions for records that were not dropped or rejected, in input order
    pub decisions: Vec<GateDecision>,

    /// Records rejected by a policy violation
    pub rejected: Vec<RejectedItem>,

    /// Rows dropped by the geography filter
    pub geo_dropped: usize,
}

impl BatchReport {
    /// Number of decisions with the given disposition
    pub fn count(&self, disposition: Disposition) -> usize {
        if disposition == Disposition::Dropped {
            return self.geo_dropped;
        }
        self.decisions
            .iter()
            .filter(|d| d.disposition() == disposition)
            .count()
    }

    /// Records admitted for storage and display
    pub fn admitted(&self) -> impl Iterator<Item = &Record> {
        self.records_with(Disposition::Admit)
    }

    /// Records stored but quarantined
    pub fn quarantined(&self) -> impl Iterator<Item = &Record> {
        self.records_with(Disposition::Quarantine)
    }

    /// Records stored but kept out of production display
    pub fn production_blocked(&self) -> impl Iterator<Item = &Record> {
        self.records_with(Disposition::ProductionBlocked)
    }

    fn records_with(&self, disposition: Disposition) -> impl Iterator<Item = &Record> {
        self.decisions
            .iter()
            .filter(move |d| d.disposition() == disposition)
            .map(|d| &d.record)
    }

    /// One-line summary of the batch
    pub fn summary(&self) -> String {
        format!(
            "batch {} from '{}': {} admitted, {} production-blocked, {} quarantined, {} dropped, {} rejected",
            self.batch_id,
            self.source_name,
            self.count(Disposition::Admit),
            self.count(Disposition::ProductionBlocked),
            self.count(Disposition::Quarantine),
            self.geo_dropped,
            self.rejected.len()
        )
    }
}

/// Source-level outcome shared by every record of a batch
struct SourceVerdict {
    production_block: Option<DecisionReason>,
    quarantine: Option<DecisionReason>,
}

/// Applies the compliance rules to ingested records
///
/// Rule order is fixed:
/// 1. Hard source block
/// 2. Commercial-status production block
/// 3. Geography filter (geo-scoped sources)
/// 4. Dataset quarantine
/// 5. Metadata-only enforcement (third-party news sources)
///
/// With [`GateConfig::require_license_snapshot`] set, records that survive
/// the geography filter must also carry a `license_id`.
///
/// Quarantine and production block are states on the decision; the hard
/// block and record-level policy violations are errors.
#[derive(Debug, Clone, Default)]
pub struct GateEvaluator {
    config: GateConfig,
}

impl GateEvaluator {
    /// Create an evaluator with the given configuration
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Create an evaluator with default configuration
    pub fn default_config() -> Self {
        Self::new(GateConfig::default())
    }

    /// Get the evaluator's configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate a single record
    ///
    /// # Errors
    ///
    /// [`GateError::HardBlock`] if the source is forbidden; a policy
    /// violation if the record itself is rejected.
    pub fn evaluate(&self, ctx: &SourceContext, record: Record) -> Result<GateDecision, GateError> {
        assert_no_fred(&ctx.source_name)?;
        let verdict = self.source_verdict(ctx);
        self.evaluate_record(ctx, &verdict, record)
    }

    /// Evaluate a batch of records from one source
    ///
    /// The hard block is checked once, before any record is looked at, and
    /// fails the whole batch. A policy violation rejects only the offending
    /// record; it is reported in [`BatchReport::rejected`] and evaluation
    /// continues with the next one.
    pub fn evaluate_batch(
        &self,
        ctx: &SourceContext,
        records: Vec<Record>,
    ) -> Result<BatchReport, GateError> {
        self.evaluate_batch_as(BatchId::new(), ctx, records)
    }

    /// Evaluate a batch under a caller-chosen id
    ///
    /// Same as [`evaluate_batch`](Self::evaluate_batch) without reading the
    /// clock: equal inputs give equal reports.
    pub fn evaluate_batch_as(
        &self,
        batch_id: BatchId,
        ctx: &SourceContext,
        records: Vec<Record>,
    ) -> Result<BatchReport, GateError> {
        if let Err(e) = assert_no_fred(&ctx.source_name) {
            warn!(source = %ctx.source_name, "Source hard-blocked, batch of {} discarded", records.len());
            return Err(e);
        }

        let verdict = self.source_verdict(ctx);
        let mut report = BatchReport {
            batch_id,
            source_name: ctx.source_name.clone(),
            decisions: Vec::with_capacity(records.len()),
            rejected: Vec::new(),
            geo_dropped: 0,
        };

        for (index, record) in records.into_iter().enumerate() {
            match self.evaluate_record(ctx, &verdict, record) {
                Ok(decision) if decision.dropped => report.geo_dropped += 1,
                Ok(decision) => report.decisions.push(decision),
                Err(error) => {
                    warn!(
                        source = %ctx.source_name,
                        index,
                        kind = error.kind(),
                        "Record rejected: {}",
                        error
                    );
                    report.rejected.push(RejectedItem { index, error });
                }
            }
        }

        info!(batch = %report.batch_id, "{}", report.summary());
        Ok(report)
    }

    fn source_verdict(&self, ctx: &SourceContext) -> SourceVerdict {
        let production_block = match &ctx.license {
            Some(license) if must_block_in_production(license.commercial_status()) => {
                Some(DecisionReason::CommercialStatus(license.commercial_status()))
            }
            Some(_) => None,
            None if self.config.block_unresolved_license => Some(DecisionReason::LicenseUnresolved),
            None => None,
        };

        let flags = &ctx.dataset_flags;
        let quarantine = should_quarantine_dataset(flags).then(|| DecisionReason::DatasetQuarantine {
            third_party: flags.third_party_flag,
            unclear_license: flags.unclear_license,
            restriction_notes: flags.restriction_notes().map(str::to_string),
        });

        SourceVerdict {
            production_block,
            quarantine,
        }
    }

    fn evaluate_record(
        &self,
        ctx: &SourceContext,
        verdict: &SourceVerdict,
        record: Record,
    ) -> Result<GateDecision, GateError> {
        let mut decision = GateDecision {
            record,
            production_blocked: false,
            quarantined: false,
            dropped: false,
            reasons: Vec::new(),
        };

        if let Some(reason) = &verdict.production_block {
            decision.production_blocked = true;
            decision.reasons.push(reason.clone());
        }

        if ctx.scope == SourceScope::GeoScoped && !row_has_allowed_geo(&decision.record) {
            let geo = str_field(&decision.record, GEO_FIELD).map(str::to_string);
            debug!(source = %ctx.source_name, ?geo, "Row dropped by geo filter");
            decision.dropped = true;
            decision.reasons.push(DecisionReason::GeoNotAllowed { geo });
            return Ok(decision);
        }

        if self.config.require_license_snapshot {
            decision.record = require_license_snapshot(decision.record)?;
        }

        if let Some(reason) = &verdict.quarantine {
            decision.quarantined = true;
            decision.reasons.push(reason.clone());
        }

        if ctx.scope == SourceScope::ThirdPartyNews {
            decision.record = ensure_news_metadata_only(decision.record)?;
        }

        debug!(
            source = %ctx.source_name,
            disposition = decision.disposition().as_str(),
            "Record evaluated"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use sluice_domain::{DatasetFlags, LicenseRecord};

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn licensed_context(source: &str, status: CommercialStatus) -> SourceContext {
        SourceContext::new(source)
            .unwrap()
            .with_license(LicenseRecord::new("CC-BY-4.0", status).unwrap())
    }

    #[test]
    fn test_clean_record_admitted() {
        let evaluator = GateEvaluator::default_config();
        let ctx = licensed_context("ecb-sdw", CommercialStatus::Allowed);
        let rec = record(json!({"license_id": "lic-1", "value": 1.25}));

        let decision = evaluator.evaluate(&ctx, rec.clone()).unwrap();
        assert_eq!(decision.disposition(), Disposition::Admit);
        assert_eq!(decision.record, rec);
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn test_conditional_license_blocks_production() {
        let evaluator = GateEvaluator::default_config();
        let ctx = licensed_context("ecb-sdw", CommercialStatus::Conditional);

        let decision = evaluator.evaluate(&ctx, record(json!({"license_id": "lic-1"}))).unwrap();
        assert_eq!(decision.disposition(), Disposition::ProductionBlocked);
        assert_eq!(
            decision.reasons,
            vec![DecisionReason::CommercialStatus(CommercialStatus::Conditional)]
        );
    }

    #[test]
    fn test_unresolved_license() {
        let rec = record(json!({"license_id": "lic-1"}));
        let ctx = SourceContext::new("ecb-sdw").unwrap();

        let decision = GateEvaluator::default_config().evaluate(&ctx, rec.clone()).unwrap();
        assert!(decision.production_blocked);
        assert_eq!(decision.reasons, vec![DecisionReason::LicenseUnresolved]);

        let lenient = GateEvaluator::new(GateConfig {
            block_unresolved_license: false,
            ..GateConfig::default()
        });
        let decision = lenient.evaluate(&ctx, rec).unwrap();
        assert_eq!(decision.disposition(), Disposition::Admit);
    }

    #[test]
    fn test_missing_license_id_rejected() {
        let ctx = licensed_context("ecb-sdw", CommercialStatus::Allowed);
        let rec = record(json!({"value": 3}));

        let result = GateEvaluator::new(GateConfig::strict()).evaluate(&ctx, rec.clone());
        assert_eq!(result, Err(GateError::MissingLicense));

        let decision = GateEvaluator::default_config().evaluate(&ctx, rec).unwrap();
        assert_eq!(decision.disposition(), Disposition::Admit);
    }

    #[test]
    fn test_hard_block_precedes_everything() {
        let ctx = SourceContext::new("FRED")
            .unwrap()
            .with_flags(DatasetFlags { third_party_flag: true, ..Default::default() })
            .with_scope(SourceScope::ThirdPartyNews);
        // Would otherwise be rejected, quarantined and production-blocked
        let rec = record(json!({"body": "full text"}));

        let result = GateEvaluator::default_config().evaluate(&ctx, rec);
        assert_eq!(result, Err(GateError::HardBlock { source_name: "FRED".to_string() }));
    }

    #[test]
    fn test_quarantine_outranks_production_block() {
        let ctx = licensed_context("imf-data", CommercialStatus::Disallowed).with_flags(DatasetFlags {
            unclear_license: true,
            ..Default::default()
        });

        let decision = GateEvaluator::default_config()
            .evaluate(&ctx, record(json!({"license_id": "lic-1"})))
            .unwrap();

        assert!(decision.production_blocked);
        assert!(decision.quarantined);
        assert_eq!(decision.disposition(), Disposition::Quarantine);
        assert_eq!(decision.reasons.len(), 2);
        assert!(decision.reasons[1].describe().contains("unclear license"));
    }

    #[test]
    fn test_geo_scoped_record_dropped() {
        let ctx = licensed_context("eurostat", CommercialStatus::Allowed).with_scope(SourceScope::GeoScoped);

        let decision = GateEvaluator::default_config()
            .evaluate(&ctx, record(json!({"license_id": "lic-1", "geo": "us"})))
            .unwrap();
        assert_eq!(decision.disposition(), Disposition::Dropped);
        assert_eq!(
            decision.reasons,
            vec![DecisionReason::GeoNotAllowed { geo: Some("us".to_string()) }]
        );
    }

    #[test]
    fn test_news_item_with_banned_field_rejected() {
        let ctx = licensed_context("newswire", CommercialStatus::Allowed)
            .with_scope(SourceScope::ThirdPartyNews);

        let result = GateEvaluator::default_config().evaluate(
            &ctx,
            record(json!({"license_id": "lic-1", "external_url": "https://x", "image_url": "https://x/i.png"})),
        );
        assert_eq!(result, Err(GateError::ForbiddenField { field: "image_url" }));
    }

    #[test]
    fn test_batch_rejects_one_item_keeps_siblings() {
        let ctx = licensed_context("newswire", CommercialStatus::Allowed)
            .with_scope(SourceScope::ThirdPartyNews);
        let records = vec![
            record(json!({"license_id": "lic-1", "external_url": "https://a"})),
            record(json!({"license_id": "lic-1", "publisher_headline": "x"})),
            record(json!({"license_id": "lic-1", "external_url": "https://c"})),
        ];

        let report = GateEvaluator::default_config().evaluate_batch(&ctx, records).unwrap();

        assert_eq!(report.decisions.len(), 2);
        assert_eq!(report.count(Disposition::Admit), 2);
        assert_eq!(report.rejected, vec![RejectedItem {
            index: 1,
            error: GateError::ForbiddenField { field: "publisher_headline" },
        }]);
        let urls: Vec<_> = report.admitted().map(|r| r["external_url"].clone()).collect();
        assert_eq!(urls, vec![json!("https://a"), json!("https://c")]);
    }

    #[test]
    fn test_batch_hard_block_aborts_whole_batch() {
        let ctx = SourceContext::new("fred-mirror").unwrap();
        let records = vec![record(json!({"license_id": "lic-1"}))];

        let result = GateEvaluator::default_config().evaluate_batch(&ctx, records);
        assert!(matches!(result, Err(GateError::HardBlock { .. })));
    }

    #[test]
    fn test_eurostat_batch_end_to_end() {
        let ctx = licensed_context("eurostat", CommercialStatus::Allowed).with_scope(SourceScope::GeoScoped);
        let evaluator = GateEvaluator::default_config();
        let records = vec![
            record(json!({"geo": "EU", "value": 1})),
            record(json!({"geo": "US", "value": 2})),
            record(json!({"geo": "EFTA", "value": 3})),
        ];

        let report = evaluator.evaluate_batch(&ctx, records).unwrap();

        let admitted: Vec<Record> = report.admitted().cloned().collect();
        assert_eq!(admitted, vec![
            record(json!({"geo": "EU", "value": 1})),
            record(json!({"geo": "EFTA", "value": 3})),
        ]);
        assert_eq!(report.geo_dropped, 1);
        assert_eq!(report.count(Disposition::Dropped), 1);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_strict_snapshot_runs_after_geo_filter() {
        let ctx = licensed_context("eurostat", CommercialStatus::Allowed).with_scope(SourceScope::GeoScoped);
        let records = vec![
            record(json!({"geo": "EU", "license_id": "es-1"})),
            record(json!({"geo": "US"})),
            record(json!({"geo": "EA"})),
        ];

        let report = GateEvaluator::new(GateConfig::strict()).evaluate_batch(&ctx, records).unwrap();

        assert_eq!(report.count(Disposition::Admit), 1);
        assert_eq!(report.geo_dropped, 1);
        assert_eq!(report.rejected, vec![RejectedItem {
            index: 2,
            error: GateError::MissingLicense,
        }]);
    }

    #[test]
    fn test_batch_with_supplied_id_is_reproducible() {
        let ctx = licensed_context("eurostat", CommercialStatus::Conditional).with_scope(SourceScope::GeoScoped);
        let records = vec![record(json!({"geo": "EU"})), record(json!({"geo": "JP"}))];
        let batch_id = BatchId::from_value(42);
        let evaluator = GateEvaluator::default_config();

        let first = evaluator.evaluate_batch_as(batch_id, &ctx, records.clone()).unwrap();
        let second = evaluator.evaluate_batch_as(batch_id, &ctx, records).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.batch_id, batch_id);
    }

    #[test]
    fn test_batch_summary() {
        let ctx = licensed_context("ecb-sdw", CommercialStatus::Allowed);
        let records = vec![record(json!({"license_id": "a"})), record(json!({}))];

        let report = GateEvaluator::new(GateConfig::strict()).evaluate_batch(&ctx, records).unwrap();
        let summary = report.summary();
        assert!(summary.contains("'ecb-sdw'"));
        assert!(summary.contains("1 admitted"));
        assert!(summary.contains("1 rejected"));
    }
}
