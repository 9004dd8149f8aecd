//! Metrics collection for ingestion runs

use sluice_gatekeeper::{BatchReport, Disposition};
use std::collections::BTreeMap;

/// Counters collected across ingestion runs
///
/// Tracks gate outcomes per record and pipeline events per batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestMetrics {
    /// Batches fetched and evaluated
    pub batches: usize,

    /// Records admitted for storage and display
    pub admitted: usize,

    /// Records stored but kept out of production display
    pub production_blocked: usize,

    /// Records stored but quarantined
    pub quarantined: usize,

    /// Rows dropped by the geography filter
    pub geo_dropped: usize,

    /// Records rejected, per error kind
    pub rejected: BTreeMap<&'static str, usize>,

    /// Fetch attempts refused by the rate limiter
    pub throttled: usize,

    /// Ingestion attempts refused because the source is hard-blocked
    pub hard_blocked: usize,

    /// Fetches that failed
    pub fetch_failures: usize,
}

impl IngestMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of an evaluated batch
    pub fn record_batch(&mut self, report: &BatchReport) {
        self.batches += 1;
        self.admitted += report.count(Disposition::Admit);
        self.production_blocked += report.count(Disposition::ProductionBlocked);
        self.quarantined += report.count(Disposition::Quarantine);
        self.geo_dropped += report.geo_dropped;
        for item in &report.rejected {
            *self.rejected.entry(item.error.kind()).or_insert(0) += 1;
        }
    }

    /// Record a rate-limiter refusal
    pub fn record_throttle(&mut self) {
        self.throttled += 1;
    }

    /// Record a hard-blocked attempt
    pub fn record_hard_block(&mut self) {
        self.hard_blocked += 1;
    }

    /// Record a failed fetch
    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    /// Total records rejected across error kinds
    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    /// Total records stored (admitted, production-blocked or quarantined)
    pub fn total_stored(&self) -> usize {
        self.admitted + self.production_blocked + self.quarantined
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Ingest Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Batches: {}", self.batches),
            format!("Admitted: {}", self.admitted),
            format!("Production-blocked: {}", self.production_blocked),
            format!("Quarantined: {}", self.quarantined),
            format!("Geo-dropped: {}", self.geo_dropped),
            format!("Throttled: {}", self.throttled),
            format!("Hard-blocked: {}", self.hard_blocked),
            format!("Fetch failures: {}", self.fetch_failures),
        ];

        if !self.rejected.is_empty() {
            lines.push(String::new());
            lines.push("Rejections by kind:".to_string());
            for (kind, count) in &self.rejected {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_rejected()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sluice_domain::{CommercialStatus, LicenseRecord, Record, SourceContext, SourceScope};
    use sluice_gatekeeper::GateEvaluator;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn sample_report() -> BatchReport {
        let ctx = SourceContext::new("newswire")
            .unwrap()
            .with_license(LicenseRecord::new("NEWS-1", CommercialStatus::Allowed).unwrap())
            .with_scope(SourceScope::ThirdPartyNews);
        let records = vec![
            record(json!({"license_id": "a", "external_url": "https://a"})),
            record(json!({"license_id": "b", "body": "text"})),
            record(json!({"external_url": "https://c"})),
        ];
        GateEvaluator::default_config().evaluate_batch(&ctx, records).unwrap()
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = IngestMetrics::new();
        assert_eq!(metrics.batches, 0);
        assert_eq!(metrics.total_rejected(), 0);
        assert_eq!(metrics.total_stored(), 0);
    }

    #[test]
    fn test_record_batch() {
        let mut metrics = IngestMetrics::new();
        metrics.record_batch(&sample_report());

        assert_eq!(metrics.batches, 1);
        assert_eq!(metrics.admitted, 1);
        assert_eq!(metrics.rejected["forbidden_field"], 1);
        assert_eq!(metrics.rejected["missing_license"], 1);
        assert_eq!(metrics.total_rejected(), 2);
    }

    #[test]
    fn test_reset() {
        let mut metrics = IngestMetrics::new();
        metrics.record_batch(&sample_report());
        metrics.record_throttle();
        metrics.record_hard_block();

        metrics.reset();
        assert_eq!(metrics, IngestMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = IngestMetrics::new();
        metrics.record_batch(&sample_report());
        metrics.record_throttle();
        metrics.record_fetch_failure();

        let summary = metrics.summary();
        assert!(summary.contains("Batches: 1"));
        assert!(summary.contains("Throttled: 1"));
        assert!(summary.contains("Fetch failures: 1"));
        assert!(summary.contains("forbidden_field: 1"));
        assert!(summary.contains("Total: 2"));
    }
}
