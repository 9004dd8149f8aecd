//! Throttled fetch followed by gate evaluation

use crate::{IngestConfig, IngestError, IngestMetrics};
use sluice_domain::traits::{Clock, RecordFetcher};
use sluice_domain::SourceContext;
use sluice_gatekeeper::rules::assert_no_fred;
use sluice_gatekeeper::{BatchReport, GateError, GateEvaluator};
use sluice_limiter::{LimiterConfig, LimiterRegistry};
use std::collections::HashSet;
use std::fmt::Display;

/// Result of one ingestion attempt
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// Batch fetched and evaluated
    Evaluated(BatchReport),

    /// Rate limiter refused; nothing was fetched
    Throttled {
        /// Time (ms) at which a slot frees up
        retry_at: u64,
    },
}

/// Drives one source through limiter, fetch and gate
///
/// For each attempt:
/// 1. Refuse hard-blocked sources before touching the network
/// 2. Take a rate-limit slot for the source's dependency, if it has one
/// 3. Fetch the batch
/// 4. Evaluate the batch and record metrics
///
/// A source that hard-blocks is remembered and refused on later attempts.
pub struct IngestPipeline<C: Clock> {
    config: IngestConfig,
    evaluator: GateEvaluator,
    limiters: LimiterRegistry,
    clock: C,
    blocked_sources: HashSet<String>,
    metrics: IngestMetrics,
}

impl<C: Clock> IngestPipeline<C> {
    /// Create a pipeline
    pub fn new(config: IngestConfig, evaluator: GateEvaluator, limiters: LimiterRegistry, clock: C) -> Self {
        Self {
            config,
            evaluator,
            limiters,
            clock,
            blocked_sources: HashSet::new(),
            metrics: IngestMetrics::new(),
        }
    }

    /// Create a pipeline, building one limiter per entry of `limits`
    ///
    /// # Errors
    ///
    /// [`IngestError::Limiter`] if a limit is invalid (zero per second).
    pub fn from_config(
        config: IngestConfig,
        evaluator: GateEvaluator,
        limits: &LimiterConfig,
        clock: C,
    ) -> Result<Self, IngestError> {
        let limiters = LimiterRegistry::from_config(limits)?;
        Ok(Self::new(config, evaluator, limiters, clock))
    }

    /// Get the pipeline configuration
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Get the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &IngestMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Whether `source` has been hard-blocked
    pub fn is_blocked(&self, source: &str) -> bool {
        self.blocked_sources.contains(source)
    }

    /// Run one ingestion attempt for `ctx`
    ///
    /// # Errors
    ///
    /// [`IngestError::HardBlocked`] if the source is forbidden (nothing is
    /// fetched), [`IngestError::Fetch`] if the fetcher fails. Record-level
    /// rejections are part of the returned report, not errors.
    pub fn ingest_once<F>(&mut self, ctx: &SourceContext, fetcher: &mut F) -> Result<IngestOutcome, IngestError>
    where
        F: RecordFetcher,
        F::Error: Display,
    {
        let source = ctx.source_name.as_str();

        if self.is_blocked(source) {
            self.metrics.record_hard_block();
            return Err(IngestError::HardBlocked(source.to_string()));
        }
        if let Err(e) = assert_no_fred(source) {
            return Err(self.hard_block(e));
        }

        let dependency = self.config.dependency_for(source);
        if let Some(limiter) = self.limiters.get(dependency) {
            let now = self.clock.now_millis();
            if let Err(retry_at) = limiter.try_acquire(now) {
                tracing::debug!(source, dependency, retry_at, "Fetch throttled");
                self.metrics.record_throttle();
                return Ok(IngestOutcome::Throttled { retry_at });
            }
        }

        let records = fetcher.fetch(source).map_err(|e| {
            self.metrics.record_fetch_failure();
            tracing::error!(source, "Fetch failed: {}", e);
            IngestError::Fetch {
                source_name: source.to_string(),
                message: e.to_string(),
            }
        })?;

        match self.evaluator.evaluate_batch(ctx, records) {
            Ok(report) => {
                self.metrics.record_batch(&report);
                Ok(IngestOutcome::Evaluated(report))
            }
            Err(e) => Err(self.hard_block(e)),
        }
    }

    fn hard_block(&mut self, error: GateError) -> IngestError {
        let source = match error {
            GateError::HardBlock { source_name } => source_name,
            // Only the source-level check can fail a whole batch
            other => other.to_string(),
        };
        tracing::warn!(source = %source, "Source hard-blocked; ingestion stopped");
        self.metrics.record_hard_block();
        self.blocked_sources.insert(source.clone());
        IngestError::HardBlocked(source)
    }
}
