//! Async driver that waits out rate-limit refusals

use crate::{IngestError, IngestOutcome, IngestPipeline};
use sluice_domain::traits::{Clock, RecordFetcher};
use sluice_domain::SourceContext;
use sluice_gatekeeper::BatchReport;
use std::fmt::Display;
use tokio::time::{sleep, Duration};

/// Runs ingestion attempts, sleeping until the limiter frees a slot
///
/// The limiter itself never waits; this worker owns the backoff policy.
///
/// # Examples
///
/// ```no_run
/// use sluice_domain::{Record, SourceContext};
/// use sluice_domain::traits::RecordFetcher;
/// use sluice_gatekeeper::GateEvaluator;
/// use sluice_ingest::{IngestConfig, IngestPipeline, IngestWorker};
/// use sluice_limiter::{LimiterConfig, SystemClock};
///
/// struct Feed;
///
/// impl RecordFetcher for Feed {
///     type Error = String;
///     fn fetch(&mut self, _source: &str) -> Result<Vec<Record>, String> {
///         Ok(Vec::new())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = IngestPipeline::from_config(
///         IngestConfig::default(),
///         GateEvaluator::default_config(),
///         &LimiterConfig::default().with_limit("ecb-sdw", 10),
///         SystemClock,
///     )?;
///     let mut worker = IngestWorker::new(pipeline);
///
///     let ctx = SourceContext::new("ecb-sdw")?;
///     let report = worker.ingest(&ctx, &mut Feed).await?;
///     println!("{}", report.summary());
///     Ok(())
/// }
/// ```
pub struct IngestWorker<C: Clock> {
    pipeline: IngestPipeline<C>,
}

impl<C: Clock> IngestWorker<C> {
    /// Create a worker around `pipeline`
    pub fn new(pipeline: IngestPipeline<C>) -> Self {
        Self { pipeline }
    }

    /// Get the underlying pipeline
    pub fn pipeline(&self) -> &IngestPipeline<C> {
        &self.pipeline
    }

    /// Ingest one batch from `ctx`, waiting out throttles
    ///
    /// # Errors
    ///
    /// [`IngestError::ThrottleExhausted`] after
    /// `max_throttle_retries` refusals, or any error from the pipeline.
    pub async fn ingest<F>(&mut self, ctx: &SourceContext, fetcher: &mut F) -> Result<BatchReport, IngestError>
    where
        F: RecordFetcher,
        F::Error: Display,
    {
        let max_retries = self.pipeline.config().max_throttle_retries;
        let mut retries = 0;

        loop {
            match self.pipeline.ingest_once(ctx, fetcher)? {
                IngestOutcome::Evaluated(report) => return Ok(report),
                IngestOutcome::Throttled { retry_at } => {
                    if retries >= max_retries {
                        return Err(IngestError::ThrottleExhausted {
                            source_name: ctx.source_name.clone(),
                            retries,
                        });
                    }
                    retries += 1;

                    let wait = retry_at.saturating_sub(self.pipeline.clock().now_millis());
                    tracing::debug!(
                        source = %ctx.source_name,
                        "Throttled, retry {}/{} in {}ms",
                        retries,
                        max_retries,
                        wait
                    );
                    sleep(Duration::from_millis(wait)).await;
                }
            }
        }
    }

    /// Ingest one batch from each source in turn
    ///
    /// A failing source does not stop the others; each gets its own result,
    /// in input order.
    pub async fn ingest_all<F>(
        &mut self,
        contexts: &[SourceContext],
        fetcher: &mut F,
    ) -> Vec<Result<BatchReport, IngestError>>
    where
        F: RecordFetcher,
        F::Error: Display,
    {
        let mut results = Vec::with_capacity(contexts.len());

        for ctx in contexts {
            let result = self.ingest(ctx, fetcher).await;
            match &result {
                Ok(report) => tracing::info!("{}", report.summary()),
                Err(e) => tracing::error!(source = %ctx.source_name, "Ingestion failed: {}", e),
            }
            results.push(result);
        }

        tracing::info!("Ingestion pass finished. Metrics:\n{}", self.pipeline.metrics().summary());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IngestConfig;
    use serde_json::json;
    use sluice_domain::Record;
    use sluice_gatekeeper::{GateConfig, GateEvaluator};
    use sluice_limiter::{LimiterConfig, LimiterRegistry};

    /// Clock following tokio's (pausable) time
    struct TokioClock {
        start: tokio::time::Instant,
        base: u64,
    }

    impl TokioClock {
        fn new(base: u64) -> Self {
            Self {
                start: tokio::time::Instant::now(),
                base,
            }
        }
    }

    impl Clock for TokioClock {
        fn now_millis(&self) -> u64 {
            self.base + self.start.elapsed().as_millis() as u64
        }
    }

    struct CountingFetcher {
        calls: usize,
    }

    impl RecordFetcher for CountingFetcher {
        type Error = String;

        fn fetch(&mut self, _source_name: &str) -> Result<Vec<Record>, Self::Error> {
            self.calls += 1;
            Ok(vec![json!({"value": self.calls}).as_object().cloned().unwrap()])
        }
    }

    fn worker(max_per_second: u32, config: IngestConfig) -> IngestWorker<TokioClock> {
        let limits = LimiterConfig::default().with_limit("ecb-sdw", max_per_second);
        IngestWorker::new(IngestPipeline::new(
            config,
            GateEvaluator::new(GateConfig::default()),
            LimiterRegistry::from_config(&limits).unwrap(),
            TokioClock::new(1_700_000_000_000),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_out_throttle() {
        let mut worker = worker(2, IngestConfig::default());
        let mut fetcher = CountingFetcher { calls: 0 };
        let ctx = SourceContext::new("ecb-sdw").unwrap();
        let started = tokio::time::Instant::now();

        for _ in 0..3 {
            worker.ingest(&ctx, &mut fetcher).await.unwrap();
        }

        assert_eq!(fetcher.calls, 3);
        assert!(started.elapsed() >= Duration::from_millis(1_000));
        assert_eq!(worker.pipeline().metrics().throttled, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let config = IngestConfig {
            max_throttle_retries: 0,
            ..IngestConfig::default()
        };
        let mut worker = worker(1, config);
        let mut fetcher = CountingFetcher { calls: 0 };
        let ctx = SourceContext::new("ecb-sdw").unwrap();

        worker.ingest(&ctx, &mut fetcher).await.unwrap();
        let err = worker.ingest(&ctx, &mut fetcher).await.unwrap_err();

        assert!(matches!(err, IngestError::ThrottleExhausted { retries: 0, .. }));
        assert_eq!(fetcher.calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_source_does_not_stop_others() {
        let mut worker = worker(10, IngestConfig::default());
        let mut fetcher = CountingFetcher { calls: 0 };
        let contexts = vec![
            SourceContext::new("FRED").unwrap(),
            SourceContext::new("ecb-sdw").unwrap(),
        ];

        let results = worker.ingest_all(&contexts, &mut fetcher).await;

        assert!(matches!(results[0], Err(IngestError::HardBlocked(_))));
        assert!(results[1].is_ok());
        assert_eq!(fetcher.calls, 1);
    }
}
