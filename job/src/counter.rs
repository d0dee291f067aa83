//! Signup counting and metric emission.
//!
//! The counter performs one full scan of the signup source, buckets the
//! records into "all time" and "past 24 hours" counts, and submits both as
//! one metric point batch.

use chrono::{DateTime, Duration, Utc};
use shared::models::{MetricPoint, Signup};
use shared::storage::{MetricSink, MetricSinkError, SignupSource, SignupSourceError};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use thiserror::Error;
use tokio::time::interval;

/// Short name of the all-time count metric.
pub const TOTAL_SIGN_UPS: &str = "total_sign_ups";

/// Short name of the trailing-day count metric.
pub const PAST_DAY_SIGN_UPS: &str = "past_day_sign_ups";

/// Errors that can abort a counting run.
///
/// Both kinds are terminal for the run: no partial metrics are emitted, no
/// retry happens, and the error propagates to the caller so external
/// scheduling or alerting can react.
#[derive(Debug, Error)]
pub enum RunError {
    /// The signup scan failed; nothing was submitted.
    #[error("Signup scan failed: {0}")]
    Source(#[from] SignupSourceError),

    /// The metric backend rejected the batch; the computed counts are
    /// discarded.
    #[error("Metric submission failed: {0}")]
    Sink(#[from] MetricSinkError),
}

/// Result of one counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountResult {
    /// Count of all signups seen.
    pub total: u64,

    /// Count of signups created within the trailing 24-hour window.
    /// Always `<= total`.
    pub past_day: u64,
}

/// Counts signups and emits the two counts as metric points.
///
/// Stateless across runs: every invocation recomputes both counts from a
/// fresh scan of the source. Collaborators are injected explicitly so tests
/// can substitute in-memory fakes.
pub struct SignupCounter {
    source: Arc<dyn SignupSource>,
    sink: Arc<dyn MetricSink>,
    metric_prefix: String,
}

impl SignupCounter {
    /// Creates a new counter over the given source and sink.
    ///
    /// Metric names are qualified as `<metric_prefix>/<short_name>`.
    #[must_use]
    pub fn new(
        source: Arc<dyn SignupSource>,
        sink: Arc<dyn MetricSink>,
        metric_prefix: impl Into<String>,
    ) -> Self {
        Self {
            source,
            sink,
            metric_prefix: metric_prefix.into(),
        }
    }

    /// Performs one counting pass and submits the resulting points.
    ///
    /// The reference instant is captured once before iteration begins; the
    /// window cutoff does not track the scan's wall-clock progress. The
    /// scan is a best-effort snapshot, not a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be enumerated or the sink
    /// rejects the batch. In either case nothing partial is emitted.
    pub fn run(&self) -> Result<CountResult, RunError> {
        self.run_at(Utc::now())
    }

    /// Performs one counting pass against an explicit reference instant.
    ///
    /// # Errors
    ///
    /// Same as [`SignupCounter::run`].
    pub fn run_at(&self, now: DateTime<Utc>) -> Result<CountResult, RunError> {
        let signups = self.source.fetch_all()?;
        let counts = count_signups(&signups, now);

        tracing::info!(
            total = counts.total,
            past_day = counts.past_day,
            "Signup counts computed"
        );

        self.sink.submit(vec![
            MetricPoint::namespaced(&self.metric_prefix, TOTAL_SIGN_UPS, counts.total, now),
            MetricPoint::namespaced(&self.metric_prefix, PAST_DAY_SIGN_UPS, counts.past_day, now),
        ])?;

        Ok(counts)
    }

    /// Starts the scheduled counting loop.
    ///
    /// Runs indefinitely, performing one full pass at the configured
    /// interval. Runs are independent and idempotent with respect to the
    /// source, so a failed pass is logged and the loop keeps going.
    ///
    /// # Cancellation
    ///
    /// This function runs until cancelled via the task handle.
    pub async fn run_forever(self: Arc<Self>, interval_duration: StdDuration) {
        let mut tick = interval(interval_duration);

        loop {
            tick.tick().await;

            match self.run() {
                Ok(counts) => {
                    tracing::info!(
                        total = counts.total,
                        past_day = counts.past_day,
                        "Signup metrics submitted"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, "Signup counting run failed");
                }
            }
        }
    }
}

/// Buckets signups into all-time and trailing-day counts.
///
/// The trailing window is the 24 hours ending at `now`; a signup created
/// exactly 24 hours before `now` falls outside it (strict greater-than).
/// Signups with a future `created` land in both buckets.
fn count_signups(signups: &[Signup], now: DateTime<Utc>) -> CountResult {
    let cutoff = now - Duration::days(1);

    let mut total = 0;
    let mut past_day = 0;
    for signup in signups {
        total += 1;
        if signup.created_after(cutoff) {
            past_day += 1;
        }
    }

    CountResult { total, past_day }
}
