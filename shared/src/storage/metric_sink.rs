//! Metric sink trait and implementations.
//!
//! Provides the `MetricSink` trait for submitting metric point batches to a
//! monitoring backend and an `InMemoryMetricSink` implementation for
//! development and testing.

use crate::models::MetricPoint;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur while submitting to a metric sink.
#[derive(Debug, Error)]
pub enum MetricSinkError {
    /// Failed to acquire lock on the sink.
    #[error("Failed to acquire lock on metric sink")]
    LockError,

    /// The backend rejected the batch.
    #[error("Metric sink rejected batch: {0}")]
    Rejected(String),
}

/// Trait for metric sink implementations.
///
/// A sink accepts an ordered batch of metric points in a single call. The
/// batch is atomic from the caller's view: either every point is accepted
/// or the submission fails as a whole. Implementations must be thread-safe
/// (Send + Sync).
pub trait MetricSink: Send + Sync {
    /// Submits a batch of metric points to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the batch; no point from a
    /// rejected batch is persisted.
    fn submit(&self, points: Vec<MetricPoint>) -> Result<(), MetricSinkError>;
}

/// In-memory metric sink implementation.
///
/// Records every submitted batch for later inspection.
#[derive(Debug, Default)]
pub struct InMemoryMetricSink {
    batches: Arc<RwLock<Vec<Vec<MetricPoint>>>>,
}

impl InMemoryMetricSink {
    /// Creates a new empty in-memory metric sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            batches: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory metric sink wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns every batch submitted so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock on the sink cannot be acquired.
    pub fn submitted(&self) -> Result<Vec<Vec<MetricPoint>>, MetricSinkError> {
        let batches = self
            .batches
            .read()
            .map_err(|_| MetricSinkError::LockError)?;
        Ok(batches.clone())
    }

    /// Returns the number of batches submitted so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock on the sink cannot be acquired.
    pub fn batch_count(&self) -> Result<usize, MetricSinkError> {
        let batches = self
            .batches
            .read()
            .map_err(|_| MetricSinkError::LockError)?;
        Ok(batches.len())
    }
}

impl MetricSink for InMemoryMetricSink {
    fn submit(&self, points: Vec<MetricPoint>) -> Result<(), MetricSinkError> {
        let mut batches = self
            .batches
            .write()
            .map_err(|_| MetricSinkError::LockError)?;
        batches.push(points);
        Ok(())
    }
}

/// `ClickHouse`-backed metric sink implementation.
///
/// Appends points to the `signup_metrics` time-series table. The whole
/// batch goes through one inserter and is committed with a single `end()`,
/// so a rejected batch leaves no partial rows behind.
#[derive(Clone)]
pub struct ClickHouseMetricSink {
    client: Arc<clickhouse::Client>,
}

impl ClickHouseMetricSink {
    /// Creates a new `ClickHouse` metric sink with the given client.
    #[must_use]
    pub fn new(client: Arc<clickhouse::Client>) -> Self {
        Self { client }
    }

    /// Creates a new `ClickHouse` metric sink wrapped in an Arc.
    #[must_use]
    pub fn new_shared(client: Arc<clickhouse::Client>) -> Arc<Self> {
        Arc::new(Self::new(client))
    }

    /// Helper to execute async operations synchronously.
    fn block_on<F, T>(future: F) -> Result<T, MetricSinkError>
    where
        F: std::future::Future<Output = Result<T, clickhouse::error::Error>>,
    {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(future)
                .map_err(|e| MetricSinkError::Rejected(e.to_string()))
        })
    }
}

impl MetricSink for ClickHouseMetricSink {
    fn submit(&self, points: Vec<MetricPoint>) -> Result<(), MetricSinkError> {
        if points.is_empty() {
            return Ok(());
        }

        let client = Arc::clone(&self.client);
        Self::block_on(async move {
            #[derive(clickhouse::Row, serde::Serialize)]
            struct MetricRow {
                // The backend keys points at second resolution.
                timestamp: i64,
                name: String,
                value: u64,
            }

            let mut inserter = client.insert::<MetricRow>("signup_metrics").await?;

            for point in points {
                let row = MetricRow {
                    timestamp: point.timestamp.timestamp(),
                    name: point.name,
                    value: point.value,
                };

                inserter.write(&row).await?;
            }

            inserter.end().await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_point(short_name: &str, value: u64) -> MetricPoint {
        MetricPoint::namespaced("custom.signups", short_name, value, Utc::now())
    }

    #[test]
    fn test_new_sink_is_empty() {
        let sink = InMemoryMetricSink::new();
        assert_eq!(sink.batch_count().unwrap(), 0);
    }

    #[test]
    fn test_submit_records_batch() {
        let sink = InMemoryMetricSink::new();
        sink.submit(vec![
            create_test_point("total_sign_ups", 10),
            create_test_point("past_day_sign_ups", 3),
        ])
        .unwrap();

        let batches = sink.submitted().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[0][0].name, "custom.signups/total_sign_ups");
        assert_eq!(batches[0][1].name, "custom.signups/past_day_sign_ups");
    }

    #[test]
    fn test_submit_preserves_batch_order() {
        let sink = InMemoryMetricSink::new();
        sink.submit(vec![create_test_point("total_sign_ups", 1)])
            .unwrap();
        sink.submit(vec![create_test_point("total_sign_ups", 2)])
            .unwrap();

        let batches = sink.submitted().unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0][0].value, 1);
        assert_eq!(batches[1][0].value, 2);
    }

    #[test]
    fn test_submit_empty_batch() {
        let sink = InMemoryMetricSink::new();
        sink.submit(Vec::new()).unwrap();

        assert_eq!(sink.batch_count().unwrap(), 1);
        assert!(sink.submitted().unwrap()[0].is_empty());
    }
}
