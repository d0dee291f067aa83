//! Signup Metrics Job
//!
//! This crate provides the scheduled aggregation job that counts signups in
//! the datastore and emits "all time" and "past 24 hours" counts as
//! time-series points to the monitoring backend.
//!
//! # Architecture
//!
//! The job is a single linear pass: enumerate the signup source, bucket the
//! records against a trailing 24-hour window, submit two metric points as
//! one batch. It either completes the full scan and emits, or fails
//! entirely before emitting anything.
//!
//! # Example
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let counts = signup_metrics::run_once().await?;
//!     println!("total: {}, past day: {}", counts.total, counts.past_day);
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod counter;
mod db;

pub use config::Config;
pub use counter::{CountResult, RunError, SignupCounter, PAST_DAY_SIGN_UPS, TOTAL_SIGN_UPS};
pub use db::{Database, DatabaseConfig};

use anyhow::Result;
use shared::storage::{ClickHouseMetricSink, ClickHouseSignupSource};
use std::sync::Arc;
use std::time::Duration;

/// Builds a counter wired to the `ClickHouse` source and sink from
/// environment configuration.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the database is
/// unreachable.
async fn counter_from_env() -> Result<Arc<SignupCounter>> {
    let db_config = DatabaseConfig::from_env()?;
    let db = Database::new(&db_config);
    db.ping().await?;

    let config = Config::from_env()?;

    tracing::info!(
        url = %db_config.url,
        database = %db_config.database,
        prefix = %config.metric_prefix,
        "Signup metrics job configured"
    );

    let source = ClickHouseSignupSource::new_shared(db.client());
    let sink = ClickHouseMetricSink::new_shared(db.client());

    Ok(Arc::new(SignupCounter::new(
        source,
        sink,
        config.metric_prefix,
    )))
}

/// Runs one counting pass against the configured datastore.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the database is
/// unreachable, the signup scan fails, or the metric backend rejects the
/// batch. No partial metrics are emitted on failure.
pub async fn run_once() -> Result<CountResult> {
    let counter = counter_from_env().await?;
    let counts = counter.run()?;

    tracing::info!(
        total = counts.total,
        past_day = counts.past_day,
        "Signup metrics submitted"
    );

    Ok(counts)
}

/// Runs the counting loop at the given interval until cancelled.
///
/// Each pass is independent; a failed pass is logged and the loop keeps
/// going.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the database is
/// unreachable at startup.
pub async fn run_scheduled(every: Duration) -> Result<()> {
    let counter = counter_from_env().await?;

    tracing::info!(interval_secs = every.as_secs(), "Starting counting loop");

    counter.run_forever(every).await;
    Ok(())
}
