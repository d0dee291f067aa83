//! Source and sink traits and implementations.
//!
//! This module provides the two external seams of the job: `SignupSource`
//! enumerates the signup collection and `MetricSink` accepts batches of
//! metric points. Each trait ships with an in-memory implementation for
//! development and testing and a `ClickHouse`-backed one for production.

pub mod metric_sink;
pub mod signup_source;

pub use metric_sink::{
    ClickHouseMetricSink, InMemoryMetricSink, MetricSink, MetricSinkError,
};
pub use signup_source::{
    ClickHouseSignupSource, InMemorySignupSource, SignupSource, SignupSourceError,
};
