//! Data models for the signup metrics job.
//!
//! This module contains the core data structures for signup records and
//! the metric points derived from them.

pub mod metric;
pub mod signup;

pub use metric::{MetricPoint, MetricPointValidationError};
pub use signup::Signup;
