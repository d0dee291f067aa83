//! Signup Metrics Shared Library
//!
//! This crate contains the data models and storage seams used by the
//! signup metrics aggregation job.
//!
//! # Modules
//!
//! - [`models`] - Data models for signups and metric points
//! - [`storage`] - Source and sink traits and implementations
//!
//! # Example
//!
//! ```
//! use shared::models::{MetricPoint, Signup};
//! use chrono::Utc;
//!
//! let signup = Signup::new("signup-1", Utc::now());
//! let point = MetricPoint::namespaced("custom.signups", "total_sign_ups", 1, Utc::now());
//!
//! assert_eq!(point.name, "custom.signups/total_sign_ups");
//! assert!(point.validate_point().is_ok());
//! assert!(signup.created_after(Utc::now() - chrono::Duration::days(1)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use validator;
