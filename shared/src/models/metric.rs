//! Metric point model.
//!
//! Defines the `MetricPoint` structure submitted to the monitoring backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// A single named, timestamped integer observation destined for the
/// monitoring backend.
///
/// Metric names are fully qualified: a namespace prefix followed by a slash
/// and a short name, e.g. `custom.signups/total_sign_ups`. Points are
/// created fresh on every run and handed to the sink immediately; nothing
/// is persisted locally.
///
/// # Example
///
/// ```
/// use shared::models::MetricPoint;
/// use chrono::Utc;
///
/// let point = MetricPoint::namespaced("custom.signups", "total_sign_ups", 128, Utc::now());
///
/// assert_eq!(point.name, "custom.signups/total_sign_ups");
/// assert_eq!(point.value, 128);
/// assert!(point.validate_point().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MetricPoint {
    /// Fully-qualified metric name.
    #[validate(length(min = 1, message = "Metric name cannot be empty"))]
    pub name: String,

    /// The observed value. Counts are never negative.
    pub value: u64,

    /// End-of-interval timestamp of the observation. Second resolution is
    /// sufficient for the backend.
    pub timestamp: DateTime<Utc>,
}

/// Errors that can occur during metric point validation.
#[derive(Debug, Error)]
pub enum MetricPointValidationError {
    /// The metric name is empty.
    #[error("Metric name cannot be empty")]
    EmptyName,

    /// The metric name is not namespaced with a `<prefix>/<short_name>` path.
    #[error("Metric name is not fully qualified: '{0}'")]
    UnqualifiedName(String),

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl MetricPoint {
    /// Creates a new metric point with an already fully-qualified name.
    #[must_use]
    pub fn new(name: impl Into<String>, value: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            value,
            timestamp,
        }
    }

    /// Creates a new metric point named `<prefix>/<short_name>`.
    #[must_use]
    pub fn namespaced(
        prefix: &str,
        short_name: &str,
        value: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(format!("{prefix}/{short_name}"), value, timestamp)
    }

    /// Validates the metric point.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is empty
    /// - The name carries no namespace prefix
    pub fn validate_point(&self) -> Result<(), MetricPointValidationError> {
        if self.name.is_empty() {
            return Err(MetricPointValidationError::EmptyName);
        }

        if !self.name.contains('/') {
            return Err(MetricPointValidationError::UnqualifiedName(
                self.name.clone(),
            ));
        }

        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_name() {
        let point = MetricPoint::namespaced("custom.signups", "past_day_sign_ups", 7, Utc::now());

        assert_eq!(point.name, "custom.signups/past_day_sign_ups");
        assert_eq!(point.value, 7);
    }

    #[test]
    fn test_validation_success() {
        let point = MetricPoint::namespaced("custom.signups", "total_sign_ups", 0, Utc::now());
        assert!(point.validate_point().is_ok());
    }

    #[test]
    fn test_validation_empty_name() {
        let point = MetricPoint::new("", 1, Utc::now());
        let result = point.validate_point();
        assert!(matches!(result, Err(MetricPointValidationError::EmptyName)));
    }

    #[test]
    fn test_validation_unqualified_name() {
        let point = MetricPoint::new("total_sign_ups", 1, Utc::now());
        let result = point.validate_point();
        assert!(matches!(
            result,
            Err(MetricPointValidationError::UnqualifiedName(_))
        ));
    }

    #[test]
    fn test_serialized_fields() {
        let point = MetricPoint::namespaced("custom.signups", "total_sign_ups", 42, Utc::now());
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json["name"], "custom.signups/total_sign_ups");
        assert_eq!(json["value"], 42);
        assert!(json["timestamp"].is_string());
    }
}
