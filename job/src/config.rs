//! Job configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::Result;

/// Default namespace prefix for emitted metric names.
pub const DEFAULT_METRIC_PREFIX: &str = "custom.signups";

/// Job configuration.
///
/// Configuration values can be set via environment variables:
/// - `SIGNUP_METRICS_PREFIX`: Namespace prefix for metric names (default: "custom.signups")
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prefix prepended to every metric name.
    pub metric_prefix: String,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be read.
    pub fn from_env() -> Result<Self> {
        let metric_prefix = std::env::var("SIGNUP_METRICS_PREFIX")
            .unwrap_or_else(|_| DEFAULT_METRIC_PREFIX.to_string());

        Ok(Self { metric_prefix })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metric_prefix: DEFAULT_METRIC_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_prefix() {
        let config = Config::default();
        assert_eq!(config.metric_prefix, "custom.signups");
    }

    #[test]
    fn test_config_with_custom_prefix() {
        // Create config directly to avoid env var conflicts with other tests
        let config = Config {
            metric_prefix: "custom.staging".to_string(),
        };

        assert_eq!(config.metric_prefix, "custom.staging");
    }
}
