//! Database connection module for `ClickHouse`.
//!
//! This module provides client configuration for the `ClickHouse` database
//! holding the signup collection and the metric time-series table. It
//! supports creating client instances from environment variables so the
//! source and sink can be wired up explicitly at startup.

use anyhow::{Context, Result};
use clickhouse::Client;
use std::sync::Arc;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `ClickHouse` database URL (e.g., <http://localhost:8123>)
    pub url: String,
    /// Database name to use
    pub database: String,
    /// Username for authentication
    pub user: String,
    /// Password for authentication
    pub password: String,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SIGNUP_METRICS_DB_URL`: Database URL (default: <http://localhost:8123>)
    /// - `SIGNUP_METRICS_DB_NAME`: Database name (default: "signups")
    /// - `SIGNUP_METRICS_DB_USER`: Database user (default: "signups")
    /// - `SIGNUP_METRICS_DB_PASSWORD`: Database password (default: "`signups_dev`")
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables cannot be read.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: std::env::var("SIGNUP_METRICS_DB_URL")
                .unwrap_or_else(|_| "http://localhost:8123".to_string()),
            database: std::env::var("SIGNUP_METRICS_DB_NAME")
                .unwrap_or_else(|_| "signups".to_string()),
            user: std::env::var("SIGNUP_METRICS_DB_USER")
                .unwrap_or_else(|_| "signups".to_string()),
            password: std::env::var("SIGNUP_METRICS_DB_PASSWORD")
                .unwrap_or_else(|_| "signups_dev".to_string()),
        })
    }
}

/// Database client wrapper.
#[derive(Clone)]
pub struct Database {
    client: Arc<Client>,
}

impl Database {
    /// Create a new database client from configuration.
    #[must_use]
    pub fn new(config: &DatabaseConfig) -> Self {
        let client = Client::default()
            .with_url(&config.url)
            .with_database(&config.database)
            .with_user(&config.user)
            .with_password(&config.password);

        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying `ClickHouse` client.
    #[must_use]
    pub fn client(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }

    /// Test database connectivity by executing a simple query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or the query fails.
    pub async fn ping(&self) -> Result<()> {
        self.client
            .query("SELECT 1")
            .fetch_one::<u8>()
            .await
            .context("Failed to ping database")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_from_env_with_defaults() {
        // Clear any existing env vars
        std::env::remove_var("SIGNUP_METRICS_DB_URL");
        std::env::remove_var("SIGNUP_METRICS_DB_NAME");
        std::env::remove_var("SIGNUP_METRICS_DB_USER");
        std::env::remove_var("SIGNUP_METRICS_DB_PASSWORD");

        let config = DatabaseConfig::from_env().expect("Failed to load config");

        assert_eq!(config.url, "http://localhost:8123");
        assert_eq!(config.database, "signups");
        assert_eq!(config.user, "signups");
        assert_eq!(config.password, "signups_dev");
    }

    #[test]
    fn test_database_config_with_custom_values() {
        // Create config directly to avoid env var conflicts with other tests
        let config = DatabaseConfig {
            url: "http://custom:8123".to_string(),
            database: "test_db".to_string(),
            user: "test_user".to_string(),
            password: "test_pass".to_string(),
        };

        assert_eq!(config.url, "http://custom:8123");
        assert_eq!(config.database, "test_db");
        assert_eq!(config.user, "test_user");
        assert_eq!(config.password, "test_pass");
    }

    #[test]
    fn test_database_creation() {
        let config = DatabaseConfig {
            url: "http://localhost:8123".to_string(),
            database: "signups".to_string(),
            user: "signups".to_string(),
            password: "signups_dev".to_string(),
        };

        let _db = Database::new(&config);
        // If we get here without panicking, the database was created successfully
    }
}
