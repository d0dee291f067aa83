//! Signup source trait and implementations.
//!
//! Provides the `SignupSource` trait for enumerating the signup collection
//! and an `InMemorySignupSource` implementation for development and testing.

use crate::models::Signup;
use chrono::DateTime;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur while reading from a signup source.
#[derive(Debug, Error)]
pub enum SignupSourceError {
    /// Failed to acquire lock on the source.
    #[error("Failed to acquire lock on signup source")]
    LockError,

    /// The source could not be enumerated (connectivity, interrupted scan).
    #[error("Signup source unavailable: {0}")]
    Unavailable(String),
}

/// Trait for signup source implementations.
///
/// A source provides a snapshot-ish enumeration of all current signup
/// records. Implementations must be thread-safe (Send + Sync). A failed or
/// interrupted enumeration must surface as an error rather than a silently
/// short result.
pub trait SignupSource: Send + Sync {
    /// Fetches every signup currently in the collection, in no particular
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the enumeration fails or is interrupted.
    fn fetch_all(&self) -> Result<Vec<Signup>, SignupSourceError>;
}

/// In-memory signup source implementation.
#[derive(Debug, Default)]
pub struct InMemorySignupSource {
    signups: Arc<RwLock<Vec<Signup>>>,
}

impl InMemorySignupSource {
    /// Creates a new empty in-memory signup source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signups: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a new in-memory signup source seeded with the given records.
    #[must_use]
    pub fn with_signups(signups: Vec<Signup>) -> Self {
        Self {
            signups: Arc::new(RwLock::new(signups)),
        }
    }

    /// Creates a new in-memory signup source wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Adds a signup to the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock on the source cannot be acquired.
    pub fn push(&self, signup: Signup) -> Result<(), SignupSourceError> {
        let mut signups = self
            .signups
            .write()
            .map_err(|_| SignupSourceError::LockError)?;
        signups.push(signup);
        Ok(())
    }
}

impl SignupSource for InMemorySignupSource {
    fn fetch_all(&self) -> Result<Vec<Signup>, SignupSourceError> {
        let signups = self
            .signups
            .read()
            .map_err(|_| SignupSourceError::LockError)?;
        Ok(signups.clone())
    }
}

/// `ClickHouse`-backed signup source implementation.
///
/// Reads the `signups` table. Creation timestamps are stored as epoch
/// nanoseconds in an `Int64` column.
#[derive(Clone)]
pub struct ClickHouseSignupSource {
    client: Arc<clickhouse::Client>,
}

impl ClickHouseSignupSource {
    /// Creates a new `ClickHouse` signup source with the given client.
    #[must_use]
    pub fn new(client: Arc<clickhouse::Client>) -> Self {
        Self { client }
    }

    /// Creates a new `ClickHouse` signup source wrapped in an Arc.
    #[must_use]
    pub fn new_shared(client: Arc<clickhouse::Client>) -> Arc<Self> {
        Arc::new(Self::new(client))
    }

    /// Helper to execute async operations synchronously.
    fn block_on<F, T>(future: F) -> Result<T, SignupSourceError>
    where
        F: std::future::Future<Output = Result<T, clickhouse::error::Error>>,
    {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(future)
                .map_err(|e| SignupSourceError::Unavailable(e.to_string()))
        })
    }
}

impl SignupSource for ClickHouseSignupSource {
    fn fetch_all(&self) -> Result<Vec<Signup>, SignupSourceError> {
        #[derive(clickhouse::Row, serde::Deserialize)]
        struct SignupRow {
            id: String,
            created: i64,
        }

        let client = Arc::clone(&self.client);
        let rows: Vec<SignupRow> = Self::block_on(async move {
            client
                .query("SELECT id, created FROM signups")
                .fetch_all::<SignupRow>()
                .await
        })?;

        tracing::debug!(count = rows.len(), "Fetched signups from ClickHouse");

        let signups = rows
            .into_iter()
            .map(|row| Signup::new(row.id, DateTime::from_timestamp_nanos(row.created)))
            .collect();

        Ok(signups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_source_is_empty() {
        let source = InMemorySignupSource::new();
        assert!(source.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_push_and_fetch_all() {
        let source = InMemorySignupSource::new();
        source.push(Signup::new("a", Utc::now())).unwrap();
        source.push(Signup::new("b", Utc::now())).unwrap();

        let signups = source.fetch_all().unwrap();
        assert_eq!(signups.len(), 2);
        assert_eq!(signups[0].id, "a");
        assert_eq!(signups[1].id, "b");
    }

    #[test]
    fn test_with_signups_seeds_records() {
        let now = Utc::now();
        let source = InMemorySignupSource::with_signups(vec![
            Signup::new("a", now),
            Signup::new("b", now),
            Signup::new("c", now),
        ]);

        assert_eq!(source.fetch_all().unwrap().len(), 3);
    }

    #[test]
    fn test_fetch_all_returns_snapshot() {
        let source = InMemorySignupSource::new();
        source.push(Signup::new("a", Utc::now())).unwrap();

        let snapshot = source.fetch_all().unwrap();
        source.push(Signup::new("b", Utc::now())).unwrap();

        // The earlier enumeration is unaffected by later writes.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(source.fetch_all().unwrap().len(), 2);
    }
}
