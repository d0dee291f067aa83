//! Signup record model.
//!
//! Defines the `Signup` structure read from the signup collection. The job
//! never creates or mutates signups; it only reads the creation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single registered signup.
///
/// The creation timestamp is set once by the external system that wrote the
/// record and is treated as immutable here.
///
/// # Example
///
/// ```
/// use shared::models::Signup;
/// use chrono::Utc;
///
/// let signup = Signup::new("signup-42", Utc::now());
/// assert_eq!(signup.id, "signup-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    /// Identifier of the signup record in the source collection.
    pub id: String,

    /// When the signup was created, with timezone.
    pub created: DateTime<Utc>,
}

impl Signup {
    /// Creates a new signup record.
    #[must_use]
    pub fn new(id: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created,
        }
    }

    /// Returns true if this signup was created strictly after the given
    /// cutoff instant.
    ///
    /// A signup created exactly at the cutoff is excluded.
    #[must_use]
    pub fn created_after(&self, cutoff: DateTime<Utc>) -> bool {
        self.created > cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_signup_new() {
        let now = Utc::now();
        let signup = Signup::new("abc", now);

        assert_eq!(signup.id, "abc");
        assert_eq!(signup.created, now);
    }

    #[test]
    fn test_created_after_is_strict() {
        let cutoff = Utc::now();
        let at_cutoff = Signup::new("boundary", cutoff);
        let after_cutoff = Signup::new("inside", cutoff + Duration::seconds(1));
        let before_cutoff = Signup::new("outside", cutoff - Duration::seconds(1));

        assert!(!at_cutoff.created_after(cutoff));
        assert!(after_cutoff.created_after(cutoff));
        assert!(!before_cutoff.created_after(cutoff));
    }
}
