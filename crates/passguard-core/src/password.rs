//! Candidate passwords and their change history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A password that was in use before, as recorded by the host system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormerPassword {
    /// Hash of the former password, in the format of the configured
    /// [`HashFunction`](crate::HashFunction).
    pub hash: String,
    /// When the password was set.
    pub date: DateTime<Utc>,
}

impl FormerPassword {
    /// Creates a new former password record.
    #[must_use]
    pub fn new(hash: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            hash: hash.into(),
            date,
        }
    }
}

/// A candidate password together with the history rules may consult.
#[derive(Clone, Default)]
pub struct Password {
    secret: String,
    former_passwords: Vec<FormerPassword>,
}

impl Password {
    /// Creates a password without history.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            former_passwords: Vec::new(),
        }
    }

    /// Attaches former passwords.
    ///
    /// Records are kept most recent first. Records sharing a date keep
    /// the order they were given in.
    #[must_use]
    pub fn with_former_passwords(mut self, mut former: Vec<FormerPassword>) -> Self {
        former.sort_by(|a, b| b.date.cmp(&a.date));
        self.former_passwords = former;
        self
    }

    /// Returns the candidate password text.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns former passwords, most recent first.
    #[must_use]
    pub fn former_passwords(&self) -> &[FormerPassword] {
        &self.former_passwords
    }

    /// Returns the most recently changed former password, if any.
    #[must_use]
    pub fn last_change(&self) -> Option<&FormerPassword> {
        self.former_passwords.first()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("secret", &"<redacted>")
            .field("former_passwords", &self.former_passwords.len())
            .finish()
    }
}

impl From<&str> for Password {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Password {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}
