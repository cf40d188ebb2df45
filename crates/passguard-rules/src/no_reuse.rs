//! Rule forbidding reuse of former passwords.
//!
//! Former passwords are compared through a [`HashFunction`], most recent
//! first. `first` is 1-based: `first = 2` skips the current password's
//! predecessor, which is useful when history includes the password being
//! replaced.
//!
//! # Configuration
//!
//! ```toml
//! [rules.no-reuse]
//! count = 5
//! first = 1
//! ```

use passguard_core::{
    HashFunction, Message, Password, Rule, RuleError, ValidationError, Weight, DEFAULT_WEIGHT,
};

/// Rule code for no-reuse.
pub const CODE: &str = "PG021";

/// Rule name for no-reuse.
pub const NAME: &str = "no-reuse";

/// Description of no-reuse.
pub const DESCRIPTION: &str = "Forbids reusing former passwords";

const MESSAGE: &str = "Cannot reuse former passwords.";

/// Forbids reusing recent former passwords.
pub struct NoReuseRule {
    hasher: Box<dyn HashFunction>,
    count: Option<usize>,
    first: usize,
    weight: Weight,
}

impl NoReuseRule {
    /// Creates a rule checking `count` former passwords starting at the
    /// `first` most recent (1-based). `None` checks all of them.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if `count` or `first` is
    /// zero.
    pub fn new<H: HashFunction + 'static>(
        hasher: H,
        count: Option<usize>,
        first: usize,
    ) -> Result<Self, RuleError> {
        Self::from_box(Box::new(hasher), count, first)
    }

    /// Creates a rule from a boxed hash function.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if `count` or `first` is
    /// zero.
    pub fn from_box(
        hasher: Box<dyn HashFunction>,
        count: Option<usize>,
        first: usize,
    ) -> Result<Self, RuleError> {
        if count == Some(0) {
            return Err(RuleError::invalid("Count must be positive."));
        }
        if first == 0 {
            return Err(RuleError::invalid("First must be positive."));
        }
        Ok(Self {
            hasher,
            count,
            first,
            weight: DEFAULT_WEIGHT,
        })
    }

    /// Sets the weight of the rule (default: 1).
    #[must_use]
    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    fn is_reused(&self, password: &Password) -> Result<bool, RuleError> {
        let former = password.former_passwords().iter().skip(self.first - 1);
        let checked = former.take(self.count.unwrap_or(usize::MAX));
        for record in checked {
            let matches = self
                .hasher
                .compare(password.secret(), &record.hash)
                .map_err(|e| RuleError::evaluation_failed(NAME, "hash comparison failed", e))?;
            if matches {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl std::fmt::Debug for NoReuseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoReuseRule")
            .field("count", &self.count)
            .field("first", &self.first)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl Rule for NoReuseRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn test(&self, password: &Password, weight: Option<Weight>) -> Result<bool, RuleError> {
        if weight.is_some_and(|w| self.weight < w) {
            return Ok(true);
        }
        Ok(!self.is_reused(password)?)
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        Ok(self
            .is_reused(password)?
            .then(|| ValidationError::new(self, password, Message::new(MESSAGE), self.weight)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use passguard_core::{FormerPassword, HashError};

    struct Plain;

    impl HashFunction for Plain {
        fn hash(&self, password: &str) -> Result<String, HashError> {
            Ok(password.to_string())
        }

        fn compare(&self, password: &str, hash: &str) -> Result<bool, HashError> {
            Ok(password == hash)
        }
    }

    struct Broken;

    impl HashFunction for Broken {
        fn hash(&self, _: &str) -> Result<String, HashError> {
            Err(HashError::Backend("unavailable".into()))
        }

        fn compare(&self, _: &str, _: &str) -> Result<bool, HashError> {
            Err(HashError::Backend("unavailable".into()))
        }
    }

    /// History `newest` first: each entry one day older than the previous.
    fn with_history(secret: &str, newest_first: &[&str]) -> Password {
        let start = Utc.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).unwrap();
        let former = newest_first
            .iter()
            .zip(0..)
            .map(|(hash, age)| FormerPassword::new(*hash, start - Duration::days(age)))
            .collect();
        Password::new(secret).with_former_passwords(former)
    }

    #[test]
    fn test_rejects_zero_count_and_first() {
        assert!(NoReuseRule::new(Plain, Some(0), 1).is_err());
        assert!(NoReuseRule::new(Plain, None, 0).is_err());
    }

    #[test]
    fn test_checks_window() {
        let password = with_history("old", &["a", "b", "old", "c"]);

        assert!(!NoReuseRule::new(Plain, None, 1).unwrap().test(&password, None).unwrap());
        assert!(NoReuseRule::new(Plain, Some(2), 1).unwrap().test(&password, None).unwrap());
        assert!(!NoReuseRule::new(Plain, Some(1), 3).unwrap().test(&password, None).unwrap());
        assert!(NoReuseRule::new(Plain, None, 4).unwrap().test(&password, None).unwrap());
    }

    #[test]
    fn test_message() {
        let rule = NoReuseRule::new(Plain, None, 1).unwrap();
        let error = rule.validate(&with_history("a", &["a"])).unwrap().unwrap();
        insta::assert_snapshot!(error.message, @"Cannot reuse former passwords.");
        assert!(rule.validate(&Password::new("a")).unwrap().is_none());
    }

    #[test]
    fn test_hash_failure_is_evaluation_failure() {
        let rule = NoReuseRule::new(Broken, None, 1).unwrap();
        assert!(rule.test(&with_history("a", &["x"]), None).is_err());
        // Nothing to compare against.
        assert!(rule.test(&Password::new("a"), None).unwrap());
    }
}
