//! Rule bounding how often a password appears in known breaches.
//!
//! Counts come from a [`BreachCounter`]. [`PwnedPasswordsClient`] queries
//! the Pwned Passwords range API using k-anonymity: only the first five
//! hex digits of the password's SHA-1 hash leave the machine, and the
//! matching suffix is looked up locally.
//!
//! # Configuration
//!
//! ```toml
//! [rules.have-i-been-pwned]
//! api_url = "https://api.pwnedpasswords.com/range/"
//! constraints = [{ min = 0, max = 0 }]
//! ```

use crate::phrasing::Phrasing;
use passguard_core::{
    CountConstraint, Password, Rule, RuleError, ValidationError, Weight, WeightedRule,
    DEFAULT_WEIGHT,
};
use sha1::{Digest, Sha1};
use std::time::Duration;
use tracing::debug;

/// Rule code for have-i-been-pwned.
pub const CODE: &str = "PG011";

/// Rule name for have-i-been-pwned.
pub const NAME: &str = "have-i-been-pwned";

/// Description of have-i-been-pwned.
pub const DESCRIPTION: &str = "Bounds how often the password appears in known data breaches";

/// Range endpoint of the Pwned Passwords API.
pub const DEFAULT_API_URL: &str = "https://api.pwnedpasswords.com/range/";

const PHRASING: Phrasing = Phrasing {
    at_least: "The password must appear at least once in data breaches.|The password must appear at least %count% times in data breaches.",
    none: "The password cannot appear in data breaches.",
    at_most: "The password must appear at most once in data breaches.|The password must appear at most %count% times in data breaches.",
    exactly: "The password must appear exactly once in data breaches.|The password must appear exactly %count% times in data breaches.",
    between: "The password must appear between %min% and %max% times in data breaches.",
};

/// Errors raised while looking up breach counts.
#[derive(Debug, thiserror::Error)]
pub enum BreachLookupError {
    /// The HTTP request failed or returned an error status.
    #[error("Breach lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be understood.
    #[error("Malformed breach lookup response: {0}")]
    Malformed(String),
}

/// Reports how many times a password appears in known breaches.
pub trait BreachCounter: Send + Sync {
    /// Returns the breach count of `password`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn count(&self, password: &str) -> Result<u64, BreachLookupError>;
}

/// Blocking client for the Pwned Passwords range API.
#[derive(Debug, Clone)]
pub struct PwnedPasswordsClient {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl PwnedPasswordsClient {
    /// Creates a client for the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, BreachLookupError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("passguard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Sets the range endpoint; the hash prefix is appended to it.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

impl BreachCounter for PwnedPasswordsClient {
    fn count(&self, password: &str) -> Result<u64, BreachLookupError> {
        let (prefix, suffix) = hash_parts(password);
        let body = self
            .client
            .get(format!("{}{prefix}", self.api_url))
            .send()?
            .error_for_status()?
            .text()?;
        parse_range(&body, &suffix)
    }
}

/// Splits the upper-case hex SHA-1 of `password` into its 5-digit prefix
/// and 35-digit suffix.
fn hash_parts(password: &str) -> (String, String) {
    let hash = format!("{:X}", Sha1::digest(password.as_bytes()));
    let (prefix, suffix) = hash.split_at(5);
    (prefix.to_string(), suffix.to_string())
}

/// Finds the count for `suffix` in a range response of `SUFFIX:COUNT` lines.
fn parse_range(body: &str, suffix: &str) -> Result<u64, BreachLookupError> {
    for line in body.lines() {
        let Some((hash_suffix, count)) = line.trim().split_once(':') else {
            continue;
        };
        if hash_suffix.eq_ignore_ascii_case(suffix) {
            return count
                .trim()
                .parse()
                .map_err(|_| BreachLookupError::Malformed(format!("invalid count {count:?}")));
        }
    }
    Ok(0)
}

/// Bounds the number of breaches a password appears in.
///
/// The default constraint `(0, 0)` forbids any appearance.
pub struct HaveIBeenPwnedRule {
    counter: Box<dyn BreachCounter>,
    constraints: WeightedRule<u32>,
}

impl HaveIBeenPwnedRule {
    /// Creates a rule forbidding any breach appearance.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn new<C: BreachCounter + 'static>(counter: C) -> Result<Self, RuleError> {
        Self::with_weight(counter, 0, Some(0), DEFAULT_WEIGHT)
    }

    /// Creates a rule with a single weighted constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn with_weight<C: BreachCounter + 'static>(
        counter: C,
        min: u32,
        max: Option<u32>,
        weight: Weight,
    ) -> Result<Self, RuleError> {
        let constraints = WeightedRule::with(CountConstraint::count(min, max, weight)?);
        Ok(Self::from_weighted(Box::new(counter), constraints))
    }

    /// Creates a rule from an existing constraint set.
    #[must_use]
    pub fn from_weighted(counter: Box<dyn BreachCounter>, constraints: WeightedRule<u32>) -> Self {
        Self {
            counter,
            constraints,
        }
    }

    /// Adds a constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn add_constraint(
        &mut self,
        min: u32,
        max: Option<u32>,
        weight: Weight,
    ) -> Result<&mut Self, RuleError> {
        self.constraints
            .add_constraint(CountConstraint::count(min, max, weight)?);
        Ok(self)
    }

    fn breaches(&self, password: &Password) -> Result<u32, RuleError> {
        let count = self.counter.count(password.secret()).map_err(|e| {
            RuleError::evaluation_failed(NAME, "breach count lookup failed", e)
        })?;
        debug!("Breach lookup returned {count} occurrence(s)");
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

impl std::fmt::Debug for HaveIBeenPwnedRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HaveIBeenPwnedRule")
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}

impl Rule for HaveIBeenPwnedRule {
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
        let count = self.breaches(password)?;
        Ok(self.constraints.test(Some(&count), weight))
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        let count = self.breaches(password)?;
        Ok(self
            .constraints
            .validate(self, password, Some(&count), |c| PHRASING.message(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u64);

    impl BreachCounter for Fixed {
        fn count(&self, _: &str) -> Result<u64, BreachLookupError> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl BreachCounter for Failing {
        fn count(&self, _: &str) -> Result<u64, BreachLookupError> {
            Err(BreachLookupError::Malformed("empty body".into()))
        }
    }

    #[test]
    fn test_hash_parts() {
        let (prefix, suffix) = hash_parts("password");
        assert_eq!(prefix, "5BAA6");
        assert_eq!(suffix, "1E4C9B93F3F0682250B6CF8331B7EE68FD8");
    }

    #[test]
    fn test_parse_range() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n\
                    1E4C9B93F3F0682250B6CF8331B7EE68FD8:3861493\r\n\
                    011053FD0102E94D6AE2F8B83D76FAF94F6:13\r\n";
        assert_eq!(
            parse_range(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8").unwrap(),
            3_861_493
        );
        assert_eq!(
            parse_range(body, "1e4c9b93f3f0682250b6cf8331b7ee68fd8").unwrap(),
            3_861_493
        );
        assert_eq!(
            parse_range(body, "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF").unwrap(),
            0
        );
    }

    #[test]
    fn test_parse_range_rejects_bad_count() {
        let body = "1E4C9B93F3F0682250B6CF8331B7EE68FD8:many";
        assert!(matches!(
            parse_range(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8"),
            Err(BreachLookupError::Malformed(_))
        ));
    }

    #[test]
    fn test_default_forbids_breached_passwords() {
        let rule = HaveIBeenPwnedRule::new(Fixed(5)).unwrap();
        assert!(!rule.test(&"password".into(), None).unwrap());

        let error = rule.validate(&"password".into()).unwrap().unwrap();
        insta::assert_snapshot!(error.message, @"The password cannot appear in data breaches.");

        let rule = HaveIBeenPwnedRule::new(Fixed(0)).unwrap();
        assert!(rule.validate(&"unique".into()).unwrap().is_none());
    }

    #[test]
    fn test_at_most_message() {
        let rule = HaveIBeenPwnedRule::with_weight(Fixed(5), 0, Some(1), 1).unwrap();
        let error = rule.validate(&"password".into()).unwrap().unwrap();
        assert_eq!(
            error.message,
            "The password must appear at most once in data breaches."
        );
    }

    #[test]
    fn test_lookup_failure_is_evaluation_failure() {
        let rule = HaveIBeenPwnedRule::new(Failing).unwrap();
        assert!(matches!(
            rule.test(&"password".into(), None),
            Err(RuleError::EvaluationFailed { .. })
        ));
    }
}
