//! Rule bounding the time between password changes.
//!
//! The interval is measured from the most recent former password's change
//! date to a reference instant (now, unless fixed with
//! [`ChangeWithIntervalRule::at`]). A password without history is never in
//! violation.
//!
//! # Configuration
//!
//! Bounds are given in seconds:
//!
//! ```toml
//! [rules.change-with-interval]
//! constraints = [{ min = 86400 }, { min = 0, max = 7776000, weight = 0 }]
//! ```

use chrono::{DateTime, Duration, Utc};
use passguard_core::{
    humanize, Bounds, IntervalConstraint, Message, Password, Rule, RuleError, ValidationError,
    Weight, WeightedRule, DEFAULT_WEIGHT,
};

/// Rule code for change-with-interval.
pub const CODE: &str = "PG020";

/// Rule name for change-with-interval.
pub const NAME: &str = "change-with-interval";

/// Description of change-with-interval.
pub const DESCRIPTION: &str = "Bounds the time between password changes";

/// Bounds the time elapsed since the last password change.
#[derive(Debug, Clone)]
pub struct ChangeWithIntervalRule {
    constraints: WeightedRule<Duration>,
    reference: Option<DateTime<Utc>>,
}

impl ChangeWithIntervalRule {
    /// Creates a rule with a single constraint of default weight.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn new(min: Duration, max: Option<Duration>) -> Result<Self, RuleError> {
        Self::with_weight(min, max, DEFAULT_WEIGHT)
    }

    /// Creates a rule with a single weighted constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn with_weight(
        min: Duration,
        max: Option<Duration>,
        weight: Weight,
    ) -> Result<Self, RuleError> {
        Ok(Self::from_weighted(WeightedRule::with(
            IntervalConstraint::interval(min, max, weight)?,
        )))
    }

    /// Creates a rule from an existing constraint set.
    #[must_use]
    pub fn from_weighted(constraints: WeightedRule<Duration>) -> Self {
        Self {
            constraints,
            reference: None,
        }
    }

    /// Adds a constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn add_constraint(
        &mut self,
        min: Duration,
        max: Option<Duration>,
        weight: Weight,
    ) -> Result<&mut Self, RuleError> {
        self.constraints
            .add_constraint(IntervalConstraint::interval(min, max, weight)?);
        Ok(self)
    }

    /// Measures intervals up to `reference` instead of the current time.
    #[must_use]
    pub fn at(mut self, reference: DateTime<Utc>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Returns the constraints in priority order.
    #[must_use]
    pub fn constraints(&self) -> &[IntervalConstraint] {
        self.constraints.constraints()
    }

    fn elapsed(&self, password: &Password) -> Option<Duration> {
        let reference = self.reference.unwrap_or_else(Utc::now);
        password.last_change().map(|former| reference - former.date)
    }
}

fn describe(constraint: &IntervalConstraint) -> Message {
    match Bounds::of(constraint) {
        Some(Bounds::AtLeast(min)) => {
            Message::new("There must be at least %interval% between password changes.")
                .arg("%interval%", humanize(min))
        }
        Some(Bounds::AtMost(max)) => {
            Message::new("There must be at most %interval% between password changes.")
                .arg("%interval%", humanize(max))
        }
        Some(Bounds::Exactly(interval)) => {
            Message::new("There must be exactly %interval% between password changes.")
                .arg("%interval%", humanize(interval))
        }
        Some(Bounds::Between(min, max)) => {
            Message::new("There must be between %min% and %max% between password changes.")
                .arg("%min%", humanize(min))
                .arg("%max%", humanize(max))
        }
        // A zero upper bound only admits changing twice at the same instant.
        Some(Bounds::NoneAllowed) | None => {
            Message::new("There must be no time between password changes.")
        }
    }
}

impl Rule for ChangeWithIntervalRule {
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
        Ok(self
            .constraints
            .test(self.elapsed(password).as_ref(), weight))
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        let elapsed = self.elapsed(password);
        Ok(self
            .constraints
            .validate(self, password, elapsed.as_ref(), describe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use passguard_core::FormerPassword;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn changed_on(changes: &[DateTime<Utc>]) -> Password {
        Password::new("secret").with_former_passwords(
            changes
                .iter()
                .map(|d| FormerPassword::new("hash", *d))
                .collect(),
        )
    }

    #[test]
    fn test_without_history_is_not_violated() {
        let rule = ChangeWithIntervalRule::new(Duration::days(1), None).unwrap();
        assert!(rule.test(&Password::new("secret"), None).unwrap());
        assert!(rule.validate(&Password::new("secret")).unwrap().is_none());
    }

    #[test]
    fn test_uses_most_recent_change() {
        let rule = ChangeWithIntervalRule::new(Duration::days(1), None)
            .unwrap()
            .at(date(2020, 6, 10));

        let password = changed_on(&[date(2019, 1, 1), date(2020, 6, 10), date(2018, 1, 1)]);
        assert!(!rule.test(&password, None).unwrap());

        let password = changed_on(&[date(2020, 6, 8), date(2019, 1, 1)]);
        assert!(rule.test(&password, None).unwrap());
    }

    #[test]
    fn test_rejects_negative_min() {
        assert!(ChangeWithIntervalRule::new(Duration::days(-1), None).is_err());
    }

    #[test]
    fn test_weight_threshold() {
        let mut rule = ChangeWithIntervalRule::new(Duration::days(1), None)
            .unwrap()
            .at(date(2020, 6, 10));
        rule.add_constraint(Duration::zero(), Some(Duration::days(30)), 2)
            .unwrap();

        let password = changed_on(&[date(2020, 1, 1)]);
        assert!(!rule.test(&password, Some(2)).unwrap());
        assert!(rule.test(&password, Some(3)).unwrap());

        let error = rule.validate(&password).unwrap().unwrap();
        assert_eq!(error.weight, 2);
        insta::assert_snapshot!(error.message, @"There must be at most 4 weeks and 2 days between password changes.");
    }

    #[test]
    fn test_humanized_messages() {
        let rule = ChangeWithIntervalRule::new(
            Duration::weeks(1) + Duration::days(2) + Duration::hours(3),
            None,
        )
        .unwrap()
        .at(date(2020, 6, 10));

        let error = rule
            .validate(&changed_on(&[date(2020, 6, 9)]))
            .unwrap()
            .unwrap();
        assert_eq!(
            error.message,
            "There must be at least 1 week, 2 days and 3 hours between password changes."
        );

        let rule = ChangeWithIntervalRule::new(Duration::days(2), Some(Duration::days(3)))
            .unwrap()
            .at(date(2020, 6, 10));
        let error = rule
            .validate(&changed_on(&[date(2020, 6, 9)]))
            .unwrap()
            .unwrap();
        assert_eq!(
            error.message,
            "There must be between 2 days and 3 days between password changes."
        );
    }
}
