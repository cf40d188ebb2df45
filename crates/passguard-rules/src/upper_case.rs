//! Rule bounding the number of upper case characters.
//!
//! A character counts as upper case when lower-casing changes it, which
//! covers every cased script rather than just ASCII.

use crate::phrasing::Phrasing;
use passguard_core::{
    CountConstraint, Password, Rule, RuleError, ValidationError, Weight, WeightedRule,
    DEFAULT_WEIGHT,
};

/// Rule code for upper-case.
pub const CODE: &str = "PG002";

/// Rule name for upper-case.
pub const NAME: &str = "upper-case";

/// Description of upper-case.
pub const DESCRIPTION: &str = "Bounds the number of upper case characters";

const PHRASING: Phrasing = Phrasing {
    at_least: "There must be at least one upper case character.|There must be at least %count% upper case characters.",
    none: "There must be no upper case characters.",
    at_most: "There must be at most one upper case character.|There must be at most %count% upper case characters.",
    exactly: "There must be exactly one upper case character.|There must be exactly %count% upper case characters.",
    between: "There must be between %min% and %max% upper case characters.",
};

/// Bounds the number of upper case characters.
#[derive(Debug, Clone)]
pub struct UpperCaseRule {
    constraints: WeightedRule<u32>,
}

impl UpperCaseRule {
    /// Creates a rule with a single constraint of default weight.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn new(min: u32, max: Option<u32>) -> Result<Self, RuleError> {
        Self::with_weight(min, max, DEFAULT_WEIGHT)
    }

    /// Creates a rule with a single weighted constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
    pub fn with_weight(min: u32, max: Option<u32>, weight: Weight) -> Result<Self, RuleError> {
        Ok(Self::from_weighted(WeightedRule::with(CountConstraint::count(
            min, max, weight,
        )?)))
    }

    /// Creates a rule from an existing constraint set.
    #[must_use]
    pub fn from_weighted(constraints: WeightedRule<u32>) -> Self {
        Self { constraints }
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

    /// Returns the constraints in priority order.
    #[must_use]
    pub fn constraints(&self) -> &[CountConstraint] {
        self.constraints.constraints()
    }
}

/// Counts characters that lower-casing would change.
fn count_upper(text: &str) -> u32 {
    let count = text
        .chars()
        .filter(|&c| !c.to_lowercase().eq(std::iter::once(c)))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl Rule for UpperCaseRule {
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
        let count = count_upper(password.secret());
        Ok(self.constraints.test(Some(&count), weight))
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        let count = count_upper(password.secret());
        Ok(self
            .constraints
            .validate(self, password, Some(&count), |c| PHRASING.message(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_unicode_upper_case() {
        assert_eq!(count_upper("aBcD"), 2);
        assert_eq!(count_upper("ÁÆøß1!"), 2);
        assert_eq!(count_upper("1234"), 0);
    }

    #[test]
    fn test_weight_threshold() {
        let mut rule = UpperCaseRule::new(0, Some(0)).unwrap();
        rule.add_constraint(0, Some(3), 2).unwrap();

        assert!(rule.test(&"ABC".into(), Some(2)).unwrap());
        assert!(!rule.test(&"ABCD".into(), Some(2)).unwrap());
        assert!(!rule.test(&"ABC".into(), None).unwrap());
        assert!(rule.test(&"ABCD".into(), Some(3)).unwrap());
    }

    #[test]
    fn test_highest_weight_violation_is_reported() {
        let mut rule = UpperCaseRule::new(0, Some(0)).unwrap();
        rule.add_constraint(0, Some(3), 2).unwrap();

        let error = rule.validate(&"ABCD".into()).unwrap().unwrap();
        assert_eq!(error.weight, 2);
        assert_eq!(error.message, "There must be at most 3 upper case characters.");

        let error = rule.validate(&"AB".into()).unwrap().unwrap();
        assert_eq!(error.weight, 1);
        assert_eq!(error.message, "There must be no upper case characters.");
    }

    #[test]
    fn test_singular_message() {
        let rule = UpperCaseRule::new(1, None).unwrap();
        let error = rule.validate(&"lower".into()).unwrap().unwrap();
        insta::assert_snapshot!(error.message, @"There must be at least one upper case character.");
    }
}
