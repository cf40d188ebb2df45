//! Rule bounding the number of characters in a password.
//!
//! Length is counted in Unicode scalar values, so `"ﬀ"` and `"é"` each
//! count as one character regardless of their encoded size.
//!
//! # Configuration
//!
//! ```toml
//! [rules.length]
//! constraints = [{ min = 8 }, { min = 12, weight = 0 }]
//! ```

use crate::phrasing::Phrasing;
use passguard_core::{
    CountConstraint, Password, Rule, RuleError, ValidationError, Weight, WeightedRule,
    DEFAULT_WEIGHT,
};

/// Rule code for length.
pub const CODE: &str = "PG001";

/// Rule name for length.
pub const NAME: &str = "length";

/// Description of length.
pub const DESCRIPTION: &str = "Bounds the number of characters";

const PHRASING: Phrasing = Phrasing {
    at_least: "There must be at least one character.|There must be at least %count% characters.",
    none: "There must be no characters.",
    at_most: "There must be at most one character.|There must be at most %count% characters.",
    exactly: "There must be exactly one character.|There must be exactly %count% characters.",
    between: "There must be between %min% and %max% characters.",
};

/// Bounds the password length.
#[derive(Debug, Clone)]
pub struct LengthRule {
    constraints: WeightedRule<u32>,
}

impl LengthRule {
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

    fn length(password: &Password) -> u32 {
        u32::try_from(password.secret().chars().count()).unwrap_or(u32::MAX)
    }
}

impl Rule for LengthRule {
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
        Ok(self.constraints.test(Some(&Self::length(password)), weight))
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        let length = Self::length(password);
        Ok(self
            .constraints
            .validate(self, password, Some(&length), |c| PHRASING.message(c)))
    }
}
