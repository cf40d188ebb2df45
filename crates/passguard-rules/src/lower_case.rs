//! Rule bounding the number of lower case characters.

use crate::phrasing::Phrasing;
use passguard_core::{
    CountConstraint, Password, Rule, RuleError, ValidationError, Weight, WeightedRule,
    DEFAULT_WEIGHT,
};

/// Rule code for lower-case.
pub const CODE: &str = "PG003";

/// Rule name for lower-case.
pub const NAME: &str = "lower-case";

/// Description of lower-case.
pub const DESCRIPTION: &str = "Bounds the number of lower case characters";

const PHRASING: Phrasing = Phrasing {
    at_least: "There must be at least one lower case character.|There must be at least %count% lower case characters.",
    none: "There must be no lower case characters.",
    at_most: "There must be at most one lower case character.|There must be at most %count% lower case characters.",
    exactly: "There must be exactly one lower case character.|There must be exactly %count% lower case characters.",
    between: "There must be between %min% and %max% lower case characters.",
};

/// Bounds the number of lower case characters.
///
/// A character counts as lower case when upper-casing changes it.
#[derive(Debug, Clone)]
pub struct LowerCaseRule {
    constraints: WeightedRule<u32>,
}

impl LowerCaseRule {
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

fn count_lower(text: &str) -> u32 {
    let count = text
        .chars()
        .filter(|&c| !c.to_uppercase().eq(std::iter::once(c)))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl Rule for LowerCaseRule {
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
        let count = count_lower(password.secret());
        Ok(self.constraints.test(Some(&count), weight))
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        let count = count_lower(password.secret());
        Ok(self
            .constraints
            .validate(self, password, Some(&count), |c| PHRASING.message(c)))
    }
}
