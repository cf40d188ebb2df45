//! Ordered constraint sets with weight-threshold evaluation.

use crate::constraint::Constraint;
use crate::message::Message;
use crate::password::Password;
use crate::rule::{Rule, Weight};
use crate::types::ValidationError;

/// The constraints of one rule, kept in priority order.
///
/// Constraints are sorted by descending weight. Constraints of equal
/// weight keep their insertion order, so the first one added is the one
/// reported first on ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedRule<T> {
    constraints: Vec<Constraint<T>>,
}

impl<T> Default for WeightedRule<T> {
    fn default() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }
}

impl<T: PartialOrd> WeightedRule<T> {
    /// Creates an empty rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule holding a single constraint.
    #[must_use]
    pub fn with(constraint: Constraint<T>) -> Self {
        let mut rule = Self::new();
        rule.add_constraint(constraint);
        rule
    }

    /// Inserts a constraint, keeping priority order.
    pub fn add_constraint(&mut self, constraint: Constraint<T>) -> &mut Self {
        // After every constraint of greater or equal weight.
        let at = self
            .constraints
            .partition_point(|c| c.weight() >= constraint.weight());
        self.constraints.insert(at, constraint);
        self
    }

    /// Returns the constraints in priority order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint<T>] {
        &self.constraints
    }

    /// Finds the highest-priority violated constraint.
    ///
    /// Constraints below `threshold` are skipped; `None` considers all of
    /// them. An absent `value` (nothing measurable) is never a violation.
    #[must_use]
    pub fn violation(&self, value: Option<&T>, threshold: Option<Weight>) -> Option<&Constraint<T>> {
        let value = value?;
        self.constraints
            .iter()
            .filter(|c| threshold.map_or(true, |t| c.weight() >= t))
            .find(|c| !c.test(value))
    }

    /// Returns false iff a constraint at or above `threshold` is violated.
    #[must_use]
    pub fn test(&self, value: Option<&T>, threshold: Option<Weight>) -> bool {
        self.violation(value, threshold).is_none()
    }

    /// Builds a validation error for the highest-priority violation.
    ///
    /// All constraints are considered. `describe` phrases the violated
    /// constraint.
    pub fn validate<R, F>(
        &self,
        rule: &R,
        password: &Password,
        value: Option<&T>,
        describe: F,
    ) -> Option<ValidationError>
    where
        R: Rule + ?Sized,
        F: FnOnce(&Constraint<T>) -> Message,
    {
        self.violation(value, None).map(|constraint| {
            ValidationError::new(rule, password, describe(constraint), constraint.weight())
        })
    }
}
