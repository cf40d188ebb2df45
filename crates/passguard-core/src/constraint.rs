//! Weighted `(min, max)` bounds on a measured quantity.

use crate::rule::{RuleError, Weight};
use chrono::{DateTime, Duration, Utc};

/// An immutable `(min, max, weight)` bound.
///
/// An unset bound is open: `None` for `min` behaves as negative infinity
/// and `None` for `max` as positive infinity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint<T> {
    min: Option<T>,
    max: Option<T>,
    weight: Weight,
}

/// Bound on a number of characters, occurrences or similar.
pub type CountConstraint = Constraint<u32>;

/// Bound on an elapsed duration.
pub type IntervalConstraint = Constraint<Duration>;

/// Bound on a point in time.
pub type DateConstraint = Constraint<DateTime<Utc>>;

impl<T: PartialOrd> Constraint<T> {
    /// Returns true iff `value` lies within the bounds, inclusive.
    #[must_use]
    pub fn test(&self, value: &T) -> bool {
        if let Some(min) = &self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = &self.max {
            if value > max {
                return false;
            }
        }
        true
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.min.as_ref()
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.max.as_ref()
    }

    /// Priority of the constraint.
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    fn checked(min: Option<T>, max: Option<T>, weight: Weight) -> Result<Self, RuleError> {
        if let (Some(min), Some(max)) = (&min, &max) {
            if max < min {
                return Err(RuleError::invalid("Max cannot be smaller than min."));
            }
        }
        Ok(Self { min, max, weight })
    }
}

impl Constraint<u32> {
    /// Creates a count constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if `max < min`, or if
    /// `min` is zero while `max` is unset.
    pub fn count(min: u32, max: Option<u32>, weight: Weight) -> Result<Self, RuleError> {
        if min == 0 && max.is_none() {
            return Err(RuleError::invalid(
                "Min cannot be zero when max is unconstrained.",
            ));
        }
        Self::checked(Some(min), max, weight)
    }
}

impl Constraint<Duration> {
    /// Creates an interval constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if `min` is negative,
    /// `max < min`, or `min` is zero while `max` is unset.
    pub fn interval(min: Duration, max: Option<Duration>, weight: Weight) -> Result<Self, RuleError> {
        if min < Duration::zero() {
            return Err(RuleError::invalid("Min cannot be negative."));
        }
        if min == Duration::zero() && max.is_none() {
            return Err(RuleError::invalid(
                "Min cannot be zero when max is unconstrained.",
            ));
        }
        Self::checked(Some(min), max, weight)
    }

    /// Tests the time elapsed between `date` and `reference`.
    #[must_use]
    pub fn test_since(&self, date: DateTime<Utc>, reference: DateTime<Utc>) -> bool {
        self.test(&(reference - date))
    }
}

impl Constraint<DateTime<Utc>> {
    /// Creates a date constraint. Both bounds may be unset.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if `max < min`.
    pub fn date(
        min: Option<DateTime<Utc>>,
        max: Option<DateTime<Utc>>,
        weight: Weight,
    ) -> Result<Self, RuleError> {
        Self::checked(min, max, weight)
    }
}
