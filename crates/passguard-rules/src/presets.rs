//! Rule presets for common policies.

use crate::builder::{rule_from_config, RuleInfo, RULES};
use passguard_core::{RuleBox, RuleConfig, RuleError, Weight};

/// A `(min, max, weight)` count bound.
pub(crate) type Bound = (u32, Option<u32>, Weight);

/// Preset policies for passguard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    #[default]
    Recommended,
    /// Longer passwords and a symbol requirement.
    Strict,
    /// Length only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if a preset bound is
    /// rejected by rule construction.
    pub fn rules(self) -> Result<Vec<RuleBox>, RuleError> {
        let empty = RuleConfig::default();
        let mut rules = Vec::new();
        for RuleInfo { name, .. } in RULES {
            if self.bounds(name).is_some() {
                rules.extend(rule_from_config(name, &empty, self)?);
            }
        }
        Ok(rules)
    }

    /// Returns the count bounds this preset gives a rule, or `None` if the
    /// preset does not include it.
    pub(crate) fn bounds(self, rule: &str) -> Option<Vec<Bound>> {
        let bounds = match (self, rule) {
            (Self::Minimal, crate::length::NAME) => vec![(8, None, 1)],
            (Self::Recommended, crate::length::NAME) => vec![(8, None, 1), (12, None, 0)],
            (Self::Strict, crate::length::NAME) => vec![(12, None, 2), (16, None, 0)],
            (Self::Recommended | Self::Strict, crate::upper_case::NAME)
            | (Self::Recommended | Self::Strict, crate::lower_case::NAME)
            | (Self::Recommended | Self::Strict, crate::character_class::DIGIT_NAME)
            | (Self::Strict, crate::character_class::SYMBOL_NAME) => vec![(1, None, 1)],
            _ => return None,
        };
        Some(bounds)
    }

    /// Returns the preset's configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(RuleError::invalid(format!("Unknown preset: {other}"))),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `length` (PG001) - at least 8 characters, 12 at weight 0
/// - `upper-case` (PG002), `lower-case` (PG003), `digit` (PG004) - at least one each
///
/// # Errors
///
/// See [`Preset::rules`].
pub fn recommended_rules() -> Result<Vec<RuleBox>, RuleError> {
    Preset::Recommended.rules()
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules with a 12 character minimum at weight 2,
/// plus `symbol` (PG005).
///
/// # Errors
///
/// See [`Preset::rules`].
pub fn strict_rules() -> Result<Vec<RuleBox>, RuleError> {
    Preset::Strict.rules()
}

/// Returns the minimal set of rules: `length` of at least 8.
///
/// # Errors
///
/// See [`Preset::rules`].
pub fn minimal_rules() -> Result<Vec<RuleBox>, RuleError> {
    Preset::Minimal.rules()
}
