//! Rule trait and the errors a rule can raise.

use crate::password::Password;
use crate::types::ValidationError;

/// Priority tag on a constraint. Higher weights are evaluated first.
pub type Weight = i32;

/// Weight used when a constraint or threshold is not given explicitly.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Boxed error produced by an external collaborator.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while configuring or evaluating a rule.
///
/// A violated rule is *not* an error: [`Rule::test`] returns `false` and
/// [`Rule::validate`] returns a populated [`ValidationError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The rule was configured with impossible bounds or options.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An external collaborator (word list, network, hasher) failed.
    #[error("Rule {rule} could not be evaluated: {message}")]
    EvaluationFailed {
        /// Name of the rule being evaluated.
        rule: String,
        /// Human-readable description of what failed.
        message: String,
        /// Underlying collaborator error.
        #[source]
        source: SourceError,
    },
}

impl RuleError {
    /// Creates an [`RuleError::InvalidConfiguration`].
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Creates an [`RuleError::EvaluationFailed`] for the given rule.
    #[must_use]
    pub fn evaluation_failed(
        rule: &str,
        message: impl Into<String>,
        source: impl Into<SourceError>,
    ) -> Self {
        Self::EvaluationFailed {
            rule: rule.to_string(),
            message: message.into(),
            source: source.into(),
        }
    }
}

/// A password rule.
///
/// Implement this trait to add a check to a policy. Rules are evaluated
/// synchronously and hold no mutable state after configuration, so a rule
/// may be shared across threads.
///
/// # Example
///
/// ```ignore
/// use passguard_core::{Password, Rule, RuleError, ValidationError, Weight};
///
/// pub struct NotEmpty;
///
/// impl Rule for NotEmpty {
///     fn name(&self) -> &'static str { "not-empty" }
///     fn code(&self) -> &'static str { "PG900" }
///
///     fn test(&self, password: &Password, _weight: Option<Weight>) -> Result<bool, RuleError> {
///         Ok(!password.secret().is_empty())
///     }
///
///     fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
///         // ...
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "length").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PG001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks whether a password complies with the rule.
    ///
    /// Constraints with a weight below `weight` are ignored. `None`
    /// considers every constraint.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EvaluationFailed`] if a collaborator fails.
    fn test(&self, password: &Password, weight: Option<Weight>) -> Result<bool, RuleError>;

    /// Explains why a password does not comply with the rule.
    ///
    /// All constraints are considered. Returns `Ok(None)` when the password
    /// complies.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EvaluationFailed`] if a collaborator fails.
    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
