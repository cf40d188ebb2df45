//! Evaluator for running a set of rules against a password.

use crate::config::Config;
use crate::password::Password;
use crate::rule::{Rule, RuleBox, RuleError, Weight};
use crate::types::ValidationReport;

use tracing::{debug, info, warn};

/// Builder for configuring an [`Evaluator`].
#[derive(Default)]
pub struct EvaluatorBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
    skip_failed_rules: Option<bool>,
}

impl EvaluatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the evaluator.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the evaluator.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether a rule whose collaborator fails is skipped (default:
    /// taken from the configuration, otherwise false).
    #[must_use]
    pub fn skip_failed_rules(mut self, skip: bool) -> Self {
        self.skip_failed_rules = Some(skip);
        self
    }

    /// Builds the evaluator.
    #[must_use]
    pub fn build(self) -> Evaluator {
        let config = self.config.unwrap_or_default();
        let skip_failed_rules = self
            .skip_failed_rules
            .unwrap_or(config.evaluator.skip_failed_rules);

        Evaluator {
            rules: self.rules,
            config,
            skip_failed_rules,
        }
    }
}

/// Runs every enabled rule against a password.
///
/// Use [`Evaluator::builder()`] to construct an instance. Rules are
/// independent of each other; the evaluator only collects their results.
pub struct Evaluator {
    rules: Vec<RuleBox>,
    config: Config,
    skip_failed_rules: bool,
}

impl Evaluator {
    /// Creates a new builder for configuring an evaluator.
    #[must_use]
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the registered rules.
    #[must_use]
    pub fn rules(&self) -> &[RuleBox] {
        &self.rules
    }

    fn enabled_rules(&self) -> impl Iterator<Item = &RuleBox> {
        self.rules.iter().filter(|rule| {
            let enabled = self.config.is_rule_enabled(rule.name());
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.name());
            }
            enabled
        })
    }

    /// Validates a password against every enabled rule.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError::EvaluationFailed`] unless failing
    /// rules are configured to be skipped.
    pub fn evaluate(&self, password: &Password) -> Result<ValidationReport, RuleError> {
        let mut report = ValidationReport::new();

        for rule in self.enabled_rules() {
            debug!("Validating with rule: {}", rule.name());
            match rule.validate(password) {
                Ok(Some(error)) => report.errors.push(error),
                Ok(None) => {}
                Err(e @ RuleError::EvaluationFailed { .. }) if self.skip_failed_rules => {
                    warn!("Skipping rule {}: {}", rule.name(), e);
                    report.rules_failed.push(rule.name().to_string());
                    continue;
                }
                Err(e) => return Err(e),
            }
            report.rules_checked += 1;
        }

        info!(
            "Evaluation complete: {} violation(s) in {} rule(s)",
            report.errors.len(),
            report.rules_checked
        );

        Ok(report)
    }

    /// Returns true if every enabled rule passes at the given threshold.
    ///
    /// Stops at the first failing rule.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError::EvaluationFailed`] unless failing
    /// rules are configured to be skipped.
    pub fn test(&self, password: &Password, weight: Option<Weight>) -> Result<bool, RuleError> {
        for rule in self.enabled_rules() {
            match rule.test(password, weight) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Rule {} failed", rule.name());
                    return Ok(false);
                }
                Err(e @ RuleError::EvaluationFailed { .. }) if self.skip_failed_rules => {
                    warn!("Skipping rule {}: {}", rule.name(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::types::ValidationError;

    struct MinLength(usize);

    impl Rule for MinLength {
        fn name(&self) -> &'static str {
            "min-length"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn test(&self, password: &Password, _: Option<Weight>) -> Result<bool, RuleError> {
            Ok(password.secret().chars().count() >= self.0)
        }
        fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
            Ok((!self.test(password, None)?)
                .then(|| ValidationError::new(self, password, Message::new("Too short."), 1)))
        }
    }

    struct Broken;

    impl Rule for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn code(&self) -> &'static str {
            "T002"
        }
        fn test(&self, _: &Password, _: Option<Weight>) -> Result<bool, RuleError> {
            Err(RuleError::evaluation_failed("broken", "offline", "connection refused"))
        }
        fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
            self.test(password, None).map(|_| None)
        }
    }

    #[test]
    fn collects_violations_from_all_rules() {
        let evaluator = Evaluator::builder()
            .rule(MinLength(8))
            .rule(MinLength(10))
            .build();

        let report = evaluator.evaluate(&Password::new("short")).unwrap();
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.rules_checked, 2);

        assert!(evaluator
            .evaluate(&Password::new("long enough"))
            .unwrap()
            .is_valid());
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let config = Config::parse("[rules.min-length]\nenabled = false\n").unwrap();
        let evaluator = Evaluator::builder().config(config).rule(MinLength(8)).build();

        let report = evaluator.evaluate(&Password::new("short")).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.rules_checked, 0);
    }

    #[test]
    fn evaluation_failure_propagates() {
        let evaluator = Evaluator::builder().rule(Broken).rule(MinLength(8)).build();
        assert!(matches!(
            evaluator.evaluate(&Password::new("short")),
            Err(RuleError::EvaluationFailed { .. })
        ));
        assert!(evaluator.test(&Password::new("short"), Some(1)).is_err());
    }

    #[test]
    fn evaluation_failure_can_be_skipped() {
        let evaluator = Evaluator::builder()
            .rule(Broken)
            .rule(MinLength(8))
            .skip_failed_rules(true)
            .build();

        let report = evaluator.evaluate(&Password::new("short")).unwrap();
        assert_eq!(report.rules_failed, vec!["broken"]);
        assert_eq!(report.errors.len(), 1);
        assert!(!evaluator.test(&Password::new("short"), Some(1)).unwrap());
    }
}
