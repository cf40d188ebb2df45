//! Core types for validation errors and reports.

use crate::message::{EnglishTranslator, Message, Translator};
use crate::password::Password;
use crate::rule::{Rule, Weight};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Describes why a password does not comply with a rule.
///
/// This is a regular return value of [`Rule::validate`], not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Rule code (e.g., "PG001").
    pub code: String,
    /// Rule name (e.g., "length").
    pub rule: String,
    /// Weight of the violated constraint.
    ///
    /// Re-testing with a threshold above this weight skips the constraint.
    pub weight: Weight,
    /// Message rendered in English.
    pub message: String,
    /// Message key and arguments, for rendering in another locale.
    pub template: Message,
    /// Part of the password that triggered the violation, if narrower than
    /// the whole password (e.g. a dictionary word).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    /// The offending password.
    #[serde(skip)]
    password: Password,
}

impl ValidationError {
    /// Creates a validation error for `rule`.
    #[must_use]
    pub fn new<R: Rule + ?Sized>(
        rule: &R,
        password: &Password,
        template: Message,
        weight: Weight,
    ) -> Self {
        Self {
            code: rule.code().to_string(),
            rule: rule.name().to_string(),
            weight,
            message: EnglishTranslator.translate(&template),
            template,
            matched: None,
            password: password.clone(),
        }
    }

    /// Records the part of the password that triggered the violation.
    #[must_use]
    pub fn with_matched(mut self, matched: impl Into<String>) -> Self {
        self.matched = Some(matched.into());
        self
    }

    /// Returns the offending password.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Renders the message with another translator.
    #[must_use]
    pub fn render(&self, translator: &dyn Translator) -> String {
        translator.translate(&self.template)
    }

    /// Formats the error for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} (weight {})\n", self.code, self.rule, self.weight);
        let _ = writeln!(output, "  {}", self.message);
        if let Some(matched) = &self.matched {
            let _ = writeln!(output, "  = matched: {matched}");
        }
        output
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Converts a [`ValidationError`] to a miette Diagnostic for rich display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ValidationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&ValidationError> for ValidationDiagnostic {
    fn from(e: &ValidationError) -> Self {
        Self {
            message: format!("[{}] {}", e.code, e.message),
            help: e
                .matched
                .as_ref()
                .map(|m| format!("rule {} matched \"{m}\"", e.rule)),
        }
    }
}

/// Result of evaluating a password against several rules.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All validation errors found.
    pub errors: Vec<ValidationError>,
    /// Number of rules evaluated.
    pub rules_checked: usize,
    /// Names of rules skipped because a collaborator failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules_failed: Vec<String>,
}

impl ValidationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no rule was violated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns errors whose violated constraint has at least `weight`.
    #[must_use]
    pub fn at_weight(&self, weight: Weight) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.weight >= weight).collect()
    }

    /// Renders every message with the given translator.
    #[must_use]
    pub fn messages(&self, translator: &dyn Translator) -> Vec<String> {
        self.errors.iter().map(|e| e.render(translator)).collect()
    }

    /// Formats the report for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        for error in &self.errors {
            let _ = writeln!(report, "{}", error.format());
        }
        let _ = writeln!(
            report,
            "Found {} violation(s) in {} rule(s)",
            self.errors.len(),
            self.rules_checked
        );
        for rule in &self.rules_failed {
            let _ = writeln!(report, "  = skipped: {rule} could not be evaluated");
        }
        report
    }

    /// Adds errors from another report.
    pub fn extend(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.rules_checked += other.rules_checked;
        self.rules_failed.extend(other.rules_failed);
    }
}
