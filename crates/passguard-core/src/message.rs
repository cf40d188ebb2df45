//! Violation messages and their rendering.
//!
//! Rules never produce final text directly. They build a [`Message`]: a
//! source-English key plus named arguments. A [`Translator`] turns it into
//! text. Keys follow two conventions:
//!
//! - `%name%` placeholders are substituted from the arguments.
//! - `singular|plural` keys pick a form from the `%count%` argument.

use crate::constraint::Constraint;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Name of the argument that selects the plural form.
pub const COUNT: &str = "%count%";

/// A message key with its substitution values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Source-English template.
    pub key: String,
    /// Named substitution values, e.g. `("%min%", "3")`.
    pub args: Vec<(String, String)>,
}

impl Message {
    /// Creates a message without arguments.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// Adds a named argument.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.args.push((name.into(), value.to_string()));
        self
    }

    /// Adds the `%count%` argument used for plural selection.
    #[must_use]
    pub fn count(self, count: u64) -> Self {
        self.arg(COUNT, count)
    }

    /// Returns the value of a named argument.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Renders messages into text for a locale.
pub trait Translator: Send + Sync {
    /// Returns the locale identifier (e.g. "en").
    fn locale(&self) -> &str;

    /// Renders a message.
    fn translate(&self, message: &Message) -> String;
}

/// Renders keys as-is, in English.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTranslator;

impl Translator for EnglishTranslator {
    fn locale(&self) -> &str {
        "en"
    }

    fn translate(&self, message: &Message) -> String {
        render(&message.key, message)
    }
}

/// Translator backed by a key to template catalog.
///
/// Keys missing from the catalog are rendered untranslated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogTranslator {
    locale: String,
    #[serde(default)]
    messages: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Creates an empty catalog for a locale.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    /// Adds a translation.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    /// Parses a catalog from TOML.
    ///
    /// ```toml
    /// locale = "nb"
    /// [messages]
    /// "Cannot reuse former passwords." = "Kan ikke gjenbruke tidligere passord."
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        toml::from_str(content).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
        })
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }
}

impl Translator for CatalogTranslator {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn translate(&self, message: &Message) -> String {
        let template = self
            .messages
            .get(&message.key)
            .map_or(message.key.as_str(), String::as_str);
        render(template, message)
    }
}

/// Errors loading a message catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error reading the catalog.
    #[error("Failed to read message catalog {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: std::path::PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in the catalog.
    #[error("Failed to parse message catalog: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

/// Picks the plural form and substitutes placeholders.
fn render(template: &str, message: &Message) -> String {
    let form = match template.split_once('|') {
        Some((singular, plural)) => {
            if message.get(COUNT) == Some("1") {
                singular
            } else {
                plural
            }
        }
        None => template,
    };

    let mut text = form.to_string();
    for (name, value) in &message.args {
        text = text.replace(name.as_str(), value);
    }
    text
}

/// A measured quantity that bounds can be phrased over.
pub trait Measure: PartialOrd + Clone {
    /// Whether the value is the zero of its kind.
    fn is_zero(&self) -> bool;
}

impl Measure for u32 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl Measure for Duration {
    fn is_zero(&self) -> bool {
        *self == Duration::zero()
    }
}

/// How a violated constraint is phrased.
///
/// Variants are chosen in declaration order, so a constraint with
/// `max == 0` is always [`Bounds::NoneAllowed`] regardless of `min`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bounds<T> {
    /// Only a lower bound: "at least {min}".
    AtLeast(T),
    /// Upper bound of zero: "none allowed".
    NoneAllowed,
    /// Lower bound of zero: "at most {max}".
    AtMost(T),
    /// Equal bounds: "exactly {min}".
    Exactly(T),
    /// Both bounds: "between {min} and {max}".
    Between(T, T),
}

impl<T: Measure> Bounds<T> {
    /// Classifies a constraint. An unset `min` counts as zero.
    ///
    /// Returns `None` for a constraint with neither bound set.
    #[must_use]
    pub fn of(constraint: &Constraint<T>) -> Option<Self> {
        let min = constraint.min().cloned();
        let Some(max) = constraint.max().cloned() else {
            return min.map(Self::AtLeast);
        };
        if max.is_zero() {
            return Some(Self::NoneAllowed);
        }
        let Some(min) = min.filter(|m| !m.is_zero()) else {
            return Some(Self::AtMost(max));
        };
        if min == max {
            return Some(Self::Exactly(min));
        }
        Some(Self::Between(min, max))
    }
}

/// Formats a duration for humans, e.g. "1 week, 2 days and 3 hours".
#[must_use]
pub fn humanize(duration: Duration) -> String {
    const UNITS: &[(i64, &str, &str)] = &[
        (7 * 24 * 3600, "week", "weeks"),
        (24 * 3600, "day", "days"),
        (3600, "hour", "hours"),
        (60, "minute", "minutes"),
        (1, "second", "seconds"),
    ];

    let mut remaining = duration.num_seconds().abs();
    let mut parts = Vec::new();
    for &(size, singular, plural) in UNITS {
        let amount = remaining / size;
        remaining %= size;
        if amount > 0 {
            let unit = if amount == 1 { singular } else { plural };
            parts.push(format!("{amount} {unit}"));
        }
    }

    match parts.len() {
        0 => "0 seconds".to_string(),
        1 => parts.remove(0),
        n => {
            let last = parts.remove(n - 1);
            format!("{} and {last}", parts.join(", "))
        }
    }
}
