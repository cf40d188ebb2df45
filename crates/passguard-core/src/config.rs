//! Policy configuration, read from TOML.
//!
//! ```toml
//! preset = "recommended"
//!
//! [evaluator]
//! skip_failed_rules = false
//!
//! [messages]
//! catalog = "messages.nb.toml"
//!
//! [rules.length]
//! constraints = [{ min = 8, weight = 2 }, { min = 12, weight = 0 }]
//!
//! [rules.symbol]
//! characters = "!@#$%"
//! ```
//!
//! Keys of a `[rules.<name>]` table other than `enabled` and
//! `constraints` are rule options, read through the `get_*` accessors of
//! [`RuleConfig`].
//!
//! When loaded with [`Config::from_file`], relative file paths (the
//! catalog and every [`PATH_OPTIONS`] option) are taken relative to the
//! policy file's directory.

use crate::rule::{Weight, DEFAULT_WEIGHT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Rule options naming a file.
pub const PATH_OPTIONS: &[&str] = &["word_list"];

/// A password policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Named preset supplying rules that have no section of their own.
    pub preset: Option<String>,

    /// How the evaluator treats failing rules.
    pub evaluator: EvaluatorConfig,

    /// How messages are rendered.
    pub messages: MessagesConfig,

    /// Sections keyed by rule name.
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates an empty policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a policy file, resolving relative paths in it against the
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid policy.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;
        if let Some(dir) = path.parent() {
            config.rebase(dir);
        }
        Ok(config)
    }

    /// Makes relative file paths relative to `dir` instead of the working
    /// directory.
    pub fn rebase(&mut self, dir: &Path) {
        if let Some(catalog) = &mut self.messages.catalog {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }
        for section in self.rules.values_mut() {
            for key in PATH_OPTIONS {
                let Some(toml::Value::String(file)) = section.options.get_mut(*key) else {
                    continue;
                };
                if Path::new(file.as_str()).is_relative() {
                    *file = dir.join(file.as_str()).to_string_lossy().into_owned();
                }
            }
        }
    }

    /// Parses a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `content` is not a valid policy.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the section of a rule, if the policy has one.
    #[must_use]
    pub fn section(&self, rule: &str) -> Option<&RuleConfig> {
        self.rules.get(rule)
    }

    /// A rule is enabled unless its section says `enabled = false`.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        self.section(rule).and_then(|s| s.enabled) != Some(false)
    }
}

/// The `[evaluator]` table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Log and skip a rule whose word list, hasher or breach lookup
    /// fails, rather than aborting the evaluation.
    pub skip_failed_rules: bool,
}

/// The `[messages]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// TOML catalog for [`CatalogTranslator`](crate::CatalogTranslator).
    pub catalog: Option<PathBuf>,
}

/// One entry of a `constraints` array.
///
/// Bounds are signed so that out-of-range values reach rule construction
/// and are reported there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    /// Lower bound, unset when absent.
    #[serde(default)]
    pub min: Option<i64>,
    /// Upper bound, unset when absent.
    #[serde(default)]
    pub max: Option<i64>,
    /// Priority, 1 when absent.
    #[serde(default = "default_weight")]
    pub weight: Weight,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            weight: DEFAULT_WEIGHT,
        }
    }
}

fn default_weight() -> Weight {
    DEFAULT_WEIGHT
}

/// A `[rules.<name>]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// `false` turns the rule off even if the preset includes it.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Replaces the rule's default constraints when non-empty.
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,

    /// Every other key of the section.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    fn value(&self, key: &str) -> Option<&toml::Value> {
        self.options.get(key)
    }

    /// Deserializes an option, or `None` if it is absent or mistyped.
    #[must_use]
    pub fn get_option<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.value(key)?.clone().try_into().ok()
    }

    /// Boolean option, `default` if absent or mistyped.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.value(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Integer option, `default` if absent or mistyped.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.value(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// String option, `default` if absent or mistyped.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key)
            .and_then(toml::Value::as_str)
            .unwrap_or(default)
    }

    /// String array option. Non-string items are dropped; an absent
    /// option is empty.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        let Some(items) = self.value(key).and_then(toml::Value::as_array) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(toml::Value::as_str)
            .map(str::to_owned)
            .collect()
    }
}

/// Errors loading a policy.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The policy file could not be read.
    #[error("Failed to read policy {path}: {source}")]
    Io {
        /// The policy file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The policy is not valid TOML or has the wrong shape.
    #[error("Invalid policy: {0}")]
    Parse(#[from] toml::de::Error),
}
