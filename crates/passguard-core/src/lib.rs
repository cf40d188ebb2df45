//! # passguard-core
//!
//! Core framework for password policies.
//!
//! This crate provides the foundational traits and types for building
//! password rules. It includes:
//!
//! - [`Constraint`] and [`WeightedRule`] for prioritized `(min, max, weight)` bounds
//! - [`Rule`] trait and [`ValidationError`] for explaining violations
//! - [`formatter`] for lazy spelling-variant generation (leetspeak, case)
//! - [`WordList`] and [`HashFunction`] collaborator traits
//! - [`Evaluator`] for running a set of rules
//!
//! ## Example
//!
//! ```ignore
//! use passguard_core::{Evaluator, Password};
//!
//! let evaluator = Evaluator::builder()
//!     .rule(LengthRule::new(8, None)?)
//!     .build();
//!
//! let report = evaluator.evaluate(&Password::new("hunter2"))?;
//! println!("{}", report.format());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod constraint;
mod evaluator;
mod hash;
mod message;
mod password;
mod rule;
mod types;
mod weighted;
mod word_list;

/// Word formatters producing spelling variants.
pub mod formatter;

pub use config::{Config, ConfigError, ConstraintConfig, EvaluatorConfig, MessagesConfig, RuleConfig};
pub use constraint::{Constraint, CountConstraint, DateConstraint, IntervalConstraint};
pub use evaluator::{Evaluator, EvaluatorBuilder};
pub use formatter::{FormatterBox, FormatterChain, WordFormatter, Words};
pub use hash::{Argon2Hasher, HashError, HashFunction};
pub use message::{
    humanize, Bounds, CatalogError, CatalogTranslator, EnglishTranslator, Measure, Message,
    Translator,
};
pub use password::{FormerPassword, Password};
pub use rule::{Rule, RuleBox, RuleError, SourceError, Weight, DEFAULT_WEIGHT};
pub use types::{ValidationDiagnostic, ValidationError, ValidationReport};
pub use weighted::WeightedRule;
pub use word_list::{MemoryWordList, WordList, WordListError};
