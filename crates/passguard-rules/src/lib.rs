//! # passguard-rules
//!
//! Built-in password rules for passguard.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PG001 | `length` | Bounds the number of characters |
//! | PG002 | `upper-case` | Bounds the number of upper case characters |
//! | PG003 | `lower-case` | Bounds the number of lower case characters |
//! | PG004 | `digit` | Bounds the number of digits |
//! | PG005 | `symbol` | Bounds the number of symbols |
//! | PG010 | `dictionary` | Forbids dictionary words, including leetspeak and case variants |
//! | PG011 | `have-i-been-pwned` | Bounds how often the password appears in data breaches |
//! | PG020 | `change-with-interval` | Bounds the time between password changes |
//! | PG021 | `no-reuse` | Forbids reusing former passwords |
//!
//! ## Usage
//!
//! ```ignore
//! use passguard_core::{Evaluator, Password};
//! use passguard_rules::{DigitRule, LengthRule};
//!
//! let mut length = LengthRule::new(8, None)?;
//! length.add_constraint(12, None, 0)?;
//!
//! let evaluator = Evaluator::builder()
//!     .rule(length)
//!     .rule(DigitRule::new(1, None)?)
//!     .build();
//!
//! let report = evaluator.evaluate(&Password::new("hunter2"))?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod change_interval;
mod character_class;
mod dictionary;
mod have_i_been_pwned;
mod length;
mod lower_case;
mod no_reuse;
mod phrasing;
mod presets;
mod upper_case;

pub use builder::{rule_from_config, rules_from_config, RuleInfo, RULES};
pub use change_interval::ChangeWithIntervalRule;
pub use character_class::{
    CharacterClass, DigitRule, SymbolRule, DEFAULT_DIGITS, DEFAULT_SYMBOLS,
};
pub use dictionary::{Candidates, DictionaryRule};
pub use have_i_been_pwned::{
    BreachCounter, BreachLookupError, HaveIBeenPwnedRule, PwnedPasswordsClient, DEFAULT_API_URL,
};
pub use length::LengthRule;
pub use lower_case::LowerCaseRule;
pub use no_reuse::NoReuseRule;
pub use presets::{minimal_rules, recommended_rules, strict_rules, Preset};
pub use upper_case::UpperCaseRule;

/// Re-export core types for convenience.
pub use passguard_core::{Password, Rule, RuleError, ValidationError};
