//! Rules bounding how many characters of a given class a password holds.
//!
//! # Rules
//!
//! - [`DigitRule`] (`digit`, PG004), defaulting to `0123456789`
//! - [`SymbolRule`] (`symbol`, PG005), defaulting to ASCII punctuation
//!
//! # Configuration
//!
//! ```toml
//! [rules.symbol]
//! characters = "!@#$%"
//! constraints = [{ min = 1 }]
//! ```

use crate::phrasing::Phrasing;
use passguard_core::{
    CountConstraint, Password, RuleError, ValidationError, Weight, WeightedRule,
};

/// Rule code for digit.
pub const DIGIT_CODE: &str = "PG004";

/// Rule name for digit.
pub const DIGIT_NAME: &str = "digit";

/// Rule code for symbol.
pub const SYMBOL_CODE: &str = "PG005";

/// Rule name for symbol.
pub const SYMBOL_NAME: &str = "symbol";

/// Description of digit.
pub const DIGIT_DESCRIPTION: &str = "Bounds the number of digits";

/// Description of symbol.
pub const SYMBOL_DESCRIPTION: &str = "Bounds the number of symbols";

/// Characters counted by [`DigitRule::new`].
pub const DEFAULT_DIGITS: &str = "0123456789";

/// Characters counted by [`SymbolRule::new`].
pub const DEFAULT_SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

const DIGIT_PHRASING: Phrasing = Phrasing {
    at_least: "The password must contain at least one digit (%characters%).|The password must contain at least %count% digits (%characters%).",
    none: "The password cannot contain digits (%characters%).",
    at_most: "The password must contain at most one digit (%characters%).|The password must contain at most %count% digits (%characters%).",
    exactly: "The password must contain exactly one digit (%characters%).|The password must contain exactly %count% digits (%characters%).",
    between: "The password must contain between %min% and %max% digits (%characters%).",
};

const SYMBOL_PHRASING: Phrasing = Phrasing {
    at_least: "The password must contain at least one symbol (%characters%).|The password must contain at least %count% symbols (%characters%).",
    none: "The password cannot contain symbols (%characters%).",
    at_most: "The password must contain at most one symbol (%characters%).|The password must contain at most %count% symbols (%characters%).",
    exactly: "The password must contain exactly one symbol (%characters%).|The password must contain exactly %count% symbols (%characters%).",
    between: "The password must contain between %min% and %max% symbols (%characters%).",
};

/// A set of characters and the constraints on how many of them occur.
#[derive(Debug, Clone)]
pub struct CharacterClass {
    characters: String,
    constraints: WeightedRule<u32>,
}

impl CharacterClass {
    /// Creates a class over `characters`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfiguration`] if `characters` is empty.
    pub fn new(
        characters: impl Into<String>,
        constraints: WeightedRule<u32>,
    ) -> Result<Self, RuleError> {
        let characters = characters.into();
        if characters.is_empty() {
            return Err(RuleError::invalid("At least one character is required."));
        }
        Ok(Self {
            characters,
            constraints,
        })
    }

    /// Returns the counted characters.
    #[must_use]
    pub fn characters(&self) -> &str {
        &self.characters
    }

    /// Returns the constraints in priority order.
    #[must_use]
    pub fn constraints(&self) -> &[CountConstraint] {
        self.constraints.constraints()
    }

    fn add_constraint(&mut self, min: u32, max: Option<u32>, weight: Weight) -> Result<(), RuleError> {
        self.constraints
            .add_constraint(CountConstraint::count(min, max, weight)?);
        Ok(())
    }

    /// Counts the occurrences of class characters in `text`.
    #[must_use]
    pub fn count(&self, text: &str) -> u32 {
        let count = text.chars().filter(|c| self.characters.contains(*c)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn test(&self, password: &Password, weight: Option<Weight>) -> bool {
        self.constraints
            .test(Some(&self.count(password.secret())), weight)
    }

    fn validate<R: passguard_core::Rule>(
        &self,
        rule: &R,
        password: &Password,
        phrasing: &Phrasing,
    ) -> Option<ValidationError> {
        let count = self.count(password.secret());
        self.constraints.validate(rule, password, Some(&count), |c| {
            phrasing.message(c).arg("%characters%", &self.characters)
        })
    }
}

macro_rules! character_class_rule {
    ($(#[$doc:meta])* $rule:ident, $name:expr, $code:expr, $defaults:expr, $phrasing:expr, $description:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $rule {
            class: CharacterClass,
        }

        impl $rule {
            /// Creates a rule over the default characters with one
            /// constraint of default weight.
            ///
            /// # Errors
            ///
            /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
            pub fn new(min: u32, max: Option<u32>) -> Result<Self, RuleError> {
                Self::with_characters($defaults, min, max, passguard_core::DEFAULT_WEIGHT)
            }

            /// Creates a rule over custom characters with one weighted constraint.
            ///
            /// # Errors
            ///
            /// Returns [`RuleError::InvalidConfiguration`] if `characters` is
            /// empty or the bounds are invalid.
            pub fn with_characters(
                characters: impl Into<String>,
                min: u32,
                max: Option<u32>,
                weight: Weight,
            ) -> Result<Self, RuleError> {
                let constraints = WeightedRule::with(CountConstraint::count(min, max, weight)?);
                Self::from_weighted(characters, constraints)
            }

            /// Creates a rule from an existing constraint set.
            ///
            /// # Errors
            ///
            /// Returns [`RuleError::InvalidConfiguration`] if `characters` is empty.
            pub fn from_weighted(
                characters: impl Into<String>,
                constraints: WeightedRule<u32>,
            ) -> Result<Self, RuleError> {
                Ok(Self {
                    class: CharacterClass::new(characters, constraints)?,
                })
            }

            /// Adds a constraint.
            ///
            /// # Errors
            ///
            /// Returns [`RuleError::InvalidConfiguration`] if the bounds are invalid.
            pub fn add_constraint(
                &mut self,
                min: u32,
                max: Option<u32>,
                weight: Weight,
            ) -> Result<&mut Self, RuleError> {
                self.class.add_constraint(min, max, weight)?;
                Ok(self)
            }

            /// Returns the character class.
            #[must_use]
            pub fn class(&self) -> &CharacterClass {
                &self.class
            }
        }

        impl passguard_core::Rule for $rule {
            fn name(&self) -> &'static str {
                $name
            }

            fn code(&self) -> &'static str {
                $code
            }

            fn description(&self) -> &'static str {
                $description
            }

            fn test(&self, password: &Password, weight: Option<Weight>) -> Result<bool, RuleError> {
                Ok(self.class.test(password, weight))
            }

            fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
                Ok(self.class.validate(self, password, &$phrasing))
            }
        }
    };
}

character_class_rule!(
    /// Bounds the number of digits.
    DigitRule,
    DIGIT_NAME,
    DIGIT_CODE,
    DEFAULT_DIGITS,
    DIGIT_PHRASING,
    DIGIT_DESCRIPTION
);

character_class_rule!(
    /// Bounds the number of symbols.
    SymbolRule,
    SYMBOL_NAME,
    SYMBOL_CODE,
    DEFAULT_SYMBOLS,
    SYMBOL_PHRASING,
    SYMBOL_DESCRIPTION
);
