//! Rule forbidding dictionary words, including disguised spellings.
//!
//! # Rationale
//!
//! `P4$$w0rd` is still "password". The rule expands candidate words from
//! the password through word formatters (leetspeak decoding, case
//! variants) and looks every variant up in a word list. Expansion is lazy
//! and stops at the first hit.
//!
//! # Candidate extraction
//!
//! - [`Candidates::WholePassword`]: the password as one word (default)
//! - [`Candidates::Tokens`]: whitespace-delimited tokens
//! - [`Candidates::Substrings`]: every substring within a length range
//!
//! For each candidate the unformatted word is looked up first, then the
//! variants of each configured formatter in order.
//!
//! # Configuration
//!
//! ```toml
//! [rules.dictionary]
//! word_list = "/usr/share/dict/words"
//! case_sensitive = false
//! formatters = ["leet", "leet+capitalize", "lower-case"]
//! candidates = "substrings"
//! min_word_length = 4
//! ```

use passguard_core::formatter::FormatterBox;
use passguard_core::{
    Message, Password, Rule, RuleError, ValidationError, Weight, WordFormatter, WordList,
    DEFAULT_WEIGHT,
};
use std::rc::Rc;
use tracing::debug;

/// Rule code for dictionary.
pub const CODE: &str = "PG010";

/// Rule name for dictionary.
pub const NAME: &str = "dictionary";

/// Description of dictionary.
pub const DESCRIPTION: &str = "Forbids dictionary words, including leetspeak and case variants";

const MESSAGE: &str = "The password cannot contain dictionary words.";

/// How candidate words are taken from a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Candidates {
    /// The whole password is one candidate.
    #[default]
    WholePassword,
    /// Whitespace-delimited tokens.
    Tokens,
    /// Every substring of `min_length..=max_length` characters, longest
    /// first at each position. `None` means up to the full length.
    Substrings {
        /// Shortest substring considered.
        min_length: usize,
        /// Longest substring considered.
        max_length: Option<usize>,
    },
}

impl Candidates {
    /// Lazily lists candidate words of `text`.
    #[must_use]
    pub fn extract<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = String> + 'a> {
        match *self {
            Self::WholePassword => Box::new(std::iter::once(text.to_string())),
            Self::Tokens => Box::new(text.split_whitespace().map(str::to_string)),
            Self::Substrings {
                min_length,
                max_length,
            } => {
                let chars: Rc<[char]> = text.chars().collect();
                let total = chars.len();
                let min_length = min_length.max(1);
                let max_length = max_length.unwrap_or(total);
                Box::new((0..total).flat_map(move |start| {
                    let longest = max_length.min(total - start);
                    let chars = Rc::clone(&chars);
                    (min_length..=longest)
                        .rev()
                        .map(move |len| chars[start..start + len].iter().collect::<String>())
                }))
            }
        }
    }
}

/// Forbids passwords containing words from a word list.
pub struct DictionaryRule {
    word_list: Box<dyn WordList>,
    formatters: Vec<FormatterBox>,
    candidates: Candidates,
    weight: Weight,
}

impl DictionaryRule {
    /// Creates a rule checking whole passwords without formatters.
    #[must_use]
    pub fn new<W: WordList + 'static>(word_list: W) -> Self {
        Self::from_box(Box::new(word_list))
    }

    /// Creates a rule from a boxed word list.
    #[must_use]
    pub fn from_box(word_list: Box<dyn WordList>) -> Self {
        Self {
            word_list,
            formatters: Vec::new(),
            candidates: Candidates::default(),
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Adds a formatter whose variants are looked up.
    #[must_use]
    pub fn formatter<F: WordFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatters.push(Box::new(formatter));
        self
    }

    /// Adds a boxed formatter.
    #[must_use]
    pub fn formatter_box(mut self, formatter: FormatterBox) -> Self {
        self.formatters.push(formatter);
        self
    }

    /// Sets how candidates are extracted.
    #[must_use]
    pub fn candidates(mut self, candidates: Candidates) -> Self {
        self.candidates = candidates;
        self
    }

    /// Sets the weight of the rule (default: 1).
    #[must_use]
    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Finds the first candidate whose spelling, or one of its formatted
    /// variants, is in the word list.
    fn find_word(&self, password: &Password) -> Result<Option<String>, RuleError> {
        for candidate in self.candidates.extract(password.secret()) {
            if self.lookup(&candidate)? {
                return Ok(Some(candidate));
            }
            for formatter in &self.formatters {
                for variant in formatter.format(&candidate) {
                    if self.lookup(&variant)? {
                        debug!("Candidate matched via formatter {}", formatter.name());
                        return Ok(Some(candidate));
                    }
                }
            }
        }
        Ok(None)
    }

    fn lookup(&self, word: &str) -> Result<bool, RuleError> {
        self.word_list
            .contains(word)
            .map_err(|e| RuleError::evaluation_failed(NAME, "word list lookup failed", e))
    }
}

impl std::fmt::Debug for DictionaryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryRule")
            .field(
                "formatters",
                &self.formatters.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("candidates", &self.candidates)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

impl Rule for DictionaryRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn test(&self, password: &Password, weight: Option<Weight>) -> Result<bool, RuleError> {
        if weight.is_some_and(|w| self.weight < w) {
            return Ok(true);
        }
        Ok(self.find_word(password)?.is_none())
    }

    fn validate(&self, password: &Password) -> Result<Option<ValidationError>, RuleError> {
        Ok(self.find_word(password)?.map(|word| {
            ValidationError::new(self, password, Message::new(MESSAGE), self.weight)
                .with_matched(word)
        }))
    }
}
