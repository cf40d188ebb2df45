//! Word formatters: lazy transformations producing spelling variants.
//!
//! A formatter maps a sequence of words to a (possibly much larger)
//! sequence of variants. Sequences are pull-based iterators: nothing is
//! computed until the consumer asks for the next word, so a consumer that
//! stops at the first dictionary hit never pays for the rest of the
//! expansion.
//!
//! # Example
//!
//! ```ignore
//! use passguard_core::formatter::{Capitalize, FormatterChain, LeetDecoder, WordFormatter};
//!
//! let chain = FormatterChain::new().then(LeetDecoder::new()).then(Capitalize);
//! let first: Vec<String> = chain.format("p4$$w0rd").take(3).collect();
//! ```

mod case;
mod leet;

pub use case::{Capitalize, LowerCase, MixedCase, UpperCase};
pub use leet::{LeetDecoder, LeetVariants};

/// A lazy sequence of words.
pub type Words<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// A transformation from words to spelling variants.
///
/// Implementations must be pure: the same input always yields the same
/// variants, and every call produces a fresh sequence.
pub trait WordFormatter: Send + Sync {
    /// Returns the kebab-case name of this formatter (e.g., "leet").
    fn name(&self) -> &'static str;

    /// Expands every incoming word into its variants.
    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a>;

    /// Expands a single word.
    fn format<'a>(&'a self, word: &str) -> Words<'a> {
        self.apply(Box::new(std::iter::once(word.to_string())))
    }
}

/// Type alias for boxed `WordFormatter` trait objects.
pub type FormatterBox = Box<dyn WordFormatter>;

/// Passes words through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unformatted;

impl WordFormatter for Unformatted {
    fn name(&self) -> &'static str {
        "unformatted"
    }

    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
        words
    }
}

/// An ordered list of formatter stages.
///
/// Each stage consumes the output of the previous one. An empty chain is
/// the identity.
#[derive(Default)]
pub struct FormatterChain {
    stages: Vec<FormatterBox>,
}

impl FormatterChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    #[must_use]
    pub fn then<F: WordFormatter + 'static>(mut self, formatter: F) -> Self {
        self.stages.push(Box::new(formatter));
        self
    }

    /// Appends a boxed stage.
    #[must_use]
    pub fn then_box(mut self, formatter: FormatterBox) -> Self {
        self.stages.push(formatter);
        self
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the chain has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl WordFormatter for FormatterChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
        self.stages
            .iter()
            .fold(words, |words, stage| stage.apply(words))
    }
}

impl std::fmt::Debug for FormatterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|s| s.name()))
            .finish()
    }
}

/// Creates a formatter from its configuration name.
///
/// Names joined with `+` build a chain, e.g. `"leet+capitalize"`.
/// Returns `None` if any part is unknown.
#[must_use]
pub fn from_name(name: &str) -> Option<FormatterBox> {
    let mut chain = FormatterChain::new();
    for part in name.split('+').map(str::trim) {
        let stage: FormatterBox = match part {
            "unformatted" | "identity" => Box::new(Unformatted),
            "leet" | "leetspeak" => Box::new(LeetDecoder::new()),
            "mixed-case" => Box::new(MixedCase),
            "capitalize" => Box::new(Capitalize),
            "upper-case" => Box::new(UpperCase),
            "lower-case" => Box::new(LowerCase),
            _ => return None,
        };
        chain = chain.then_box(stage);
    }
    Some(Box::new(chain))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reverse;

    impl WordFormatter for Reverse {
        fn name(&self) -> &'static str {
            "reverse"
        }

        fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
            Box::new(words.map(|w| w.chars().rev().collect()))
        }
    }

    struct Duplicate;

    impl WordFormatter for Duplicate {
        fn name(&self) -> &'static str {
            "duplicate"
        }

        fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
            Box::new(words.flat_map(|w| vec![w.clone(), format!("{w}{w}")]))
        }
    }

    fn collect(words: Words<'_>) -> Vec<String> {
        words.collect()
    }

    #[test]
    fn empty_chain_is_identity() {
        let chain = FormatterChain::new();
        assert!(chain.is_empty());
        assert_eq!(collect(chain.format("foo")), vec!["foo"]);
    }

    #[test]
    fn unformatted_passes_words_through() {
        let words: Words<'_> = Box::new(vec!["a".to_string(), "b".to_string()].into_iter());
        assert_eq!(collect(Unformatted.apply(words)), vec!["a", "b"]);
    }

    #[test]
    fn chain_applies_stages_in_order() {
        let chain = FormatterChain::new().then(Duplicate).then(Reverse);
        assert_eq!(chain.len(), 2);
        assert_eq!(collect(chain.format("ab")), vec!["ba", "baba"]);

        let chain = FormatterChain::new().then(Reverse).then(UpperCase);
        assert_eq!(collect(chain.format("ab")), vec!["BA"]);
    }

    #[test]
    fn chain_applies_to_every_input_word() {
        let chain = FormatterChain::new().then(Reverse);
        let words: Words<'_> = Box::new(
            vec!["03/02/2001".to_string(), "09/02/1987".to_string()].into_iter(),
        );
        assert_eq!(collect(chain.apply(words)), vec!["1002/20/30", "7891/20/90"]);
    }

    #[test]
    fn chain_is_lazy() {
        let chain = FormatterChain::new().then(LeetDecoder::new()).then(MixedCase);
        // 16 characters, each ambiguous: the full expansion is astronomically large.
        let first = chain.format("1111111111111111").next();
        assert!(first.is_some());
    }

    #[test]
    fn from_name_builds_chains() {
        let f = from_name("leet+capitalize").unwrap();
        assert!(f.format("1337").any(|w| w == "Leet"));
        assert!(from_name("leet+unknown").is_none());
    }

    #[test]
    fn debug_lists_stage_names() {
        let chain = FormatterChain::new().then(LeetDecoder::new()).then(UpperCase);
        assert_eq!(format!("{chain:?}"), r#"["leet", "upper-case"]"#);
    }
}
