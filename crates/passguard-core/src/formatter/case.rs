//! Case formatters.
//!
//! All of them operate on `char`s, never on bytes. Case mappings that
//! expand a character (e.g. `ß` upper-cases to `SS`) are kept whole.

use super::{WordFormatter, Words};

/// Every combination of lower and upper case characters.
///
/// A word with `n` case-sensitive characters yields `2^n` variants. The
/// first variant is the word itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedCase;

impl MixedCase {
    /// Lazily enumerates the case variants of one word.
    #[must_use]
    pub fn variants(word: &str) -> MixedCaseVariants {
        let forms: Vec<Vec<String>> = word.chars().map(case_forms).collect();
        MixedCaseVariants {
            indices: vec![0; forms.len()],
            forms,
            done: false,
        }
    }
}

/// Distinct forms of a character: original, lower, upper.
fn case_forms(c: char) -> Vec<String> {
    let original = c.to_string();
    let lower: String = c.to_lowercase().collect();
    let upper: String = c.to_uppercase().collect();

    let mut forms = vec![original];
    for form in [lower, upper] {
        if !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}

impl WordFormatter for MixedCase {
    fn name(&self) -> &'static str {
        "mixed-case"
    }

    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
        Box::new(words.flat_map(|word| Self::variants(&word)))
    }
}

/// Iterator over the case variants of a single word.
///
/// Works like an odometer over the per-character forms; the first
/// character changes fastest.
#[derive(Debug)]
pub struct MixedCaseVariants {
    forms: Vec<Vec<String>>,
    indices: Vec<usize>,
    done: bool,
}

impl Iterator for MixedCaseVariants {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let word: String = self
            .forms
            .iter()
            .zip(&self.indices)
            .map(|(forms, &i)| forms[i].as_str())
            .collect();

        // Advance; wrapping past the last position means exhaustion.
        self.done = true;
        for (index, forms) in self.indices.iter_mut().zip(&self.forms) {
            *index += 1;
            if *index < forms.len() {
                self.done = false;
                break;
            }
            *index = 0;
        }

        Some(word)
    }
}

/// Upper-cases the first character and lower-cases the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capitalize;

impl Capitalize {
    fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => {
                let rest = chars.as_str().to_lowercase();
                first.to_uppercase().chain(rest.chars()).collect()
            }
            None => String::new(),
        }
    }
}

impl WordFormatter for Capitalize {
    fn name(&self) -> &'static str {
        "capitalize"
    }

    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
        Box::new(words.map(|w| Self::capitalize(&w)))
    }
}

/// Upper-cases the whole word.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl WordFormatter for UpperCase {
    fn name(&self) -> &'static str {
        "upper-case"
    }

    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
        Box::new(words.map(|w| w.to_uppercase()))
    }
}

/// Lower-cases the whole word.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCase;

impl WordFormatter for LowerCase {
    fn name(&self) -> &'static str {
        "lower-case"
    }

    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
        Box::new(words.map(|w| w.to_lowercase()))
    }
}
