//! Leetspeak decoding.
//!
//! Decoding is a backtracking search: at every position each token that
//! prefixes the remaining text may stand for one of several letters, and
//! the literal character always stands for itself. [`LeetVariants`] walks
//! that search tree depth-first with an explicit stack and yields one
//! complete reading per call to `next`.

use super::{WordFormatter, Words};
use std::collections::BTreeMap;

/// Letters and the tokens commonly written in their place.
const ENCODE_TABLE: &[(char, &[&str])] = &[
    ('a', &["4", "@", "∂"]),
    ('b', &["8", "ß"]),
    ('c', &["(", "¢", "<", "[", "©"]),
    ('d', &["∂"]),
    ('e', &["3", "€", "є"]),
    ('f', &["ƒ"]),
    ('g', &["6", "9"]),
    ('h', &["#"]),
    ('i', &["1", "!", "|", ":"]),
    ('j', &["¿"]),
    ('k', &["X"]),
    ('l', &["1", "£", "ℓ"]),
    ('o', &["0", "°"]),
    ('r', &["2", "®", "Я"]),
    ('s', &["5", "$", "§"]),
    ('t', &["7", "†"]),
    ('u', &["µ"]),
    ('w', &["vv"]),
    ('x', &["×"]),
    ('y', &["φ", "¥"]),
    ('z', &["2", "≥"]),
];

/// Decodes leetspeak into every plausible plain-text reading.
///
/// Decoded letters are lower case; characters that are not decoded keep
/// their original form, so `"1337 5P34K"` yields `"leet sPeaK"`. For a
/// uniform case, put [`LowerCase`](super::LowerCase) before the decoder
/// (`"lower-case+leet"`) or [`UpperCase`](super::UpperCase) after it
/// (`"leet+upper-case"`), or match against a case-insensitive word list.
#[derive(Debug, Clone)]
pub struct LeetDecoder {
    /// Token (as characters) to the letters it may represent.
    decode: BTreeMap<Vec<char>, Vec<char>>,
}

impl Default for LeetDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LeetDecoder {
    /// Creates a decoder from the built-in substitution table.
    #[must_use]
    pub fn new() -> Self {
        let mut decode: BTreeMap<Vec<char>, Vec<char>> = BTreeMap::new();
        for &(letter, tokens) in ENCODE_TABLE {
            for token in tokens {
                decode
                    .entry(token.chars().collect())
                    .or_default()
                    .push(letter);
            }
        }
        Self { decode }
    }

    /// Lazily enumerates the readings of one word.
    #[must_use]
    pub fn decode<'a>(&'a self, word: &str) -> LeetVariants<'a> {
        LeetVariants {
            decoder: self,
            chars: word.chars().collect(),
            stack: Vec::new(),
            prefix: Vec::new(),
            started: false,
        }
    }

    /// Alternatives at `pos`: every `(token length, letter)` pair whose
    /// token prefixes the remaining text, then the literal character.
    fn alternatives(&self, chars: &[char], pos: usize) -> Vec<(usize, char)> {
        let rest = &chars[pos..];
        let mut options: Vec<(usize, char)> = self
            .decode
            .iter()
            .filter(|(token, _)| rest.starts_with(token))
            .flat_map(|(token, letters)| letters.iter().map(move |&l| (token.len(), l)))
            .collect();
        options.push((1, rest[0]));
        options
    }
}

impl WordFormatter for LeetDecoder {
    fn name(&self) -> &'static str {
        "leet"
    }

    fn apply<'a>(&'a self, words: Words<'a>) -> Words<'a> {
        Box::new(words.flat_map(move |word| self.decode(&word)))
    }
}

struct Frame {
    pos: usize,
    options: Vec<(usize, char)>,
    next: usize,
}

/// Iterator over the readings of a single word.
///
/// Memory is bounded by the word length: the stack holds at most one frame
/// per character.
pub struct LeetVariants<'a> {
    decoder: &'a LeetDecoder,
    chars: Vec<char>,
    stack: Vec<Frame>,
    /// Letters chosen by every frame below the top one.
    prefix: Vec<char>,
    started: bool,
}

impl LeetVariants<'_> {
    fn frame_at(&self, pos: usize) -> Frame {
        Frame {
            pos,
            options: self.decoder.alternatives(&self.chars, pos),
            next: 0,
        }
    }
}

impl Iterator for LeetVariants<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if !self.started {
            self.started = true;
            if self.chars.is_empty() {
                return Some(String::new());
            }
            let root = self.frame_at(0);
            self.stack.push(root);
        }

        while let Some(frame) = self.stack.last_mut() {
            let Some(&(len, letter)) = frame.options.get(frame.next) else {
                self.stack.pop();
                // Undo the letter that led into the exhausted frame.
                self.prefix.pop();
                continue;
            };
            frame.next += 1;

            let end = frame.pos + len;
            if end == self.chars.len() {
                let mut word: String = self.prefix.iter().collect();
                word.push(letter);
                return Some(word);
            }

            self.prefix.push(letter);
            let child = self.frame_at(end);
            self.stack.push(child);
        }

        None
    }
}
