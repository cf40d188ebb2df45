//! Word lists queried by dictionary rules.

use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Errors raised by a word list backend.
#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    /// IO error reading the backing resource.
    #[error("Failed to read word list {path}: {source}")]
    Io {
        /// Path of the backing resource.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The backend cannot answer queries.
    #[error("Word list unavailable: {0}")]
    Unavailable(String),
}

/// A membership-testable collection of known words.
///
/// Lookups are case- and form-sensitive exactly as the backend is.
pub trait WordList: Send + Sync {
    /// Returns true if `word` is in the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn contains(&self, word: &str) -> Result<bool, WordListError>;
}

/// An in-memory word list.
#[derive(Debug, Clone, Default)]
pub struct MemoryWordList {
    words: HashSet<String>,
    case_sensitive: bool,
}

impl MemoryWordList {
    /// Creates a case-sensitive list from words.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            case_sensitive: true,
        }
    }

    /// Makes lookups ignore case.
    #[must_use]
    pub fn case_insensitive(self) -> Self {
        Self {
            words: self.words.into_iter().map(|w| w.to_lowercase()).collect(),
            case_sensitive: false,
        }
    }

    /// Reads one word per line. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }
        Ok(Self {
            words,
            case_sensitive: true,
        })
    }

    /// Loads a newline-delimited dictionary, such as `/usr/share/dict/words`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, WordListError> {
        let io_err = |source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(io_err)?;
        let list = Self::from_reader(std::io::BufReader::new(file)).map_err(io_err)?;
        tracing::debug!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    /// Returns the number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the list holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordList for MemoryWordList {
    fn contains(&self, word: &str) -> Result<bool, WordListError> {
        if self.case_sensitive {
            Ok(self.words.contains(word))
        } else {
            Ok(self.words.contains(&word.to_lowercase()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn memory_list_is_case_sensitive_by_default() {
        let list = MemoryWordList::new(["password"]);
        assert!(list.contains("password").unwrap());
        assert!(!list.contains("Password").unwrap());
    }

    #[test]
    fn case_insensitive_list() {
        let list = MemoryWordList::new(["Password"]).case_insensitive();
        assert!(list.contains("PASSWORD").unwrap());
        assert!(list.contains("password").unwrap());
    }

    #[test]
    fn from_reader_skips_blank_lines() {
        let list = MemoryWordList::from_reader("apple\n\n  pear \n".as_bytes()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("pear").unwrap());
    }

    #[test]
    fn from_file_loads_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbeta").unwrap();

        let list = MemoryWordList::from_file(file.path()).unwrap();
        assert!(list.contains("beta").unwrap());
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = MemoryWordList::from_file(Path::new("/nonexistent/words")).unwrap_err();
        assert!(matches!(err, WordListError::Io { .. }));
    }
}
