//! Stopword lists.
//!
//! One word per line; lines are trimmed and lower-cased, blank lines ignored.
//! Stopwords are removed before dictionary matching, so they shape the clean
//! statistics and can never produce a hit.

use std::{fs, io, path::Path};

use rustc_hash::FxHashSet;

/// A set of lower-cased stopwords.
#[derive(Debug, Clone, Default)]
pub struct Stoplist {
    words: FxHashSet<String>,
}

impl Stoplist {
    /// Empty list: nothing is filtered except empty tokens.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a newline-separated word list.
    pub fn parse(contents: &str) -> Self {
        let words = contents
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Reads and parses a stopword file.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Whether `token` is a stopword. Tokens are compared as given.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of distinct stopwords.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the tokens that are neither stopwords nor empty, in order.
    pub fn retain_content<'a>(&self, tokens: &'a [String]) -> Vec<&'a str> {
        tokens
            .iter()
            .map(String::as_str)
            .filter(|token| !token.is_empty() && !self.contains(token))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Stoplist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }
}
