//! Core types shared by the Vocabulate crates.
//!
//! This crate holds the plain data that crosses crate boundaries:
//!
//! - **Identifiers**: dense indices into a compiled lexicon
//! - **Per-document results**: the raw match outcome and the derived metrics
//! - **Configuration**: analyzer and table-format options with `const` presets
//! - **Errors**: failures that can occur while loading a dictionary table
//!
//! Nothing here depends on the tokenizer or matcher, so front ends can name
//! these types without pulling in the engine.

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use thiserror::Error;

/// Dense concept identifier.
///
/// Concepts are numbered in first-seen order while a dictionary table is
/// compiled. The id is only meaningful together with the lexicon that
/// produced it.
pub type ConceptId = u32;

/// Index of a category column, in table order.
pub type CategoryId = u32;

/// Number of decimal digits every ratio field is rounded to.
pub const RATIO_PRECISION: i32 = 5;

/// Rounds a ratio to [`RATIO_PRECISION`] decimal digits.
///
/// Halfway cases round to the even digit: `0.390625` becomes `0.39062`.
#[inline]
#[must_use]
pub fn round_ratio(value: f64) -> f64 {
    let scale = 10f64.powi(RATIO_PRECISION);
    (value * scale).round_ties_even() / scale
}

/// `numerator / denominator * 100`, rounded; `0.0` when the denominator is zero.
#[inline]
#[must_use]
pub fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round_ratio(numerator as f64 / denominator as f64 * 100.0)
}

/// Outcome of scanning one document's token stream against a lexicon.
///
/// Created fresh per document and consumed by the metrics aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Hits per concept. One hit per matched span, regardless of span length.
    pub concept_counts: BTreeMap<ConceptId, u32>,
    /// Sum of the token lengths of every matched span.
    pub matched_token_count: usize,
    /// Matched spans in match order, joined by single spaces.
    pub captured_text: String,
    /// Tokens that took part in no match, in document order.
    pub unmatched_tokens: Vec<String>,
}

impl MatchResult {
    /// Number of hits recorded for `concept`.
    #[inline]
    #[must_use]
    pub fn hits(&self, concept: ConceptId) -> u32 {
        self.concept_counts.get(&concept).copied().unwrap_or(0)
    }

    /// Total number of matched spans.
    #[must_use]
    pub fn total_hits(&self) -> u32 {
        self.concept_counts.values().sum()
    }

    /// Records one hit for `concept` covering `phrase` (`span_len` tokens).
    pub fn record_hit(&mut self, concept: ConceptId, span_len: usize, phrase: &str) {
        *self.concept_counts.entry(concept).or_insert(0) += 1;
        self.matched_token_count += span_len;
        if !self.captured_text.is_empty() {
            self.captured_text.push(' ');
        }
        self.captured_text.push_str(phrase);
    }
}

/// Token count and type/token ratio of one token sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TokenStats {
    /// Number of tokens.
    pub count: usize,
    /// Distinct tokens / tokens × 100, rounded. `0.0` for an empty sequence.
    pub type_token_ratio: f64,
}

impl TokenStats {
    /// Builds stats from a token count and a distinct-token count.
    #[inline]
    #[must_use]
    pub fn new(count: usize, distinct: usize) -> Self {
        Self {
            count,
            type_token_ratio: percentage(distinct, count),
        }
    }
}

/// Per-category scores for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryScore {
    /// Distinct matched concepts that belong to the category.
    pub unique: u32,
    /// Sum of the hit counts of those concepts.
    pub total: u32,
    /// Concept/word ratio: `unique / WC × 100`.
    pub cwr: f64,
    /// Concept/count ratio: `unique / total × 100`.
    pub ccr: f64,
}

/// Every statistic computed for a single document.
///
/// Column names used by tabular writers are noted on each field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetrics {
    /// `WC`: whitespace/path-aware word count.
    pub word_count: usize,
    /// `TC_Raw` / `TTR_Raw`: over the pattern tokenizer output.
    pub raw: TokenStats,
    /// `TC_Clean` / `TTR_Clean`: after stopword and empty-token removal.
    pub clean: TokenStats,
    /// `TC_NonDict` / `TTR_NonDict`: over the unmatched tokens.
    pub non_dict: TokenStats,
    /// `DictPercent`: matched tokens / `TC_Raw` × 100.
    pub dict_percent: f64,
    /// `CapturedText`: all matched spans joined by spaces.
    pub captured_text: String,
    /// One score per lexicon category, in category order.
    pub categories: Vec<CategoryScore>,
}

/// How the `WC` word count splits a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WhitespaceMethod {
    /// Plain whitespace split.
    Simple,
    /// Whitespace split, then chunks without a `.` that are not `http(s)://`
    /// links are further split on `/`.
    #[default]
    PathAware,
}

impl fmt::Display for WhitespaceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhitespaceMethod::Simple => f.write_str("old"),
            WhitespaceMethod::PathAware => f.write_str("new"),
        }
    }
}

impl FromStr for WhitespaceMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" | "simple" => Ok(WhitespaceMethod::Simple),
            "new" | "path-aware" | "path_aware" => Ok(WhitespaceMethod::PathAware),
            _ => Err(ConfigError::UnknownWhitespaceMethod(s.to_owned())),
        }
    }
}

/// Per-document analysis options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Collapse any character repeated 4+ times down to 3 before tokenizing.
    pub reduce_repeated_chars: bool,
    /// Keep token case as written instead of lower-casing non-emoticons.
    pub preserve_case: bool,
    /// Word-count method for the `WC` field.
    pub whitespace_method: WhitespaceMethod,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            reduce_repeated_chars: true,
            preserve_case: false,
            whitespace_method: WhitespaceMethod::PathAware,
        }
    }
}

impl AnalyzerConfig {
    /// Configuration matching the legacy word count (plain whitespace split).
    pub const fn legacy() -> Self {
        Self {
            reduce_repeated_chars: true,
            preserve_case: false,
            whitespace_method: WhitespaceMethod::Simple,
        }
    }

    /// Tokenizes text as written: no run reduction, no case folding.
    pub const fn verbatim() -> Self {
        Self {
            reduce_repeated_chars: false,
            preserve_case: true,
            whitespace_method: WhitespaceMethod::PathAware,
        }
    }
}

/// Delimited-text format of a dictionary or document table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Quote byte.
    pub quote: u8,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl TableFormat {
    /// Tab-separated values with `"` quoting.
    pub const fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            quote: b'"',
        }
    }
}

/// Errors raised while loading or compiling a dictionary table.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The table contained no rows, so there is no header.
    #[error("category table is empty: missing header row")]
    MissingHeader,

    /// The reader rejected a record (bad quoting, invalid UTF-8, ...).
    #[error("malformed category table at record {record}: {reason}")]
    Malformed {
        /// Zero-based record number, header included.
        record: u64,
        /// Reader diagnostic.
        reason: String,
    },

    /// A compiled lexicon holds entries but no positive entry length.
    #[error("lexicon holds {entries} entries but max entry length is {max_entry_length}")]
    InvalidState {
        /// Number of registered entries.
        entries: usize,
        /// The offending maximum entry length.
        max_entry_length: usize,
    },

    /// A wildcard form could not be compiled into a matcher.
    #[error("wildcard '{pattern}' could not be compiled: {reason}")]
    Wildcard {
        /// The lower-cased surface form.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Not one of `old`, `new`, `simple`, `path-aware`.
    #[error("unknown whitespace method '{0}' (expected 'old' or 'new')")]
    UnknownWhitespaceMethod(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_ratio_keeps_five_digits() {
        assert_eq!(round_ratio(66.666666666), 66.66667);
        assert_eq!(round_ratio(12.5), 12.5);
        assert_eq!(round_ratio(0.0), 0.0);
    }

    #[test]
    fn percentage_zero_denominator() {
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn percentage_basic() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(2, 3), 66.66667);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn exact_halves_round_to_even() {
        assert_eq!(percentage(1, 256), 0.39062);
        assert_eq!(percentage(3, 256), 1.17188);
    }

    #[test]
    fn token_stats_empty() {
        let stats = TokenStats::new(0, 0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.type_token_ratio, 0.0);
    }

    #[test]
    fn match_result_record_hit() {
        let mut result = MatchResult::default();
        result.record_hit(3, 2, "new york");
        result.record_hit(1, 1, "happy");
        result.record_hit(3, 2, "new york");

        assert_eq!(result.hits(3), 2);
        assert_eq!(result.hits(1), 1);
        assert_eq!(result.hits(7), 0);
        assert_eq!(result.total_hits(), 3);
        assert_eq!(result.matched_token_count, 5);
        assert_eq!(result.captured_text, "new york happy new york");
    }

    #[test]
    fn whitespace_method_parse() {
        assert_eq!("old".parse(), Ok(WhitespaceMethod::Simple));
        assert_eq!("NEW".parse(), Ok(WhitespaceMethod::PathAware));
        assert_eq!("path-aware".parse(), Ok(WhitespaceMethod::PathAware));
        assert_eq!(
            "fancy".parse::<WhitespaceMethod>(),
            Err(ConfigError::UnknownWhitespaceMethod("fancy".into()))
        );
    }

    #[test]
    fn whitespace_method_display_round_trips() {
        for method in [WhitespaceMethod::Simple, WhitespaceMethod::PathAware] {
            assert_eq!(method.to_string().parse(), Ok(method));
        }
    }

    #[test]
    fn config_presets() {
        let default = AnalyzerConfig::default();
        assert!(default.reduce_repeated_chars);
        assert!(!default.preserve_case);
        assert_eq!(default.whitespace_method, WhitespaceMethod::PathAware);

        assert_eq!(
            AnalyzerConfig::legacy().whitespace_method,
            WhitespaceMethod::Simple
        );
        assert!(AnalyzerConfig::verbatim().preserve_case);
        assert_eq!(TableFormat::tsv().delimiter, b'\t');
        assert_eq!(TableFormat::default().quote, b'"');
    }

    #[test]
    fn lexicon_error_display() {
        let err = LexiconError::Malformed {
            record: 4,
            reason: "invalid utf-8".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed category table at record 4: invalid utf-8"
        );
        assert!(LexiconError::MissingHeader.to_string().contains("header"));
    }
}
