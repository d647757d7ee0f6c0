//! Statistics and LexiconStats.

use crate::lexicon::types::CompiledLexicon;

/// A snapshot of lexicon statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconStats {
    /// Number of category columns.
    pub num_categories: usize,
    /// Number of distinct concepts.
    pub num_concepts: usize,
    /// Number of exact surface forms across all lengths.
    pub exact_entries: usize,
    /// Number of wildcard surface forms across all lengths.
    pub wildcard_entries: usize,
    /// Token count of the longest surface form.
    pub max_entry_length: usize,
}

impl CompiledLexicon {
    /// Returns lexicon statistics.
    pub fn stats(&self) -> LexiconStats {
        LexiconStats::from_lexicon(self)
    }
}

impl LexiconStats {
    /// Constructs stats from a compiled lexicon.
    pub fn from_lexicon(lexicon: &CompiledLexicon) -> Self {
        let (exact, wildcard) = lexicon
            .buckets
            .iter()
            .fold((0, 0), |(e, w), b| (e + b.exact.len(), w + b.wildcards.len()));

        Self {
            num_categories: lexicon.categories.len(),
            num_concepts: lexicon.concepts.len(),
            exact_entries: exact,
            wildcard_entries: wildcard,
            max_entry_length: lexicon.max_entry_length,
        }
    }

    /// Total surface forms.
    pub fn total_entries(&self) -> usize {
        self.exact_entries + self.wildcard_entries
    }
}

impl core::fmt::Display for LexiconStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} categories, {} concepts, {} entries ({} exact, {} wildcard), max length {}",
            self.num_categories,
            self.num_concepts,
            self.total_entries(),
            self.exact_entries,
            self.wildcard_entries,
            self.max_entry_length
        )
    }
}
