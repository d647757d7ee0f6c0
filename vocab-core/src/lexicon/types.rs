//! Lexicon types.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use vocab_types::{CategoryId, ConceptId};

use crate::lexicon::wildcard::WildcardPattern;

/// A named concept and the categories it belongs to.
#[derive(Debug, Clone)]
pub struct Concept {
    /// The first surface form of the row that introduced the concept.
    pub name: String,
    /// Categories marked on the concept's latest row, ascending.
    pub categories: SmallVec<[CategoryId; 4]>,
}

/// A wildcard surface form, kept in registration order.
#[derive(Debug, Clone)]
pub struct WildcardEntry {
    /// Lower-cased form as written in the table, e.g. `"sad*"`.
    pub source: Box<str>,
    pub pattern: WildcardPattern,
    /// Concept credited on a match.
    pub concept: ConceptId,
}

/// Every surface form spanning the same number of tokens.
#[derive(Debug, Clone, Default)]
pub struct LengthBucket {
    pub exact: FxHashMap<Box<str>, ConceptId>,
    pub wildcards: Vec<WildcardEntry>,
}

impl LengthBucket {
    /// Number of surface forms, exact and wildcard.
    #[inline]
    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcards.is_empty()
    }
}

/// Immutable, compiled dictionary.
///
/// Surface forms are bucketed by token length; bucket `n - 1` holds the
/// `n`-token forms. Within a bucket exact forms are hashed and wildcard forms
/// are tried in registration order.
///
/// A compiled lexicon is read-only and can be shared across threads behind an
/// `Arc`.
#[derive(Debug, Clone, Default)]
pub struct CompiledLexicon {
    pub(crate) categories: Vec<String>,
    pub(crate) concepts: Vec<Concept>,
    pub(crate) concept_ids: FxHashMap<String, ConceptId>,
    pub(crate) buckets: Vec<LengthBucket>,
    pub(crate) max_entry_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledLexicon>();
    }

    #[test]
    fn empty_bucket() {
        let bucket = LengthBucket::default();
        assert!(bucket.is_empty());
        assert_eq!(bucket.len(), 0);
    }
}
