//! Read-only accessors.

use vocab_types::{CategoryId, ConceptId};

use crate::lexicon::types::{CompiledLexicon, WildcardEntry};

impl CompiledLexicon {
    /// Category names in column order.
    #[inline]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of distinct concepts.
    #[inline]
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Id of the concept named `name` (case-sensitive).
    #[inline]
    pub fn concept_id(&self, name: &str) -> Option<ConceptId> {
        self.concept_ids.get(name).copied()
    }

    #[inline]
    pub fn concept_name(&self, id: ConceptId) -> Option<&str> {
        self.concepts.get(id as usize).map(|c| c.name.as_str())
    }

    /// Categories the concept belongs to, in column order. Empty for an
    /// unknown id.
    #[inline]
    pub fn category_ids(&self, id: ConceptId) -> &[CategoryId] {
        self.concepts
            .get(id as usize)
            .map(|c| c.categories.as_slice())
            .unwrap_or_default()
    }

    /// Categories of the concept named `name`.
    pub fn categories_of(&self, name: &str) -> Option<&[CategoryId]> {
        self.concept_id(name).map(|id| self.category_ids(id))
    }

    /// Token count of the longest surface form; `0` for an empty lexicon.
    #[inline]
    pub fn max_entry_length(&self) -> usize {
        self.max_entry_length
    }

    /// Concept of the exact `n`-token form `phrase`.
    #[inline]
    pub fn exact_entry(&self, n: usize, phrase: &str) -> Option<ConceptId> {
        let bucket = self.buckets.get(n.checked_sub(1)?)?;
        bucket.exact.get(phrase).copied()
    }

    /// Wildcard `n`-token forms in try-order.
    #[inline]
    pub fn wildcard_entries(&self, n: usize) -> &[WildcardEntry] {
        n.checked_sub(1)
            .and_then(|i| self.buckets.get(i))
            .map(|b| b.wildcards.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> CompiledLexicon {
        CompiledLexicon::from_rows([
            vec!["Word", "Emotion", "Place"],
            vec!["Happy|joy*", "X", ""],
            vec!["new york|nyc", "", "X"],
        ])
        .expect("should build")
    }

    #[test]
    fn category_names() {
        assert_eq!(sample().categories(), ["Emotion", "Place"]);
    }

    #[test]
    fn concept_lookup_is_case_sensitive() {
        let lexicon = sample();
        assert_eq!(lexicon.concept_id("Happy"), Some(0));
        assert_eq!(lexicon.concept_id("happy"), None);
        assert_eq!(lexicon.concept_name(1), Some("new york"));
        assert_eq!(lexicon.concept_name(9), None);
    }

    #[test]
    fn category_membership() {
        let lexicon = sample();
        assert_eq!(lexicon.category_ids(0), [0u32]);
        assert_eq!(lexicon.category_ids(1), [1u32]);
        assert!(lexicon.category_ids(42).is_empty());
    }

    #[test]
    fn entries_by_length() {
        let lexicon = sample();
        assert_eq!(lexicon.max_entry_length(), 2);
        assert_eq!(lexicon.exact_entry(2, "new york"), Some(1));
        assert_eq!(lexicon.exact_entry(1, "new york"), None);
        assert_eq!(lexicon.exact_entry(0, "nyc"), None);
        assert_eq!(lexicon.exact_entry(7, "nyc"), None);
        assert_eq!(lexicon.wildcard_entries(1).len(), 1);
        assert!(lexicon.wildcard_entries(2).is_empty());
        assert!(lexicon.wildcard_entries(0).is_empty());
    }
}
