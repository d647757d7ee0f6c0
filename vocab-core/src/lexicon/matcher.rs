//! Greedy longest-match span scanning.
//!
//! At each cursor position the matcher tries window lengths from
//! `max_entry_length` down to 1. For one length, exact forms are checked
//! before wildcard forms, and wildcards are checked in registration order.
//! The first hit consumes its whole window; a position with no hit at any
//! length yields one unmatched token.

use smallvec::SmallVec;
use vocab_types::{ConceptId, MatchResult};

use crate::lexicon::types::CompiledLexicon;

impl CompiledLexicon {
    /// Resolves an `n`-token phrase: exact entry first, then the first
    /// matching wildcard.
    #[inline]
    pub fn lookup(&self, n: usize, phrase: &str) -> Option<ConceptId> {
        if let Some(concept) = self.exact_entry(n, phrase) {
            return Some(concept);
        }
        self.wildcard_entries(n)
            .iter()
            .find(|entry| entry.pattern.matches(phrase))
            .map(|entry| entry.concept)
    }

    /// Scans a token sequence and records every matched span.
    ///
    /// Total for any input: an empty sequence or an empty lexicon yields a
    /// result with every token unmatched.
    pub fn match_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> MatchResult {
        let mut result = MatchResult::default();
        let mut window = String::new();
        let mut ends: SmallVec<[usize; 8]> = SmallVec::new();
        let mut i = 0;

        while i < tokens.len() {
            let longest = self.max_entry_length.min(tokens.len() - i);

            window.clear();
            ends.clear();
            for token in &tokens[i..i + longest] {
                if !ends.is_empty() {
                    window.push(' ');
                }
                window.push_str(token.as_ref());
                ends.push(window.len());
            }

            let hit = (1..=longest)
                .rev()
                .find_map(|n| self.lookup(n, &window[..ends[n - 1]]).map(|c| (n, c)));

            match hit {
                Some((n, concept)) => {
                    let phrase = &window[..ends[n - 1]];
                    result.record_hit(concept, n, phrase);
                    i += n;
                }
                None => {
                    result.unmatched_tokens.push(tokens[i].as_ref().to_owned());
                    i += 1;
                }
            }
        }

        result
    }
}
