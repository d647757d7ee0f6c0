//! Per-document statistics.
//!
//! Turns the token streams and the match outcome of one document into a
//! [`DocumentMetrics`]. Every category of the lexicon gets a score, including
//! categories with no hits, so tabular output always has the same columns.

use rustc_hash::FxHashSet;
use vocab_types::{percentage, CategoryScore, DocumentMetrics, MatchResult, TokenStats};

use crate::lexicon::CompiledLexicon;

/// Token count and type/token ratio of `tokens`.
pub fn token_stats<S: AsRef<str>>(tokens: &[S]) -> TokenStats {
    let distinct: FxHashSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    TokenStats::new(tokens.len(), distinct.len())
}

/// Per-category distinct-concept and hit totals, in category order.
pub fn category_scores(
    lexicon: &CompiledLexicon,
    word_count: usize,
    matches: &MatchResult,
) -> Vec<CategoryScore> {
    let mut scores = vec![CategoryScore::default(); lexicon.categories().len()];

    for (&concept, &hits) in &matches.concept_counts {
        for &category in lexicon.category_ids(concept) {
            if let Some(score) = scores.get_mut(category as usize) {
                score.unique += 1;
                score.total += hits;
            }
        }
    }

    for score in &mut scores {
        // A document can hold more concepts than whitespace words ("happy,sad").
        score.cwr = percentage(score.unique as usize, word_count).min(100.0);
        score.ccr = percentage(score.unique as usize, score.total as usize);
    }

    scores
}

/// Assembles the full metric set for one document.
pub fn aggregate<R, C>(
    lexicon: &CompiledLexicon,
    word_count: usize,
    raw_tokens: &[R],
    clean_tokens: &[C],
    matches: MatchResult,
) -> DocumentMetrics
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    let categories = category_scores(lexicon, word_count, &matches);

    DocumentMetrics {
        word_count,
        raw: token_stats(raw_tokens),
        clean: token_stats(clean_tokens),
        non_dict: token_stats(matches.unmatched_tokens.as_slice()),
        dict_percent: percentage(matches.matched_token_count, raw_tokens.len()),
        captured_text: matches.captured_text,
        categories,
    }
}
