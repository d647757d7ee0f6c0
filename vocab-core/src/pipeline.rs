//! End-to-end document analysis.
//!
//! [`Analyzer`] bundles a compiled lexicon, a stoplist and the analysis
//! options, and runs the per-document chain:
//!
//! 1. word count (`WC`) over the raw text
//! 2. pattern tokenization
//! 3. stopword and empty-token removal
//! 4. span matching over the remaining content tokens
//! 5. metric aggregation
//!
//! Stopwords never reach the matcher, so a stopword listed in the lexicon
//! is never counted.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;
use vocab_types::{AnalyzerConfig, DocumentMetrics};

use crate::analyzer::stopwords::Stoplist;
use crate::analyzer::tokenizer::Tokenizer;
use crate::analyzer::whitespace::word_count;
use crate::lexicon::CompiledLexicon;
use crate::metrics::aggregate;

/// Analyzes documents against one lexicon.
///
/// `Analyzer` is `Send + Sync` and cheap to clone: the lexicon is shared.
#[derive(Debug, Clone)]
pub struct Analyzer {
    lexicon: Arc<CompiledLexicon>,
    stoplist: Arc<Stoplist>,
    tokenizer: Tokenizer,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer. Accepts an owned lexicon or an `Arc` shared
    /// with other analyzers.
    pub fn new(
        lexicon: impl Into<Arc<CompiledLexicon>>,
        stoplist: Stoplist,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            lexicon: lexicon.into(),
            stoplist: Arc::new(stoplist),
            tokenizer: Tokenizer::from_config(&config),
            config,
        }
    }

    /// The compiled lexicon documents are scored against.
    #[inline]
    pub fn lexicon(&self) -> &CompiledLexicon {
        &self.lexicon
    }

    /// The options this analyzer was built with.
    #[inline]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Tokenizes with this analyzer's options.
    #[inline]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Computes every statistic for one document.
    pub fn analyze(&self, text: &str) -> DocumentMetrics {
        let wc = word_count(text, self.config.whitespace_method);
        let tokens = self.tokenizer.tokenize(text);
        let clean = self.stoplist.retain_content(&tokens);
        let matches = self.lexicon.match_tokens(clean.as_slice());

        debug!(
            wc,
            tokens = tokens.len(),
            clean = clean.len(),
            matched = matches.matched_token_count,
            "analyzed document"
        );

        aggregate(&self.lexicon, wc, tokens.as_slice(), clean.as_slice(), matches)
    }

    /// Analyzes documents in parallel on the current rayon pool.
    ///
    /// Results are in input order.
    pub fn analyze_batch<T>(&self, texts: &[T]) -> Vec<DocumentMetrics>
    where
        T: AsRef<str> + Sync,
    {
        debug!(documents = texts.len(), "analyzing batch");
        texts
            .par_iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn emotion_lexicon() -> CompiledLexicon {
        CompiledLexicon::from_rows([vec!["Word", "Emotion"], vec!["happy|sad*|exciting", "X"]])
            .expect("should build")
    }

    #[test]
    fn single_row_scenario() {
        let analyzer = Analyzer::new(emotion_lexicon(), Stoplist::new(), AnalyzerConfig::default());
        let text = "I feel happy today, not sad or exciting.";

        let tokens = analyzer.tokenize(text);
        assert!(tokens.iter().any(|t| t == "happy"));
        assert!(tokens.iter().any(|t| t == "sad"));
        assert!(tokens.iter().any(|t| t == "exciting"));

        let matches = analyzer.lexicon().match_tokens(tokens.as_slice());
        let happy = analyzer.lexicon().concept_id("happy").expect("should exist");
        assert_eq!(matches.hits(happy), 3);

        let metrics = analyzer.analyze(text);
        assert_eq!(metrics.categories.len(), 1);
        assert_eq!(metrics.categories[0].unique, 1);
        assert_eq!(metrics.categories[0].total, 3);
        assert_eq!(metrics.captured_text, "happy sad exciting");
    }

    #[test]
    fn full_metrics() {
        let analyzer = Analyzer::new(
            emotion_lexicon(),
            Stoplist::parse("i\nnot\nor"),
            AnalyzerConfig::default(),
        );
        let metrics = analyzer.analyze("I feel happy today, not sad or exciting.");

        // i feel happy today , not sad or exciting .
        assert_eq!(metrics.word_count, 8);
        assert_eq!(metrics.raw.count, 10);
        assert_eq!(metrics.raw.type_token_ratio, 100.0);
        assert_eq!(metrics.clean.count, 7);
        assert_eq!(metrics.non_dict.count, 4);
        assert_eq!(metrics.dict_percent, 30.0);
        assert_eq!(metrics.categories[0].cwr, 12.5);
        assert_eq!(metrics.categories[0].ccr, 33.33333);
    }

    #[test]
    fn stopwords_are_not_matched() {
        let analyzer = Analyzer::new(
            emotion_lexicon(),
            Stoplist::parse("happy"),
            AnalyzerConfig::default(),
        );
        let metrics = analyzer.analyze("happy happy sad");
        assert_eq!(metrics.raw.count, 3);
        assert_eq!(metrics.clean.count, 1);
        assert_eq!(metrics.categories[0].total, 1);
        assert_eq!(metrics.captured_text, "sad");
        assert_eq!(metrics.non_dict.count, 0);
        assert_eq!(metrics.dict_percent, 33.33333);

        let only_stopwords = analyzer.analyze("happy happy");
        assert_eq!(only_stopwords.clean.count, 0);
        assert_eq!(only_stopwords.categories[0].total, 0);
        assert_eq!(only_stopwords.dict_percent, 0.0);
    }

    #[test]
    fn empty_document() {
        let analyzer = Analyzer::new(emotion_lexicon(), Stoplist::new(), AnalyzerConfig::default());
        let metrics = analyzer.analyze("");
        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.raw.count, 0);
        assert_eq!(metrics.dict_percent, 0.0);
        assert_eq!(metrics.categories[0].cwr, 0.0);
    }

    #[test]
    fn legacy_word_count() {
        let lexicon = Arc::new(emotion_lexicon());
        let new = Analyzer::new(Arc::clone(&lexicon), Stoplist::new(), AnalyzerConfig::default());
        let old = Analyzer::new(lexicon, Stoplist::new(), AnalyzerConfig::legacy());

        assert_eq!(new.analyze("happy and/or sad").word_count, 4);
        assert_eq!(old.analyze("happy and/or sad").word_count, 3);
    }

    #[test]
    fn batch_keeps_input_order() {
        let analyzer = Analyzer::new(emotion_lexicon(), Stoplist::new(), AnalyzerConfig::default());
        let docs: Vec<String> = (0..64)
            .map(|i| "happy ".repeat(i % 5) + "plain words")
            .collect();

        let batch = analyzer.analyze_batch(docs.as_slice());
        assert_eq!(batch.len(), docs.len());
        for (doc, metrics) in docs.iter().zip(&batch) {
            assert_eq!(metrics, &analyzer.analyze(doc));
        }
        assert_eq!(batch[3].categories[0].total, 3);
    }

    #[test]
    fn analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }

    proptest! {
        #[test]
        fn matches_never_exceed_clean_tokens(
            words in prop::collection::vec("(happy|sad|sadness|exciting|so|not|[a-z]{1,6})", 0..24),
            stopwords in prop::collection::vec("(happy|sad|so|not|[a-z]{1,3})", 0..6),
        ) {
            let analyzer = Analyzer::new(
                emotion_lexicon(),
                stopwords.iter().cloned().collect::<Stoplist>(),
                AnalyzerConfig::default(),
            );
            let text = words.join(" ");
            let tokens = analyzer.tokenize(&text);
            let clean = analyzer.stoplist.retain_content(tokens.as_slice());
            let matches = analyzer.lexicon().match_tokens(clean.as_slice());
            let metrics = analyzer.analyze(&text);

            prop_assert!(matches.matched_token_count <= metrics.clean.count);
            prop_assert_eq!(
                matches.matched_token_count + metrics.non_dict.count,
                metrics.clean.count
            );
            for token in &matches.unmatched_tokens {
                prop_assert!(!analyzer.stoplist.contains(token));
            }
        }
    }
}
