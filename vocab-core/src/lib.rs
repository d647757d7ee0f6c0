//! Dictionary-based lexical analysis engine.
//!
//! The crate is organised around the path a document takes:
//!
//! - [`analyzer`]: run reduction, pattern tokenization, word counting and
//!   stopword filtering
//! - [`lexicon`]: compiling a category table and matching token spans
//!   against it
//! - [`metrics`]: turning match results into per-document statistics
//! - [`pipeline`]: the [`Analyzer`] that chains all of the above, one
//!   document at a time or as a parallel batch
//!
//! ```
//! use vocab_core::{Analyzer, CompiledLexicon, Stoplist};
//! use vocab_types::AnalyzerConfig;
//!
//! let lexicon = CompiledLexicon::from_rows([
//!     vec!["Word", "Emotion"],
//!     vec!["happy|glad|joy*", "X"],
//! ])
//! .expect("valid table");
//!
//! let analyzer = Analyzer::new(lexicon, Stoplist::new(), AnalyzerConfig::default());
//! let metrics = analyzer.analyze("So glad, pure joyful noise :)");
//!
//! assert_eq!(metrics.categories[0].total, 2);
//! assert_eq!(metrics.captured_text, "glad joyful");
//! ```

pub mod analyzer;
pub mod lexicon;
pub mod metrics;
pub mod pipeline;

pub use analyzer::{tokenize, Stoplist, TokenKind, Tokenizer};
pub use lexicon::{CategoryTable, CompiledLexicon, LexiconBuilder, LexiconStats};
pub use pipeline::Analyzer;
