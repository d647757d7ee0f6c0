//! Text analysis front end.
//!
//! This module provides the components that turn raw text into the token
//! streams the lexicon consumes:
//! - **Normalizer**: Collapses elongated character runs
//! - **Tokenizer**: Segments text into words, links, emoticons and symbols
//! - **Whitespace**: Counts words for the `WC` statistic
//! - **Stopwords**: Filters tokens before matching and the clean statistics

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;
pub mod whitespace;

pub use normalizer::TextNormalizer;
pub use stopwords::Stoplist;
pub use tokenizer::{tokenize, TokenKind, Tokenizer};
pub use whitespace::word_count;
