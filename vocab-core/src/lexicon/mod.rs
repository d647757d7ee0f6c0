//! Dictionary compilation and span matching.
//!
//! A category table is compiled once into a [`CompiledLexicon`]: concepts
//! with their category memberships, and surface forms bucketed by token
//! length. Matching then walks a token stream left to right and assigns every
//! span to at most one concept.
//!
//! Threading:
//! - [`CompiledLexicon`] is immutable after [`LexiconBuilder::build`] and is
//!   `Send + Sync`; share it behind an `Arc` to match documents in parallel.
//!   Per-document state lives in the returned `MatchResult`.

mod api;
mod builder;
mod matcher;
mod stats;
mod table;
mod types;
mod wildcard;

pub use builder::LexiconBuilder;
pub use stats::LexiconStats;
pub use table::CategoryTable;
pub use types::{CompiledLexicon, Concept, WildcardEntry};
pub use wildcard::WildcardPattern;
