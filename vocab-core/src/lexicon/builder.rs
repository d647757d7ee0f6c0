//! Lexicon compilation.
//!
//! A category table row looks like
//!
//! ```text
//! happy|glad|joy*,X,,X
//! ```
//!
//! The first cell is a `|`-separated list of surface forms. The first form
//! names the concept (case preserved); every form, the name included, is
//! registered lower-cased. Each remaining cell marks membership in the
//! category of the same column when it holds anything but whitespace.
//!
//! ## Repeated rows and forms
//!
//! - A concept seen again has its category set replaced by the later row.
//! - An exact form seen again is re-pointed at the later concept.
//! - A wildcard form seen again keeps its original position in the
//!   try-order but is re-pointed at the later concept.

use memchr::memchr;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};
use vocab_types::{CategoryId, ConceptId, LexiconError};

use crate::lexicon::table::CategoryTable;
use crate::lexicon::types::{CompiledLexicon, Concept, LengthBucket, WildcardEntry};
use crate::lexicon::wildcard::WildcardPattern;

/// Incrementally compiles category-table rows into a [`CompiledLexicon`].
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    lexicon: CompiledLexicon,
    /// `(length, form)` to index in that bucket's wildcard list.
    wildcard_slots: FxHashMap<(usize, Box<str>), usize>,
    rows: u64,
    skipped: u64,
}

impl LexiconBuilder {
    /// Creates a builder for the given category names, in column order.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::default();
        builder.lexicon.categories = categories.into_iter().map(Into::into).collect();
        builder
    }

    /// Creates a builder from a header row; the first column is ignored.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        Self::new(header.iter().skip(1).map(|cell| cell.as_ref().to_owned()))
    }

    /// Number of category columns rows are read against.
    #[inline]
    pub fn num_categories(&self) -> usize {
        self.lexicon.categories.len()
    }

    /// Adds one table row.
    ///
    /// Returns `Ok(false)` when the row is skipped because its first cell is
    /// missing or blank. Missing category cells count as non-membership, and
    /// cells past the last header column are ignored.
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) -> Result<bool, LexiconError> {
        self.rows += 1;

        let Some(first) = row.first().map(|cell| cell.as_ref()) else {
            self.skipped += 1;
            trace!(row = self.rows, "skipping empty row");
            return Ok(false);
        };
        if first.trim().is_empty() {
            self.skipped += 1;
            trace!(row = self.rows, "skipping row with blank concept cell");
            return Ok(false);
        }

        let forms: SmallVec<[&str; 8]> = first.split('|').map(str::trim).collect();
        let concept = self.intern_concept(forms[0]);

        let num_cats = self.num_categories();
        let categories: SmallVec<[CategoryId; 4]> = row[1..]
            .iter()
            .map(|cell| cell.as_ref())
            .take(num_cats)
            .enumerate()
            .filter(|(_, cell)| !cell.trim().is_empty())
            .map(|(i, _)| i as CategoryId)
            .collect();
        self.lexicon.concepts[concept as usize].categories = categories;

        for form in forms {
            self.add_form(form, concept)?;
        }

        Ok(true)
    }

    fn intern_concept(&mut self, name: &str) -> ConceptId {
        if let Some(&id) = self.lexicon.concept_ids.get(name) {
            return id;
        }
        let id = self.lexicon.concepts.len() as ConceptId;
        self.lexicon.concepts.push(Concept {
            name: name.to_owned(),
            categories: SmallVec::new(),
        });
        self.lexicon.concept_ids.insert(name.to_owned(), id);
        id
    }

    fn bucket_mut(&mut self, n: usize) -> &mut LengthBucket {
        if self.lexicon.buckets.len() < n {
            self.lexicon.buckets.resize_with(n, LengthBucket::default);
        }
        &mut self.lexicon.buckets[n - 1]
    }

    fn add_form(&mut self, form: &str, concept: ConceptId) -> Result<(), LexiconError> {
        let form = form.trim().to_lowercase();
        if form.is_empty() {
            return Ok(());
        }

        let n = form.split_whitespace().count();
        self.lexicon.max_entry_length = self.lexicon.max_entry_length.max(n);
        let form: Box<str> = form.into_boxed_str();

        if memchr(b'*', form.as_bytes()).is_none() {
            self.bucket_mut(n).exact.insert(form, concept);
            return Ok(());
        }

        let key = (n, form);
        if let Some(&slot) = self.wildcard_slots.get(&key) {
            self.bucket_mut(n).wildcards[slot].concept = concept;
            return Ok(());
        }

        let pattern =
            WildcardPattern::compile(&key.1).map_err(|err| LexiconError::Wildcard {
                pattern: key.1.to_string(),
                reason: err.to_string(),
            })?;

        let bucket = self.bucket_mut(n);
        let slot = bucket.wildcards.len();
        bucket.wildcards.push(WildcardEntry {
            source: key.1.clone(),
            pattern,
            concept,
        });
        self.wildcard_slots.insert(key, slot);
        Ok(())
    }

    /// Finalizes the lexicon.
    pub fn build(self) -> Result<CompiledLexicon, LexiconError> {
        let lexicon = self.lexicon;
        let entries: usize = lexicon.buckets.iter().map(LengthBucket::len).sum();

        if entries > 0 && lexicon.max_entry_length == 0 {
            return Err(LexiconError::InvalidState {
                entries,
                max_entry_length: lexicon.max_entry_length,
            });
        }

        debug!(
            rows = self.rows,
            skipped = self.skipped,
            categories = lexicon.categories.len(),
            concepts = lexicon.concepts.len(),
            entries,
            max_entry_length = lexicon.max_entry_length,
            "compiled lexicon"
        );

        Ok(lexicon)
    }
}

impl CompiledLexicon {
    /// Compiles a parsed category table.
    pub fn compile(table: &CategoryTable) -> Result<Self, LexiconError> {
        let mut builder = LexiconBuilder::new(table.category_names().iter().cloned());
        for row in table.rows() {
            builder.add_row(row.as_slice())?;
        }
        builder.build()
    }

    /// Compiles rows given in memory; the first row is the header.
    pub fn from_rows<R, S>(rows: R) -> Result<Self, LexiconError>
    where
        R: IntoIterator,
        R::Item: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut rows = rows.into_iter();
        let header = rows.next().ok_or(LexiconError::MissingHeader)?;
        let mut builder = LexiconBuilder::from_header(header.as_ref());
        for row in rows {
            builder.add_row(row.as_ref())?;
        }
        builder.build()
    }
}
