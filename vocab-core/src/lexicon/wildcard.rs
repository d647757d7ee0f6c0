//! Wildcard surface forms.
//!
//! `*` stands for any run of characters, including none. Trailing stars are
//! the common case ("happ*") and compile to a plain prefix test; forms with an
//! inner star compile to a regex anchored at the start of the phrase only, so
//! `sad*ness` matches any phrase that starts with `sad` and contains `ness`
//! somewhere after it.

use regex::Regex;

/// A compiled wildcard form.
#[derive(Debug, Clone)]
pub enum WildcardPattern {
    /// Phrase must start with this text.
    Prefix(Box<str>),
    /// Start-anchored regex for forms with an inner `*`.
    Glob(Regex),
}

impl WildcardPattern {
    /// Compiles a lower-cased form containing at least one `*`.
    pub fn compile(form: &str) -> Result<Self, regex::Error> {
        let stem = form.trim_end_matches('*');
        if !stem.contains('*') {
            return Ok(WildcardPattern::Prefix(stem.into()));
        }

        let mut source = String::with_capacity(stem.len() + 8);
        source.push('^');
        for (i, piece) in stem.split('*').enumerate() {
            if i > 0 {
                source.push_str(".*");
            }
            source.push_str(&regex::escape(piece));
        }
        Regex::new(&source).map(WildcardPattern::Glob)
    }

    /// Tests a space-joined phrase against the pattern.
    #[inline]
    pub fn matches(&self, phrase: &str) -> bool {
        match self {
            WildcardPattern::Prefix(prefix) => phrase.starts_with(&**prefix),
            WildcardPattern::Glob(re) => re.is_match(phrase),
        }
    }
}
