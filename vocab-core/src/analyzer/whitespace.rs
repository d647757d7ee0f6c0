//! Whitespace word counting.
//!
//! The `WC` metric is independent from the pattern tokenizer: it counts
//! whitespace-separated chunks of the raw text. The path-aware method also
//! splits chunks on `/` so that "and/or" counts as two words, while links
//! and anything containing a dot are kept whole.

use memchr::{memchr, memchr_iter};
use vocab_types::WhitespaceMethod;

#[inline(always)]
fn keeps_slashes(chunk: &str) -> bool {
    chunk.starts_with("http://")
        || chunk.starts_with("https://")
        || memchr(b'.', chunk.as_bytes()).is_some()
}

/// Visits every word of `text` as defined by `method`.
pub fn for_each_word<'t, F>(text: &'t str, method: WhitespaceMethod, mut visit: F)
where
    F: FnMut(&'t str),
{
    for chunk in text.split_whitespace() {
        if method == WhitespaceMethod::Simple || keeps_slashes(chunk) {
            visit(chunk);
            continue;
        }

        let bytes = chunk.as_bytes();
        let mut start = 0;
        for slash in memchr_iter(b'/', bytes) {
            if slash > start {
                visit(&chunk[start..slash]);
            }
            start = slash + 1;
        }
        if start < chunk.len() {
            visit(&chunk[start..]);
        }
    }
}

/// Counts words in `text`.
#[inline]
pub fn word_count(text: &str, method: WhitespaceMethod) -> usize {
    let mut count = 0;
    for_each_word(text, method, |_| count += 1);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(text: &str, method: WhitespaceMethod) -> Vec<&str> {
        let mut out = Vec::new();
        for_each_word(text, method, |w| out.push(w));
        out
    }

    #[test]
    fn simple_splits_on_whitespace_only() {
        assert_eq!(
            words("this and/or that", WhitespaceMethod::Simple),
            ["this", "and/or", "that"]
        );
        assert_eq!(word_count("  a\tb\n\nc  ", WhitespaceMethod::Simple), 3);
    }

    #[test]
    fn path_aware_splits_slashes() {
        assert_eq!(
            words("this and/or that", WhitespaceMethod::PathAware),
            ["this", "and", "or", "that"]
        );
    }

    #[test]
    fn path_aware_drops_empty_pieces() {
        assert_eq!(
            words("/a//b/ //", WhitespaceMethod::PathAware),
            ["a", "b"]
        );
    }

    #[test]
    fn path_aware_keeps_links_and_dotted_chunks() {
        assert_eq!(
            words("see https://x.org/a/b or www.site.com/a", WhitespaceMethod::PathAware),
            ["see", "https://x.org/a/b", "or", "www.site.com/a"]
        );
        assert_eq!(word_count("http://localhost/x", WhitespaceMethod::PathAware), 1);
    }

    #[test]
    fn empty_text() {
        assert_eq!(word_count("", WhitespaceMethod::PathAware), 0);
        assert_eq!(word_count("   ", WhitespaceMethod::Simple), 0);
    }

    #[test]
    fn path_aware_never_fewer_than_simple_without_bare_slashes() {
        let text = "one two/three four/five/six";
        assert_eq!(word_count(text, WhitespaceMethod::Simple), 3);
        assert_eq!(word_count(text, WhitespaceMethod::PathAware), 6);
    }
}
