//! Pre-tokenization text normalization.
//!
//! Elongated writing ("soooooo", "!!!!!!!", "------") is common in social
//! media text and would otherwise produce an unbounded number of distinct
//! token types. Before segmentation every run of identical characters longer
//! than [`MAX_RUN`] is cut down to exactly [`MAX_RUN`] characters:
//!
//! - with `reduce_repeated_chars` enabled, runs of *any* character are cut;
//! - runs of characters outside `[A-Za-z0-9]` are always cut, so long dash or
//!   underscore rulers never reach the tokenizer intact.
//!
//! The pass works on the whole text, not per token, and is linear in the
//! input length.

use std::borrow::Cow;

/// Longest run of one repeated character that survives normalization.
pub const MAX_RUN: usize = 3;

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// When enabled, runs of letters and digits are reduced as well.
    pub reduce_repeated_chars: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            reduce_repeated_chars: true,
        }
    }
}

/// Collapses over-long character runs.
///
/// # Examples
///
/// ```
/// use vocab_core::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("sooooo good"), "sooo good");
///
/// let keep_letters = TextNormalizer::new(NormalizerConfig { reduce_repeated_chars: false });
/// assert_eq!(keep_letters.normalize("sooooo!!!!!"), "sooooo!!!");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    #[inline]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    fn reducible(&self, ch: char) -> bool {
        self.config.reduce_repeated_chars || !ch.is_ascii_alphanumeric()
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let mut prev = None;
        let mut run = 0usize;

        for ch in input.chars() {
            if prev == Some(ch) {
                run += 1;
            } else {
                prev = Some(ch);
                run = 1;
            }

            if run > MAX_RUN && self.reducible(ch) {
                continue;
            }
            out.push(ch);
        }
    }

    /// Normalizes text, borrowing the input when nothing needs to change.
    pub fn normalize<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if !self.needs_reduction(input) {
            return Cow::Borrowed(input);
        }
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        Cow::Owned(out)
    }

    /// Returns `true` if `input` contains a run this normalizer would cut.
    pub fn needs_reduction(&self, input: &str) -> bool {
        let mut prev = None;
        let mut run = 0usize;

        for ch in input.chars() {
            if prev == Some(ch) {
                run += 1;
                if run > MAX_RUN && self.reducible(ch) {
                    return true;
                }
            } else {
                prev = Some(ch);
                run = 1;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        TextNormalizer::default().normalize(input).into_owned()
    }

    fn norm_keep_letters(input: &str) -> String {
        TextNormalizer::new(NormalizerConfig {
            reduce_repeated_chars: false,
        })
        .normalize(input)
        .into_owned()
    }

    #[test]
    fn letter_runs_reduced_to_three() {
        assert_eq!(norm("sooooo"), "sooo");
        assert_eq!(norm("goooood"), "goood");
        assert_eq!(norm("aaaa"), "aaa");
    }

    #[test]
    fn runs_of_three_untouched() {
        assert_eq!(norm("sooo"), "sooo");
        assert_eq!(norm("..."), "...");
        assert_eq!(norm("cool"), "cool");
    }

    #[test]
    fn punctuation_runs_reduced() {
        assert_eq!(norm("wow!!!!!!"), "wow!!!");
        assert_eq!(norm("----------"), "---");
        assert_eq!(norm("a______b"), "a___b");
    }

    #[test]
    fn newline_runs_reduced() {
        assert_eq!(norm("a\n\n\n\n\nb"), "a\n\n\nb");
        assert_eq!(norm_keep_letters("a\n\n\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn disabled_keeps_alphanumeric_runs() {
        assert_eq!(norm_keep_letters("sooooo"), "sooooo");
        assert_eq!(norm_keep_letters("1111111"), "1111111");
        assert_eq!(norm_keep_letters("wow!!!!!!"), "wow!!!");
    }

    #[test]
    fn disabled_still_reduces_non_ascii_letters() {
        // Only [A-Za-z0-9] is exempt from the guard pass.
        assert_eq!(norm_keep_letters("éééééé"), "ééé");
    }

    #[test]
    fn mixed_runs_counted_independently() {
        assert_eq!(norm("aaaabbbbb"), "aaabbb");
        assert_eq!(norm("abababab"), "abababab");
    }

    #[test]
    fn run_is_case_sensitive() {
        assert_eq!(norm("aAaAaA"), "aAaAaA");
        assert_eq!(norm("AAAAaaaa"), "AAAaaa");
    }

    #[test]
    fn unicode_runs() {
        assert_eq!(norm("😂😂😂😂😂"), "😂😂😂");
        assert_eq!(norm("ñññññ"), "ñññ");
    }

    #[test]
    fn empty_input() {
        assert_eq!(norm(""), "");
    }

    #[test]
    fn borrows_when_unchanged() {
        let n = TextNormalizer::default();
        assert!(matches!(n.normalize("nothing to do"), Cow::Borrowed(_)));
        assert!(matches!(n.normalize("nooooo"), Cow::Owned(_)));
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let normalizer = TextNormalizer::default();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        normalizer.normalize_into("heyyyyy", &mut buf);
        assert_eq!(buf, "heyyy");
        assert_eq!(buf.capacity(), cap);

        normalizer.normalize_into("ok", &mut buf);
        assert_eq!(buf, "ok");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn idempotent() {
        let n = TextNormalizer::default();
        for s in ["sooooo", "!!!!!!!!", "a\n\n\n\n\n", "plain text"] {
            let once = n.normalize(s).into_owned();
            let twice = n.normalize(&once).into_owned();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn needs_reduction_matches_normalize() {
        let n = TextNormalizer::default();
        for s in ["abc", "aaaa", "a...b", "a....b", ""] {
            assert_eq!(n.needs_reduction(s), n.normalize(s) != s);
        }
    }
}
