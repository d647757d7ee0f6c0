//! Pattern Tokenizer Module
//!
//! Segments raw social-media style text into linguistically meaningful tokens:
//! links, phone numbers, emoticons, markup tags, arrows, mentions, hashtags,
//! e-mail addresses, words with inner apostrophes or hyphens, numbers with
//! separators, ellipses and, as a last resort, single symbols.
//!
//! ## How It Works
//!
//! The scanner walks the text left to right. At every non-whitespace position
//! it tries an ordered list of recognizers and the **first** one that matches
//! there claims the longest span it can; lower-precedence recognizers are never
//! consulted for that position. Precedence, highest first:
//!
//! 1. URL (schemed, or a domain followed by a path)
//! 2. phone number
//! 3. emoticon (either orientation, plus `<3`)
//! 4. HTML-style tag
//! 5. ASCII arrow
//! 6. `@mention`
//! 7. `#hashtag`
//! 8. e-mail address
//! 9. word forms, numbers, ellipsis runs, any single non-space character
//!
//! All recognizers are case-insensitive. Whitespace is never part of a token
//! boundary, so a token is never empty and never whitespace only.
//!
//! ## Case Folding
//!
//! After segmentation every token is lower-cased unless it *starts* with an
//! emoticon: `:D` and `:d` mean different things.
//!
//! ## Usage
//!
//! ```rust
//! use vocab_core::analyzer::tokenizer::Tokenizer;
//!
//! let tokens = Tokenizer::default().tokenize("Sooooo happy :D #blessed");
//! assert_eq!(tokens, ["sooo", "happy", ":D", "#blessed"]);
//! ```

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use vocab_types::AnalyzerConfig;

use crate::analyzer::normalizer::{NormalizerConfig, TextNormalizer};

/// Which recognizer claimed a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// `https://...`, `example.com/path`
    Url = 0,
    /// Loosely grouped digits such as `+1 (555) 123-4567`
    PhoneNumber = 1,
    /// `:)`, `(-:`, `;P`, `<3`
    Emoticon = 2,
    /// `<b>`, `</div>`
    HtmlTag = 3,
    /// `->`, `<--`
    Arrow = 4,
    /// `@name`
    Mention = 5,
    /// `#topic`
    Hashtag = 6,
    /// `user@example.com`
    Email = 7,
    /// Plain words and words with inner apostrophes or hyphens
    Word = 8,
    /// Numbers with an inner separator: `3.14`, `1,000`, `12:30`
    Number = 9,
    /// `...`, `. . .`
    Ellipsis = 10,
    /// Any other single non-whitespace character
    Symbol = 11,
}

const URL_WITH_PATH: &str = r#"(?:https?:(?:/{1,3}|[a-z0-9%])|[a-z0-9.\-]+[.](?:[a-z]{2,13})/)(?:[^\s()<>{}\[\]]+|\([^\s()]*?\([^\s()]+\)[^\s()]*?\)|\([^\s]+?\))+(?:\([^\s()]*?\([^\s()]+\)[^\s()]*?\)|\([^\s]+?\)|[^\s`!()\[\]{};:'".,<>?¬´ª])"#;

const PHONE_NUMBER: &str = r"(?:\+?[01][*\-.)]*)?(?:\(?\d{3}[*\-.)]*)?\d{3}[*\-.)]*\d{4}";

const EMOTICON: &str = r"(?:[<>]?[:;=8][\-o*']?[)\](\[dDpP/:\{\}@|\\]|[)\](\[dDpP/:\{\}@|\\][\-o*']?[:;=8][<>]?|<3)";

const HTML_TAG: &str = r"<[^>\s]+>";

const ARROW: &str = r"-+>|<-+";

const MENTION: &str = r"@\w+";

const HASHTAG: &str = r"#+\w+[\w'\-]*\w+";

const EMAIL: &str = r"[\w.+\-]+@[\w\-]+\.(?:[\w\-]\.?)+[\w\-]";

const INFIX_WORD: &str = r"[^\W\d_](?:[^\W\d_]|['\-_])+[^\W\d_]";

const NUMBER: &str = r"[+\-]?\d+[,/.:\-]\d+[+\-]?";

const WORD: &str = r"\w+";

const ELLIPSIS: &str = r"\.(?:\s*\.)+";

fn anchored(source: &str) -> Regex {
    RegexBuilder::new(&format!("^(?:{source})"))
        .case_insensitive(true)
        .build()
        .expect("built-in token pattern must compile")
}

static RECOGNIZERS: LazyLock<Vec<(TokenKind, Regex)>> = LazyLock::new(|| {
    [
        (TokenKind::Url, URL_WITH_PATH),
        (TokenKind::PhoneNumber, PHONE_NUMBER),
        (TokenKind::Emoticon, EMOTICON),
        (TokenKind::HtmlTag, HTML_TAG),
        (TokenKind::Arrow, ARROW),
        (TokenKind::Mention, MENTION),
        (TokenKind::Hashtag, HASHTAG),
        (TokenKind::Email, EMAIL),
        (TokenKind::Word, INFIX_WORD),
        (TokenKind::Number, NUMBER),
        (TokenKind::Word, WORD),
        (TokenKind::Ellipsis, ELLIPSIS),
    ]
    .into_iter()
    .map(|(kind, source)| (kind, anchored(source)))
    .collect()
});

static EMOTICON_PREFIX: LazyLock<Regex> = LazyLock::new(|| anchored(EMOTICON));

/// Returns `true` if `token` begins with an emoticon.
#[inline]
pub fn is_emoticon(token: &str) -> bool {
    EMOTICON_PREFIX.is_match(token)
}

/// Multi-pattern tokenizer.
///
/// Cheap to copy: the compiled recognizers are process-wide statics shared by
/// every instance, so a `Tokenizer` is safe to use from many threads at once.
///
/// ## Example
///
/// ```
/// use vocab_core::analyzer::tokenizer::{TokenKind, Tokenizer};
///
/// let mut kinds = Vec::new();
/// Tokenizer::default().scan("hi @bob :)", |_, kind| kinds.push(kind));
///
/// assert_eq!(kinds, [TokenKind::Word, TokenKind::Mention, TokenKind::Emoticon]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    normalizer: TextNormalizer,
    preserve_case: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Tokenizer {
    /// Creates a tokenizer.
    ///
    /// `reduce_repeated_chars` cuts runs of any character down to three before
    /// segmentation; `preserve_case` disables lower-casing.
    #[inline]
    pub const fn new(reduce_repeated_chars: bool, preserve_case: bool) -> Self {
        Self {
            normalizer: TextNormalizer::new(NormalizerConfig {
                reduce_repeated_chars,
            }),
            preserve_case,
        }
    }

    /// Creates a tokenizer from analyzer options.
    #[inline]
    pub const fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.reduce_repeated_chars, config.preserve_case)
    }

    /// Tokenizes `text`: reduces character runs, segments and case-folds.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(text);
        let mut tokens = Vec::with_capacity(normalized.len() / 4);

        self.scan(&normalized, |token, _| {
            tokens.push(self.fold(token));
        });

        tokens
    }

    #[inline]
    fn fold(&self, token: &str) -> String {
        if self.preserve_case || is_emoticon(token) {
            token.to_owned()
        } else {
            token.to_lowercase()
        }
    }

    /// Segments already-normalized text and emits `(token, kind)` in order.
    ///
    /// Tokens are slices of `text`; no case folding is applied.
    pub fn scan<'t, F>(&self, text: &'t str, mut emit: F)
    where
        F: FnMut(&'t str, TokenKind),
    {
        let recognizers = &*RECOGNIZERS;
        let mut pos = 0usize;

        while let Some(ch) = text[pos..].chars().next() {
            if ch.is_whitespace() {
                pos += ch.len_utf8();
                continue;
            }

            let rest = &text[pos..];
            let (kind, len) = recognizers
                .iter()
                .find_map(|(kind, re)| {
                    re.find(rest)
                        .map(|m| m.end())
                        .filter(|&len| len > 0)
                        .map(|len| (*kind, len))
                })
                .unwrap_or((TokenKind::Symbol, ch.len_utf8()));

            emit(&rest[..len], kind);
            pos += len;
        }
    }
}

/// Tokenizes with default options (run reduction on, case folding on).
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}
