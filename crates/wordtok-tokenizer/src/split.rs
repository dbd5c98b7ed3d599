//! Rule-based text splitting
//!
//! Text is cut at punctuation, the `--` dash, and whitespace. The separators
//! themselves are kept as tokens, so `"Hello, world."` splits into
//! `["Hello", ",", "world", "."]`.

use regex::Regex;
use std::sync::LazyLock;

/// Separator pattern
///
/// Matches a single punctuation mark, the two-character `--` sequence, or one
/// whitespace character. Every match becomes its own piece in [`split_raw`].
///
/// Whitespace is Unicode `White_Space` plus the information separators
/// U+001C..=U+001F.
pub const SPLIT_PATTERN: &str = r#"[,.:;?_!"()']|--|[\s\x1C-\x1F]"#;

static SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SPLIT_PATTERN).expect("split pattern is a valid regex"));

/// Split text into pieces, keeping separators
///
/// Produces the interleaved sequence `span, sep, span, sep, ..., span`. Spans
/// between adjacent separators are empty strings, and whitespace separators
/// are kept verbatim. Use [`split_and_clean`] to get the actual tokens.
///
/// # Example
/// ```
/// use wordtok_tokenizer::split::split_raw;
///
/// assert_eq!(split_raw("a, b"), vec!["a", ",", "", " ", "b"]);
/// ```
pub fn split_raw(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for m in SPLIT_RE.find_iter(text) {
        pieces.push(&text[last..m.start()]);
        pieces.push(m.as_str());
        last = m.end();
    }
    pieces.push(&text[last..]);

    pieces
}

/// Whitespace as matched by [`SPLIT_PATTERN`]
fn is_split_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Split text into tokens
///
/// Applies [`split_raw`], trims whitespace (in the [`SPLIT_PATTERN`] sense)
/// from every piece, and drops pieces that are empty after trimming. Pure whitespace separators disappear; punctuation stays.
///
/// # Example
/// ```
/// use wordtok_tokenizer::split::split_and_clean;
///
/// let tokens = split_and_clean("Hello, world. Is this-- a test?");
/// assert_eq!(
///     tokens,
///     vec!["Hello", ",", "world", ".", "Is", "this", "--", "a", "test", "?"]
/// );
/// ```
pub fn split_and_clean(text: &str) -> Vec<String> {
    split_raw(text)
        .into_iter()
        .map(|piece| piece.trim_matches(is_split_whitespace))
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
