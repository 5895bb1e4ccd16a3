//! Word text cleanup: annotation stripping and whitespace normalization.
//!
//! Each bracket style is removed by its own non-greedy pass, so `(a) b (c)`
//! loses both spans but keeps `b`. An unmatched bracket is left as text.
//! Nested brackets of one style end at the first closing bracket.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::annotation::BRACKET_PAIRS;

/// One shortest-match pattern per bracket style, in removal order.
#[allow(clippy::expect_used)]
static RE_ANNOTATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BRACKET_PAIRS
        .iter()
        .map(|&(open, close)| {
            let pattern = format!(
                "{}.*?{}",
                regex::escape(&open.to_string()),
                regex::escape(&close.to_string())
            );
            Regex::new(&pattern).expect("valid regex: RE_ANNOTATIONS")
        })
        .collect()
});

/// Regex matching runs of whitespace other than newlines.
#[allow(clippy::expect_used)]
static RE_INLINE_WS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\S\n]+").expect("valid regex: RE_INLINE_WS")
});

/// Remove every bracketed annotation span, one bracket style at a time.
pub fn strip_annotations(text: &str) -> String {
    RE_ANNOTATIONS
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

/// Collapse each run of non-newline whitespace into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    RE_INLINE_WS.replace_all(text, " ").into_owned()
}

/// Full cleanup applied to a word's concatenated text.
pub fn clean_word_text(text: &str) -> String {
    collapse_whitespace(&strip_annotations(text)).trim().to_string()
}
