//! Core type definitions shared by the segmenter, builder and lyric stages.
//!
//! Input records mirror the Suno alignment JSON; output timelines are plain
//! nested vectors so downstream consumers can walk them without this crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One timestamped text fragment from the alignment source.
///
/// Fragments are not guaranteed to be single characters and may carry
/// embedded whitespace or newline sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharRecord {
    /// Fragment text, possibly with trailing boundary markers.
    #[serde(rename = "word")]
    pub text: String,
    /// Start time in seconds.
    #[serde(rename = "start_s")]
    pub start_sec: f64,
    /// End time in seconds.
    #[serde(rename = "end_s")]
    pub end_sec: f64,
    /// Whether the aligner matched this fragment.
    #[serde(default)]
    pub success: bool,
    /// Alignment probability reported by the aligner.
    #[serde(rename = "p_align", default)]
    pub align_prob: f64,
}

impl CharRecord {
    /// Create an aligned record with the given text and timing.
    pub fn new(text: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        Self {
            text: text.into(),
            start_sec,
            end_sec,
            success: true,
            align_prob: 1.0,
        }
    }
}

/// A record after boundary markers have been stripped from its text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedChar {
    /// The record, with boundary markers removed from `text`.
    pub record: CharRecord,
    /// This char terminates a line.
    pub ends_line: bool,
    /// This char is followed by a word-separating space.
    pub ends_with_inline_space: bool,
}

impl AnnotatedChar {
    /// Wrap a record with both boundary flags cleared.
    pub const fn new(record: CharRecord) -> Self {
        Self {
            record,
            ends_line: false,
            ends_with_inline_space: false,
        }
    }
}

/// Innermost accumulator container: the chars of one word.
pub type WordBucket = Vec<AnnotatedChar>;
/// The word buckets of one line.
pub type LineBuckets = Vec<WordBucket>;
/// The lines of one paragraph.
pub type ParagraphBuckets = Vec<LineBuckets>;

/// Unique identifier of a word timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub String);

impl WordId {
    /// Create a new `WordId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for WordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single timed word, the leaf of a [`Timeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimeline {
    /// Unique identifier.
    #[serde(rename = "wordID")]
    pub word_id: WordId,
    /// Start time of the first char, in seconds.
    pub begin: f64,
    /// End time of the last char, in seconds.
    pub end: f64,
    /// Cleaned display text.
    pub text: String,
    /// At least one char of the word ends a line.
    #[serde(rename = "hasNewLine")]
    pub has_new_line: bool,
    /// At least one char of the word is followed by a space.
    #[serde(rename = "hasWhitespace")]
    pub has_whitespace: bool,
}

/// The words of one line.
pub type LineTimeline = Vec<WordTimeline>;
/// The lines of one paragraph.
pub type ParagraphTimeline = Vec<LineTimeline>;
/// Paragraphs of lines of words.
pub type Timeline = Vec<ParagraphTimeline>;

/// How the segmenter provisions word buckets at space boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSplit {
    /// Spaces close the current word and full-width spaces close the current line.
    #[default]
    Space,
    /// Spaces and full-width spaces only flag the char; only newlines open containers.
    Flag,
}

impl WordSplit {
    /// Returns the configuration name of this mode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Flag => "flag",
        }
    }
}

impl fmt::Display for WordSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WordSplit {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "space" => Ok(Self::Space),
            "flag" => Ok(Self::Flag),
            other => Err(crate::error::Error::config(
                format!("unknown word split mode `{other}`"),
                "Use `space` or `flag`",
            )),
        }
    }
}
