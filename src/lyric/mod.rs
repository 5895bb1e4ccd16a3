//! Lyric initialization from a built timeline.
//!
//! This is the hand-off point for converted timelines: it applies the
//! playback offset, derives line text and runs any injected tokenizers.

pub mod tokenizer;

use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{LineTimeline, Timeline, WordTimeline};

pub use tokenizer::{Tokenizer, WhitespaceTokenizer};

/// Everything the lyric initializer needs.
#[derive(Clone)]
pub struct LyricCreateArgs {
    /// Opaque identifier of the song/resource, passed through unchanged.
    pub resource_id: String,
    /// Duration in seconds; supplied by the caller, never computed.
    pub duration: f64,
    /// Offset in seconds added to every word's begin and end.
    pub offset_sec: f64,
    /// Paragraphs of lines of words.
    pub timelines: Timeline,
    /// Tokenizer run over each line's text.
    pub line_tokenizer: Option<Arc<dyn Tokenizer>>,
    /// Tokenizer run over each paragraph's text.
    pub paragraph_tokenizer: Option<Arc<dyn Tokenizer>>,
}

/// One line of an initialized lyric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricLine {
    /// Display text of the line.
    pub text: String,
    /// Timed words of the line.
    pub words: LineTimeline,
    /// Line tokens, when a line tokenizer was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
}

/// One paragraph of an initialized lyric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricParagraph {
    /// Lines of the paragraph, empty lines included.
    pub lines: Vec<LyricLine>,
    /// Paragraph tokens, when a paragraph tokenizer was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
}

impl LyricParagraph {
    /// Line texts joined by newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A fully initialized lyric ready for playback highlighting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lyric {
    #[serde(rename = "resourceID")]
    resource_id: String,
    duration: f64,
    offset_sec: f64,
    paragraphs: Vec<LyricParagraph>,
}

impl Lyric {
    /// Initialize a lyric, running tokenizers over every line and paragraph.
    pub async fn init(args: LyricCreateArgs) -> Result<Self> {
        let LyricCreateArgs {
            resource_id,
            duration,
            offset_sec,
            mut timelines,
            line_tokenizer,
            paragraph_tokenizer,
        } = args;

        apply_offset(&mut timelines, offset_sec);

        let line_texts: Vec<Vec<String>> = timelines
            .iter()
            .map(|p| p.iter().map(|l| line_text(l)).collect())
            .collect();
        let paragraph_texts: Vec<String> = line_texts.iter().map(|lines| lines.join("\n")).collect();

        let mut line_tokens = match &line_tokenizer {
            Some(t) => Some(tokenize_all(t.as_ref(), line_texts.iter().flatten()).await?.into_iter()),
            None => None,
        };
        let mut paragraph_tokens = match &paragraph_tokenizer {
            Some(t) => Some(tokenize_all(t.as_ref(), paragraph_texts.iter()).await?.into_iter()),
            None => None,
        };

        let mut paragraphs = Vec::with_capacity(timelines.len());
        for (lines, texts) in timelines.into_iter().zip(line_texts) {
            let mut built = Vec::with_capacity(lines.len());
            for (words, text) in lines.into_iter().zip(texts) {
                built.push(LyricLine {
                    text,
                    words,
                    tokens: line_tokens.as_mut().and_then(Iterator::next),
                });
            }
            paragraphs.push(LyricParagraph {
                lines: built,
                tokens: paragraph_tokens.as_mut().and_then(Iterator::next),
            });
        }

        Ok(Self {
            resource_id,
            duration,
            offset_sec,
            paragraphs,
        })
    }

    /// The resource identifier passed in at creation.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// The caller-supplied duration.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// The offset applied to every word.
    pub const fn offset_sec(&self) -> f64 {
        self.offset_sec
    }

    /// Paragraphs with line text and tokens.
    pub fn paragraphs(&self) -> &[LyricParagraph] {
        &self.paragraphs
    }

    /// The offset-adjusted timeline as plain nested vectors.
    pub fn timelines(&self) -> Timeline {
        self.paragraphs
            .iter()
            .map(|p| p.lines.iter().map(|l| l.words.clone()).collect())
            .collect()
    }

    /// All words in reading order.
    pub fn words(&self) -> impl Iterator<Item = &WordTimeline> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.lines.iter())
            .flat_map(|l| l.words.iter())
    }

    /// Text of every line in reading order.
    pub fn line_texts(&self) -> Vec<&str> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.lines.iter())
            .map(|l| l.text.as_str())
            .collect()
    }
}

fn apply_offset(timelines: &mut Timeline, offset_sec: f64) {
    for word in timelines.iter_mut().flatten().flatten() {
        word.begin += offset_sec;
        word.end += offset_sec;
    }
}

/// Join a line's words, separating words that were followed by a space.
fn line_text(words: &[WordTimeline]) -> String {
    let mut text = String::new();
    for (i, word) in words.iter().enumerate() {
        text.push_str(&word.text);
        if word.has_whitespace && i + 1 < words.len() {
            text.push(' ');
        }
    }
    text
}

async fn tokenize_all<'a>(
    tokenizer: &dyn Tokenizer,
    texts: impl Iterator<Item = &'a String>,
) -> Result<Vec<Vec<String>>> {
    let name = tokenizer.name();
    let tokens = try_join_all(texts.map(|text| tokenizer.tokenize(text)))
        .await
        .map_err(|e| match e {
            Error::Tokenizer(_) => e,
            other => Error::tokenizer(format!("{name}: {other}")),
        })?;
    tracing::debug!("Tokenizer {name} produced tokens for {} texts", tokens.len());
    Ok(tokens)
}
