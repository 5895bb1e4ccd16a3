//! Suno alignment parser.
//!
//! Glues the segmenter and timeline builder together and hands the result to
//! the lyric initializer along with the configured tokenizers and offset.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::id::{IdGenerator, UuidIdGen};
use crate::lyric::{Lyric, LyricCreateArgs, Tokenizer};
use crate::lyrics::builder::TimelineBuilder;
use crate::lyrics::segmenter::Segmenter;
use crate::types::{CharRecord, Timeline};

/// Converts Suno character alignments into an initialized [`Lyric`].
pub struct SunoParser {
    config: Config,
    line_tokenizer: Option<Arc<dyn Tokenizer>>,
    paragraph_tokenizer: Option<Arc<dyn Tokenizer>>,
    ids: Box<dyn IdGenerator>,
}

impl Default for SunoParser {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SunoParser {
    /// Create a parser with UUID word IDs and no tokenizers.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            line_tokenizer: None,
            paragraph_tokenizer: None,
            ids: Box::new(UuidIdGen),
        }
    }

    /// Tokenize every line during initialization.
    #[must_use]
    pub fn with_line_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.line_tokenizer = Some(tokenizer);
        self
    }

    /// Tokenize every paragraph during initialization.
    #[must_use]
    pub fn with_paragraph_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.paragraph_tokenizer = Some(tokenizer);
        self
    }

    /// Replace the word ID source.
    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Override the playback offset from the configuration.
    #[must_use]
    pub fn with_offset_sec(mut self, offset_sec: f64) -> Self {
        self.config.offset_sec = offset_sec;
        self
    }

    /// The configuration in use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Segment and build, without initializing a lyric.
    pub fn convert(&mut self, records: &[CharRecord]) -> Timeline {
        let paragraphs = Segmenter::new(self.config.word_split).segment(records);
        TimelineBuilder::new(self.ids.as_mut())
            .keep_blank_words(self.config.keep_blank_words)
            .build(&paragraphs)
    }

    /// Convert `records` and initialize a lyric for `resource_id`.
    pub async fn parse(&mut self, records: &[CharRecord], resource_id: &str) -> Result<Lyric> {
        let timelines = self.convert(records);
        tracing::info!(
            "Parsed {} records into {} paragraphs for {resource_id}",
            records.len(),
            timelines.len()
        );

        Lyric::init(LyricCreateArgs {
            resource_id: resource_id.to_string(),
            duration: self.config.duration,
            offset_sec: self.config.offset_sec,
            timelines,
            line_tokenizer: self.line_tokenizer.as_ref().map(Arc::clone),
            paragraph_tokenizer: self.paragraph_tokenizer.as_ref().map(Arc::clone),
        })
        .await
    }
}
