//! `LyricFlow` - Suno alignment to karaoke lyric timeline converter.
//!
//! Turns a flat stream of time-aligned text fragments into paragraphs of
//! lines of words, each with begin/end times and cleaned display text.

pub mod config;
pub mod constants;
pub mod error;
pub mod id;
pub mod lyric;
pub mod lyrics;
pub mod types;

pub use error::{Error, Result};
pub use id::{IdGenerator, SequentialIdGen, UuidIdGen};
pub use lyric::{Lyric, LyricCreateArgs, Tokenizer, WhitespaceTokenizer};
pub use lyrics::SunoParser;
pub use types::{AnnotatedChar, CharRecord, Timeline, WordId, WordSplit, WordTimeline};
