//! Lyrics processing: alignment fragments to paragraph/line/word timelines.
//!
//! - `segmenter`: boundary detection and bucket building
//! - `cleanup`: annotation stripping and whitespace rules
//! - `builder`: word/line/paragraph timeline assembly
//! - `parser`: the end-to-end `SunoParser`

pub mod builder;
pub mod cleanup;
pub mod parser;
pub mod segmenter;

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::CharRecord;

pub use builder::{build, TimelineBuilder};
pub use parser::SunoParser;
pub use segmenter::{segment, Segmenter};

/// Read a Suno alignment file (a JSON array of character records).
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<CharRecord>> {
    let path = path.as_ref();
    let raw = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let records: Vec<CharRecord> = serde_json::from_str(&raw)
        .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?;
    tracing::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
