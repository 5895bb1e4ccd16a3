//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::str::FromStr;

use crate::constants::{defaults, env as keys};
use crate::error::Result;
use crate::types::WordSplit;

/// Configuration for the converter.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Offset in seconds applied to every word by the lyric initializer
    pub offset_sec: f64,
    /// Duration handed to the lyric initializer
    pub duration: f64,
    /// Word-bucket provisioning mode
    pub word_split: WordSplit,
    /// Keep words whose cleaned text is empty
    pub keep_blank_words: bool,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            offset_sec: defaults::OFFSET_SEC,
            duration: defaults::DURATION,
            word_split: WordSplit::default(),
            keep_blank_words: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Values that fail to parse are logged and left at their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(offset) = parse_var::<f64>(&lookup, keys::OFFSET_SEC) {
            config.offset_sec = offset;
        }

        if let Some(duration) = parse_var::<f64>(&lookup, keys::DURATION) {
            config.duration = duration;
        }

        if let Some(mode) = parse_var::<WordSplit>(&lookup, keys::WORD_SPLIT) {
            config.word_split = mode;
        }

        if let Some(keep) = parse_var::<bool>(&lookup, keys::KEEP_BLANK_WORDS) {
            config.keep_blank_words = keep;
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
