//! Application constants.
//!
//! Centralizes boundary markers, annotation brackets and configuration keys.

/// Boundary markers found at the end of alignment fragments.
pub mod boundary {
    /// Double newline closing a paragraph.
    pub const PARAGRAPH: &str = "\n\n";

    /// Single newline closing a line.
    pub const LINE: char = '\n';

    /// Full-width (ideographic) space, treated as a visual line break.
    pub const FULL_WIDTH_SPACE: char = '\u{3000}';

    /// Plain space closing a word.
    pub const WORD: char = ' ';
}

/// Annotation bracket pairs stripped from word text, in removal order.
pub mod annotation {
    /// Opening and closing delimiters of each annotation style.
    pub const BRACKET_PAIRS: &[(char, char)] = &[
        ('【', '】'),
        ('[', ']'),
        ('(', ')'),
        ('（', '）'),
    ];
}

/// Environment variable names read by [`crate::config::Config::load`].
pub mod env {
    /// Playback offset in seconds handed to the lyric initializer.
    pub const OFFSET_SEC: &str = "LYRICFLOW_OFFSET_SEC";

    /// Placeholder duration handed to the lyric initializer.
    pub const DURATION: &str = "LYRICFLOW_DURATION";

    /// Word-bucket provisioning mode (`space` or `flag`).
    pub const WORD_SPLIT: &str = "LYRICFLOW_WORD_SPLIT";

    /// Keep words whose cleaned text is empty.
    pub const KEEP_BLANK_WORDS: &str = "LYRICFLOW_KEEP_BLANK_WORDS";
}

/// Default configuration values.
pub mod defaults {
    /// Default playback offset.
    pub const OFFSET_SEC: f64 = 0.0;

    /// Duration supplied to the lyric initializer; the converter never measures audio.
    pub const DURATION: f64 = 0.0;
}
