//! Single-pass segmentation of alignment fragments into paragraphs, lines and words.
//!
//! Structure is recovered purely from boundary markers at the end of each
//! fragment's text. A char is always appended to the word bucket that was
//! current when its record arrived; a container opened by its boundary becomes
//! current for the next record. Containers are only opened when a next record
//! exists, so trailing markers never leave an empty trailing line or paragraph.
//!
//! A plain space does not open a word while an annotation bracket is still
//! open on the current line, so a spaced label such as `[Verse 1]` lands in
//! one bucket and is removed whole by cleanup.

use crate::constants::annotation::BRACKET_PAIRS;
use crate::constants::boundary;
use crate::types::{AnnotatedChar, CharRecord, ParagraphBuckets, WordSplit};

/// Trailing boundary marker detected on a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// `\n\n`: the fragment closes a paragraph.
    Paragraph,
    /// `\n`: the fragment closes a line.
    Line,
    /// Ideographic space: the fragment closes a visual line.
    FullWidthSpace,
    /// Plain space: the fragment closes a word.
    Space,
}

impl Boundary {
    /// Classify the trailing marker of `text`.
    ///
    /// Checked in order paragraph, line, full-width space, space; only the first match applies.
    pub fn detect(text: &str) -> Option<Self> {
        if text.ends_with(boundary::PARAGRAPH) {
            Some(Self::Paragraph)
        } else if text.ends_with(boundary::LINE) {
            Some(Self::Line)
        } else if text.ends_with(boundary::FULL_WIDTH_SPACE) {
            Some(Self::FullWidthSpace)
        } else if text.ends_with(boundary::WORD) {
            Some(Self::Space)
        } else {
            None
        }
    }

    fn strip<'a>(self, text: &'a str) -> &'a str {
        let stripped = match self {
            Self::Paragraph => text.strip_suffix(boundary::PARAGRAPH),
            Self::Line => text.strip_suffix(boundary::LINE),
            Self::FullWidthSpace => text.strip_suffix(boundary::FULL_WIDTH_SPACE),
            Self::Space => text.strip_suffix(boundary::WORD),
        };
        stripped.unwrap_or(text)
    }
}

/// Strip boundary markers from one record and flag the resulting char.
///
/// Leading whitespace is trimmed unless the fragment is nothing but
/// whitespace, in which case it is kept so its trailing marker still counts.
pub fn annotate(record: &CharRecord) -> (AnnotatedChar, Option<Boundary>) {
    let mut text = record.text.as_str();

    let trimmed = text.trim_start();
    if !trimmed.is_empty() {
        text = trimmed;
    }

    // stray leading breaks never open a container
    if text.starts_with(boundary::LINE) {
        text = text.trim_start_matches(boundary::LINE);
    }

    let found = Boundary::detect(text);
    let text = found.map_or(text, |b| b.strip(text)).to_string();

    let mut annotated = AnnotatedChar::new(CharRecord {
        text,
        ..record.clone()
    });
    match found {
        Some(Boundary::Line | Boundary::FullWidthSpace) => annotated.ends_line = true,
        Some(Boundary::Space) => annotated.ends_with_inline_space = true,
        Some(Boundary::Paragraph) | None => {}
    }

    (annotated, found)
}

/// Open annotation spans on the current line, one slot per bracket style.
#[derive(Debug, Default)]
struct OpenBrackets([bool; BRACKET_PAIRS.len()]);

impl OpenBrackets {
    /// Track opening and closing brackets in `text`.
    ///
    /// A closing bracket ends the span at its first occurrence, the same way
    /// cleanup's shortest-match removal does.
    fn scan(&mut self, text: &str) {
        for ch in text.chars() {
            for (open, &(start, end)) in self.0.iter_mut().zip(BRACKET_PAIRS) {
                if ch == start {
                    *open = true;
                } else if ch == end {
                    *open = false;
                }
            }
        }
    }

    fn any(&self) -> bool {
        self.0.iter().any(|&open| open)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Open accumulator tree with explicit cursors on the current containers.
#[derive(Debug)]
struct Accumulator {
    paragraphs: Vec<ParagraphBuckets>,
    paragraph: usize,
    line: usize,
    word: usize,
    brackets: OpenBrackets,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            paragraphs: vec![vec![vec![Vec::new()]]],
            paragraph: 0,
            line: 0,
            word: 0,
            brackets: OpenBrackets::default(),
        }
    }

    fn push(&mut self, c: AnnotatedChar) {
        self.brackets.scan(&c.record.text);
        self.paragraphs[self.paragraph][self.line][self.word].push(c);
    }

    /// Whether an annotation span is still open on the current line.
    fn in_annotation(&self) -> bool {
        self.brackets.any()
    }

    fn open_word(&mut self) {
        let line = &mut self.paragraphs[self.paragraph][self.line];
        line.push(Vec::new());
        self.word = line.len() - 1;
    }

    fn open_line(&mut self) {
        let paragraph = &mut self.paragraphs[self.paragraph];
        paragraph.push(vec![Vec::new()]);
        self.line = paragraph.len() - 1;
        self.word = 0;
        self.brackets.clear();
    }

    fn open_paragraph(&mut self) {
        self.paragraphs.push(vec![vec![Vec::new()]]);
        self.paragraph = self.paragraphs.len() - 1;
        self.line = 0;
        self.word = 0;
        self.brackets.clear();
    }

    fn finish(self) -> Vec<ParagraphBuckets> {
        self.paragraphs
    }
}

/// Turns a flat record stream into nested paragraph/line/word buckets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    split: WordSplit,
}

impl Segmenter {
    /// Create a segmenter with the given word-bucket provisioning mode.
    pub const fn new(split: WordSplit) -> Self {
        Self { split }
    }

    /// Segment `records` in a single forward pass.
    ///
    /// Empty input yields one paragraph holding one line with one empty word.
    pub fn segment(&self, records: &[CharRecord]) -> Vec<ParagraphBuckets> {
        let mut acc = Accumulator::new();

        for (i, record) in records.iter().enumerate() {
            let has_next = i + 1 < records.len();
            let (annotated, found) = annotate(record);
            acc.push(annotated);

            if !has_next {
                continue;
            }
            match (found, self.split) {
                (Some(Boundary::Paragraph), _) => acc.open_paragraph(),
                (Some(Boundary::Line), _) | (Some(Boundary::FullWidthSpace), WordSplit::Space) => {
                    acc.open_line();
                }
                (Some(Boundary::Space), WordSplit::Space) if !acc.in_annotation() => {
                    acc.open_word();
                }
                _ => {}
            }
        }

        let paragraphs = acc.finish();
        tracing::debug!(
            "Segmented {} records into {} paragraphs ({} mode)",
            records.len(),
            paragraphs.len(),
            self.split
        );
        paragraphs
    }
}

/// Segment with the default word-bucket provisioning mode.
pub fn segment(records: &[CharRecord]) -> Vec<ParagraphBuckets> {
    Segmenter::default().segment(records)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn rec(text: &str, start: f64, end: f64) -> CharRecord {
        CharRecord::new(text, start, end)
    }

    fn texts(paragraphs: &[ParagraphBuckets]) -> Vec<Vec<Vec<Vec<&str>>>> {
        paragraphs
            .iter()
            .map(|p| {
                p.iter()
                    .map(|l| {
                        l.iter()
                            .map(|w| w.iter().map(|c| c.record.text.as_str()).collect())
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_detect_order() {
        assert_eq!(Boundary::detect("a\n\n"), Some(Boundary::Paragraph));
        assert_eq!(Boundary::detect("a\n"), Some(Boundary::Line));
        assert_eq!(Boundary::detect("a\u{3000}"), Some(Boundary::FullWidthSpace));
        assert_eq!(Boundary::detect("a "), Some(Boundary::Space));
        assert_eq!(Boundary::detect("a"), None);
        assert_eq!(Boundary::detect(" \n"), Some(Boundary::Line));
    }

    #[test]
    fn test_annotate_strips_markers_and_flags() {
        let (c, b) = annotate(&rec("love\n", 0.0, 1.0));
        assert_eq!(c.record.text, "love");
        assert!(c.ends_line);
        assert!(!c.ends_with_inline_space);
        assert_eq!(b, Some(Boundary::Line));

        let (c, b) = annotate(&rec("you ", 0.0, 1.0));
        assert_eq!(c.record.text, "you");
        assert!(c.ends_with_inline_space);
        assert_eq!(b, Some(Boundary::Space));

        let (c, b) = annotate(&rec("end\n\n", 0.0, 1.0));
        assert_eq!(c.record.text, "end");
        assert!(!c.ends_line);
        assert_eq!(b, Some(Boundary::Paragraph));

        let (c, _) = annotate(&rec("夜\u{3000}", 0.0, 1.0));
        assert_eq!(c.record.text, "夜");
        assert!(c.ends_line);
    }

    #[test]
    fn test_annotate_trims_leading_whitespace() {
        let (c, b) = annotate(&rec("  there", 1.0, 2.0));
        assert_eq!(c.record.text, "there");
        assert_eq!(b, None);

        let (c, _) = annotate(&rec("\nHello", 1.0, 2.0));
        assert_eq!(c.record.text, "Hello");
    }

    #[test]
    fn test_whitespace_only_fragments() {
        let (c, b) = annotate(&rec(" ", 1.0, 1.0));
        assert_eq!(c.record.text, "");
        assert!(c.ends_with_inline_space);
        assert_eq!(b, Some(Boundary::Space));

        // a lone newline is a stray leading break and carries no boundary
        let (c, b) = annotate(&rec("\n", 1.0, 1.0));
        assert_eq!(c.record.text, "");
        assert!(!c.ends_line);
        assert_eq!(b, None);

        let (c, b) = annotate(&rec("\n\n", 1.0, 1.0));
        assert_eq!(c.record.text, "");
        assert_eq!(b, None);
    }

    #[test]
    fn test_annotate_keeps_timing_and_alignment() {
        let record = CharRecord {
            text: "la ".to_string(),
            start_sec: 3.0,
            end_sec: 2.5,
            success: false,
            align_prob: 0.12,
        };
        let (c, _) = annotate(&record);
        assert!((c.record.start_sec - 3.0).abs() < f64::EPSILON);
        assert!((c.record.end_sec - 2.5).abs() < f64::EPSILON);
        assert!(!c.record.success);
        assert!((c.record.align_prob - 0.12).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input() {
        let paragraphs = segment(&[]);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].len(), 1);
        assert_eq!(paragraphs[0][0].len(), 1);
        assert!(paragraphs[0][0][0].is_empty());
    }

    #[test]
    fn test_space_mode_opens_words_lines_and_paragraphs() {
        let records = [
            rec("Hel", 0.0, 0.5),
            rec("lo ", 0.5, 1.0),
            rec("world\n", 1.0, 2.0),
            rec("again\n\n", 2.0, 3.0),
            rec("Bye", 3.0, 4.0),
        ];
        let paragraphs = Segmenter::new(WordSplit::Space).segment(&records);
        assert_eq!(
            texts(&paragraphs),
            vec![
                vec![vec![vec!["Hel", "lo"], vec!["world"]], vec![vec!["again"]]],
                vec![vec![vec!["Bye"]]],
            ]
        );
    }

    #[test]
    fn test_flag_mode_only_newlines_open_containers() {
        let records = [
            rec("Hi", 0.0, 1.0),
            rec(" ", 1.0, 1.0),
            rec("there\u{3000}", 1.0, 2.0),
            rec("you\n", 2.0, 3.0),
            rec("Bye", 3.0, 4.0),
        ];
        let paragraphs = Segmenter::new(WordSplit::Flag).segment(&records);
        assert_eq!(
            texts(&paragraphs),
            vec![vec![vec![vec!["Hi", "", "there", "you"]], vec![vec!["Bye"]]]]
        );
        assert!(paragraphs[0][0][0][1].ends_with_inline_space);
        assert!(paragraphs[0][0][0][2].ends_line);
    }

    #[test]
    fn test_full_width_space_opens_line_in_space_mode() {
        let records = [rec("夜\u{3000}", 0.0, 1.0), rec("空", 1.0, 2.0)];
        let paragraphs = segment(&records);
        assert_eq!(texts(&paragraphs), vec![vec![vec![vec!["夜"]], vec![vec!["空"]]]]);
    }

    #[test]
    fn test_trailing_markers_open_nothing() {
        for tail in ["end\n\n", "end\n", "end ", "end\u{3000}"] {
            let records = [rec("the ", 0.0, 1.0), rec(tail, 1.0, 2.0)];
            let paragraphs = segment(&records);
            assert_eq!(paragraphs.len(), 1, "tail {tail:?}");
            assert_eq!(paragraphs[0].len(), 1, "tail {tail:?}");
            assert_eq!(paragraphs[0][0].len(), 2, "tail {tail:?}");
        }
    }

    #[test]
    fn test_paragraph_count_follows_double_newlines() {
        let records = [
            rec("one\n\n", 0.0, 1.0),
            rec("two\n\n", 1.0, 2.0),
            rec("three\n\n", 2.0, 3.0),
            rec("four", 3.0, 4.0),
        ];
        assert_eq!(segment(&records).len(), 4);
    }

    #[test]
    fn test_annotations_survive_segmentation() {
        let records = [rec("[Verse]\n", 0.0, 0.0), rec("Hello", 0.0, 1.0)];
        let paragraphs = segment(&records);
        assert_eq!(texts(&paragraphs), vec![vec![vec![vec!["[Verse]"]], vec![vec!["Hello"]]]]);
    }

    #[test]
    fn test_spaced_annotation_stays_in_one_word() {
        let records = [
            rec("[Verse ", 0.0, 0.1),
            rec("1]\n", 0.1, 0.2),
            rec("(oh ", 0.2, 0.3),
            rec("yeah) ", 0.3, 0.4),
            rec("Hello ", 0.4, 1.0),
            rec("you", 1.0, 1.5),
        ];
        let paragraphs = segment(&records);
        assert_eq!(
            texts(&paragraphs),
            vec![vec![
                vec![vec!["[Verse", "1]"]],
                vec![vec!["(oh", "yeah)"], vec!["Hello"], vec!["you"]],
            ]]
        );
    }

    #[test]
    fn test_unclosed_bracket_does_not_leak_into_next_line() {
        let records = [
            rec("(oh ", 0.0, 0.1),
            rec("oh\n", 0.1, 0.2),
            rec("la ", 0.2, 0.3),
            rec("la", 0.3, 0.4),
        ];
        let paragraphs = segment(&records);
        assert_eq!(
            texts(&paragraphs),
            vec![vec![vec![vec!["(oh", "oh"]], vec![vec!["la"], vec!["la"]]]]
        );
    }
}
