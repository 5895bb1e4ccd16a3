//! Timeline assembly from segmented word buckets.
//!
//! Walks paragraphs, lines and word buckets, turning each non-empty bucket
//! into one [`WordTimeline`]. Empty lines are kept as empty lines.

use crate::id::IdGenerator;
use crate::lyrics::cleanup::clean_word_text;
use crate::types::{
    AnnotatedChar, LineBuckets, LineTimeline, ParagraphBuckets, ParagraphTimeline, Timeline,
    WordBucket, WordTimeline,
};

/// Builds a [`Timeline`] from segmented buckets, drawing IDs from an injected generator.
pub struct TimelineBuilder<'a> {
    ids: &'a mut dyn IdGenerator,
    keep_blank_words: bool,
}

impl<'a> TimelineBuilder<'a> {
    /// Create a builder that drops words whose cleaned text is empty.
    pub fn new(ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            ids,
            keep_blank_words: false,
        }
    }

    /// Keep or drop words whose cleaned text is empty.
    #[must_use]
    pub fn keep_blank_words(mut self, keep: bool) -> Self {
        self.keep_blank_words = keep;
        self
    }

    /// Build the whole timeline.
    pub fn build(&mut self, paragraphs: &[ParagraphBuckets]) -> Timeline {
        let timeline: Timeline = paragraphs.iter().map(|p| self.build_paragraph(p)).collect();
        tracing::debug!(
            "Built timeline with {} paragraphs and {} words",
            timeline.len(),
            timeline.iter().flatten().flatten().count()
        );
        timeline
    }

    fn build_paragraph(&mut self, paragraph: &[LineBuckets]) -> ParagraphTimeline {
        paragraph.iter().map(|line| self.build_line(line)).collect()
    }

    fn build_line(&mut self, line: &[WordBucket]) -> LineTimeline {
        line.iter().filter_map(|word| self.build_word(word)).collect()
    }

    /// Assemble one word bucket, or `None` if it has no chars.
    pub fn build_word(&mut self, word: &[AnnotatedChar]) -> Option<WordTimeline> {
        let (first, last) = (word.first()?, word.last()?);

        let mut raw = String::new();
        for c in word {
            raw.push_str(&c.record.text);
            if c.ends_with_inline_space {
                raw.push(' ');
            }
        }
        let text = clean_word_text(&raw);

        if text.is_empty() && !self.keep_blank_words {
            tracing::trace!("Dropping blank word {raw:?}");
            return None;
        }

        Some(WordTimeline {
            word_id: self.ids.next_id(),
            begin: first.record.start_sec,
            end: last.record.end_sec,
            text,
            has_new_line: word.iter().any(|c| c.ends_line),
            has_whitespace: word.iter().any(|c| c.ends_with_inline_space),
        })
    }
}

/// Build a timeline with blank words dropped.
pub fn build(paragraphs: &[ParagraphBuckets], ids: &mut dyn IdGenerator) -> Timeline {
    TimelineBuilder::new(ids).build(paragraphs)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::id::SequentialIdGen;
    use crate::types::CharRecord;

    fn ch(text: &str, start: f64, end: f64) -> AnnotatedChar {
        AnnotatedChar::new(CharRecord::new(text, start, end))
    }

    fn spaced(text: &str, start: f64, end: f64) -> AnnotatedChar {
        AnnotatedChar {
            ends_with_inline_space: true,
            ..ch(text, start, end)
        }
    }

    fn broken(text: &str, start: f64, end: f64) -> AnnotatedChar {
        AnnotatedChar {
            ends_line: true,
            ..ch(text, start, end)
        }
    }

    #[test]
    fn test_word_spans_first_start_to_last_end() {
        let mut ids = SequentialIdGen::new();
        let word = TimelineBuilder::new(&mut ids)
            .build_word(&[ch("Hel", 0.25, 0.5), ch("lo", 0.5, 0.75)])
            .unwrap();
        assert_eq!(word.text, "Hello");
        assert!((word.begin - 0.25).abs() < f64::EPSILON);
        assert!((word.end - 0.75).abs() < f64::EPSILON);
        assert_eq!(word.word_id.as_str(), "0");
    }

    #[test]
    fn test_inverted_timestamps_pass_through() {
        let mut ids = SequentialIdGen::new();
        let word = TimelineBuilder::new(&mut ids)
            .build_word(&[ch("la", 5.0, 4.0)])
            .unwrap();
        assert!((word.begin - 5.0).abs() < f64::EPSILON);
        assert!((word.end - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_space_flag_reinserts_single_space() {
        let mut ids = SequentialIdGen::new();
        let word = TimelineBuilder::new(&mut ids)
            .build_word(&[spaced("Hi", 0.0, 1.0), ch("there", 1.0, 2.0)])
            .unwrap();
        assert_eq!(word.text, "Hi there");
        assert!(word.has_whitespace);
        assert!(!word.has_new_line);
    }

    #[test]
    fn test_flags_are_or_of_chars() {
        let mut ids = SequentialIdGen::new();
        let mut builder = TimelineBuilder::new(&mut ids);
        let word = builder
            .build_word(&[ch("a", 0.0, 1.0), broken("b", 1.0, 2.0), ch("c", 2.0, 3.0)])
            .unwrap();
        assert!(word.has_new_line);
        assert!(!word.has_whitespace);

        let word = builder.build_word(&[ch("a", 0.0, 1.0)]).unwrap();
        assert!(!word.has_new_line);
        assert!(!word.has_whitespace);
    }

    #[test]
    fn test_empty_bucket_is_skipped() {
        let mut ids = SequentialIdGen::new();
        assert!(TimelineBuilder::new(&mut ids).build_word(&[]).is_none());
    }

    #[test]
    fn test_blank_words_dropped_unless_kept() {
        let bucket = [ch("[Verse]", 0.0, 0.0)];

        let mut ids = SequentialIdGen::new();
        assert!(TimelineBuilder::new(&mut ids).build_word(&bucket).is_none());

        let mut ids = SequentialIdGen::new();
        let word = TimelineBuilder::new(&mut ids)
            .keep_blank_words(true)
            .build_word(&bucket)
            .unwrap();
        assert_eq!(word.text, "");
    }

    #[test]
    fn test_annotation_spanning_chars_is_removed() {
        let mut ids = SequentialIdGen::new();
        let word = TimelineBuilder::new(&mut ids)
            .build_word(&[
                ch("[", 0.0, 0.1),
                ch("Verse", 0.1, 0.2),
                spaced("]", 0.2, 0.3),
                ch("Hello", 0.3, 1.0),
            ])
            .unwrap();
        assert_eq!(word.text, "Hello");
    }

    #[test]
    fn test_structure_is_mapped_and_empty_lines_kept() {
        let paragraphs = vec![
            vec![
                vec![vec![spaced("one", 0.0, 1.0)], vec![], vec![broken("two", 1.0, 2.0)]],
                vec![vec![]],
            ],
            vec![vec![vec![ch("three", 2.0, 3.0)]]],
        ];
        let mut ids = SequentialIdGen::new();
        let timeline = build(&paragraphs, &mut ids);

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].len(), 2);
        assert_eq!(timeline[0][0].len(), 2);
        assert!(timeline[0][1].is_empty());
        assert_eq!(timeline[1][0][0].text, "three");

        let ids: Vec<&str> = timeline
            .iter()
            .flatten()
            .flatten()
            .map(|w| w.word_id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_non_empty_buckets_map_one_to_one() {
        let paragraphs = vec![vec![vec![
            vec![spaced("a", 0.0, 1.0)],
            vec![spaced("b", 1.0, 2.0)],
            vec![ch("c", 2.0, 3.0)],
        ]]];
        let bucket_count: usize = paragraphs.iter().flatten().map(Vec::len).sum();
        let mut ids = SequentialIdGen::new();
        let timeline = build(&paragraphs, &mut ids);
        assert_eq!(timeline.iter().flatten().flatten().count(), bucket_count);
    }
}
