//! Slide segmentation.
//!
//! Turns part content into display-ready slides. Multi-line content is
//! grouped line by line: blank lines force a new slide, each slide holds
//! at most `max_lines_per_slide` lines, and a slide ends early once it
//! carries `long_line_limit` long lines so dense verses stay readable.
//!
//! Single-line content longer than `max_chars_per_slide` is grouped by
//! sentence instead (see [`crate::sentences`]).

use crate::options::SlideOptions;
use crate::sentences::group_sentences;
use crate::types::Part;

/// Splits part content into slides according to [`SlideOptions`].
#[derive(Debug, Clone, Default)]
pub struct SlideSegmenter {
    options: SlideOptions,
}

impl SlideSegmenter {
    /// Create a segmenter with the given options.
    pub fn new(options: SlideOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &SlideOptions {
        &self.options
    }

    /// Slides for every part with content, in order.
    pub fn segment_parts(&self, parts: &[Part]) -> Vec<String> {
        parts
            .iter()
            .filter_map(Part::text)
            .flat_map(|content| self.segment(content))
            .collect()
    }

    /// Slides for one block of content.
    pub fn segment(&self, content: &str) -> Vec<String> {
        if self.uses_sentence_grouping(content) {
            log::debug!(
                "Grouping {} characters of unbroken text by sentence",
                content.chars().count()
            );
            return group_sentences(
                content,
                self.options.max_sentences_per_slide,
                self.options.max_chars_per_slide,
            );
        }

        self.group_lines(content)
    }

    fn uses_sentence_grouping(&self, content: &str) -> bool {
        self.options.sentence_fallback
            && !content.trim().contains('\n')
            && content.trim().chars().count() > self.options.max_chars_per_slide
    }

    fn is_long_line(&self, line: &str) -> bool {
        line.chars().count() > self.options.long_line_threshold
    }

    /// Greedy line accumulation with blank-line and long-line breaks.
    fn group_lines(&self, content: &str) -> Vec<String> {
        let max_lines = self.options.max_lines_per_slide.max(1);
        let long_limit = self.options.long_line_limit.max(1);

        let mut slides = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut long_lines = 0;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() {
                flush(&mut slides, &mut current);
                long_lines = 0;
                continue;
            }

            let full = current.len() >= max_lines;
            let too_dense = current.len() >= 2 && long_lines >= long_limit;
            if full || too_dense {
                flush(&mut slides, &mut current);
                long_lines = 0;
            }

            if self.is_long_line(line) {
                long_lines += 1;
            }
            current.push(line);
        }

        flush(&mut slides, &mut current);
        slides
    }
}

fn flush(slides: &mut Vec<String>, current: &mut Vec<&str>) {
    if !current.is_empty() {
        slides.push(current.join("\n"));
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_A: &str = "This is a very long line that should be considered too long for the slide";
    const LONG_B: &str = "This is another very long line that should also be considered too long";

    fn segment(content: &str) -> Vec<String> {
        SlideSegmenter::default().segment(content)
    }

    #[test]
    fn test_splits_on_line_count() {
        assert_eq!(
            segment("Line 1\nLine 2\nLine 3\nLine 4\nLine 5"),
            vec!["Line 1\nLine 2\nLine 3\nLine 4", "Line 5"]
        );
    }

    #[test]
    fn test_splits_on_blank_lines() {
        assert_eq!(segment("Line1\nLine2\n\nLine3"), vec!["Line1\nLine2", "Line3"]);
        assert_eq!(
            segment("Line 1\nLine 2\n   \n\nLine 3\nLine 4"),
            vec!["Line 1\nLine 2", "Line 3\nLine 4"]
        );
    }

    #[test]
    fn test_long_lines_break_early() {
        let a = "A".repeat(41);
        let b = "B".repeat(41);
        let content = format!("{}\n{}\nShort", a, b);
        assert_eq!(segment(&content), vec![format!("{}\n{}", a, b), "Short".to_string()]);
    }

    #[test]
    fn test_forty_characters_is_not_long() {
        let a = "A".repeat(40);
        let b = "B".repeat(40);
        let content = format!("{}\n{}\nShort", a, b);
        assert_eq!(segment(&content), vec![content.clone()]);
    }

    #[test]
    fn test_long_lines_counted_in_characters() {
        let long_a = "é".repeat(41);
        let long_b = "中".repeat(41);
        let content = format!("{}\n{}\nShort", long_a, long_b);
        assert_eq!(
            segment(&content),
            vec![format!("{}\n{}", long_a, long_b), "Short".to_string()]
        );

        // 40 characters but 80 or 120 bytes.
        let content = format!("{}\n{}\nShort", "é".repeat(40), "中".repeat(40));
        assert_eq!(segment(&content), vec![content.clone()]);
    }

    #[test]
    fn test_long_lines_need_two_in_slide() {
        let content = format!("{}\nShort line 1\n{}\nShort line 2", LONG_A, LONG_B);
        // Two long lines arrive only after the third line, so the break
        // happens before the fourth.
        assert_eq!(
            segment(&content),
            vec![
                format!("{}\nShort line 1\n{}", LONG_A, LONG_B),
                "Short line 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_long_lines_then_short_lines() {
        let content = format!("{}\n{}\nShort line 1\nShort line 2", LONG_A, LONG_B);
        assert_eq!(
            segment(&content),
            vec![
                format!("{}\n{}", LONG_A, LONG_B),
                "Short line 1\nShort line 2".to_string(),
            ]
        );
    }

    #[test]
    fn test_lines_are_trimmed() {
        assert_eq!(
            segment("    First line with spaces    \n  Second line with spaces  "),
            vec!["First line with spaces\nSecond line with spaces"]
        );
    }

    #[test]
    fn test_custom_max_lines() {
        let segmenter = SlideSegmenter::new(SlideOptions::new().with_max_lines_per_slide(2));
        assert_eq!(
            segmenter.segment("Line one\nLine two\nLine three\nLine four\nLine five"),
            vec!["Line one\nLine two", "Line three\nLine four", "Line five"]
        );

        let segmenter = SlideSegmenter::new(SlideOptions::new().with_max_lines_per_slide(1));
        assert_eq!(segmenter.segment("A\nB\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_max_lines_with_blank_lines() {
        let segmenter = SlideSegmenter::new(SlideOptions::new().with_max_lines_per_slide(2));
        assert_eq!(
            segmenter.segment("Line one\nLine two\n\nLine three\nLine four\nLine five"),
            vec!["Line one\nLine two", "Line three\nLine four", "Line five"]
        );
    }

    #[test]
    fn test_line_count_never_exceeds_max() {
        let content = (1..=23)
            .map(|n| format!("Line {}", n))
            .collect::<Vec<_>>()
            .join("\n");
        for max in 1..=6 {
            let segmenter = SlideSegmenter::new(SlideOptions::new().with_max_lines_per_slide(max));
            for slide in segmenter.segment(&content) {
                assert!(slide.lines().count() <= max);
            }
        }
    }

    #[test]
    fn test_empty_content() {
        assert!(segment("").is_empty());
        assert!(segment("\n  \n").is_empty());
    }

    #[test]
    fn test_short_single_line_is_one_slide() {
        let line = "very long line that should be split into two lines but has been sent on one line intead";
        assert_eq!(segment(line), vec![line]);
    }

    #[test]
    fn test_long_paragraph_grouped_by_sentence() {
        let paragraph = "In the beginning God created the heavens and the earth. \
Now the earth was formless and empty, darkness was over the surface of the deep, \
and the Spirit of God was hovering over the waters. And God said, \"Let there be light,\" \
and there was light. God saw that the light was good, and he separated the light from the darkness. \
God called the light \"day,\" and the darkness he called \"night.\" \
And there was evening, and there was morning, the first day.";

        let slides = segment(paragraph);
        assert!(slides.len() > 1);
        for slide in &slides {
            assert!(!slide.contains('\n'));
            assert!(slide.chars().count() <= 250);
        }
        assert_eq!(slides.join(" "), paragraph);
    }

    #[test]
    fn test_sentence_fallback_disabled() {
        let paragraph = "Short sentence. ".repeat(30);
        let segmenter = SlideSegmenter::new(SlideOptions::new().with_sentence_fallback(false));
        assert_eq!(segmenter.segment(&paragraph), vec![paragraph.trim()]);
    }

    #[test]
    fn test_segment_parts_skips_absent_content() {
        let parts = vec![
            Part::named("interlude", false, None, None),
            Part::unnamed("Line 1\nLine 2"),
            Part::named("!instrumental", false, None, Some("instrumental".to_string())),
        ];
        assert_eq!(
            SlideSegmenter::default().segment_parts(&parts),
            vec!["Line 1\nLine 2", "instrumental"]
        );
    }
}
