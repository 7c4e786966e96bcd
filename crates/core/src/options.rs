//! Slide segmentation options.
//!
//! Options can be built in code with the `with_*` methods or deserialized
//! from JSON; missing fields fall back to the defaults below.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default maximum number of lines on a line-grouped slide.
pub const DEFAULT_MAX_LINES_PER_SLIDE: usize = 4;

/// Default length (in characters) above which a line counts as long.
pub const DEFAULT_LONG_LINE_THRESHOLD: usize = 40;

/// Tuning knobs for turning part content into slides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideOptions {
    /// Most lines a line-grouped slide may hold.
    #[serde(default = "defaults::max_lines_per_slide")]
    pub max_lines_per_slide: usize,

    /// Trimmed length (characters) above which a line is long.
    #[serde(default = "defaults::long_line_threshold")]
    pub long_line_threshold: usize,

    /// Number of long lines that ends a slide early.
    #[serde(default = "defaults::long_line_limit")]
    pub long_line_limit: usize,

    /// Most sentences on a sentence-grouped slide.
    #[serde(default = "defaults::max_sentences_per_slide")]
    pub max_sentences_per_slide: usize,

    /// Most characters on a sentence-grouped slide. Single-line content
    /// longer than this is split by sentence.
    #[serde(default = "defaults::max_chars_per_slide")]
    pub max_chars_per_slide: usize,

    /// Split long single-line content by sentence.
    #[serde(default = "defaults::sentence_fallback")]
    pub sentence_fallback: bool,
}

mod defaults {
    pub(super) fn max_lines_per_slide() -> usize {
        super::DEFAULT_MAX_LINES_PER_SLIDE
    }

    pub(super) fn long_line_threshold() -> usize {
        super::DEFAULT_LONG_LINE_THRESHOLD
    }

    pub(super) fn long_line_limit() -> usize {
        2
    }

    pub(super) fn max_sentences_per_slide() -> usize {
        4
    }

    pub(super) fn max_chars_per_slide() -> usize {
        250
    }

    pub(super) fn sentence_fallback() -> bool {
        true
    }
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            max_lines_per_slide: defaults::max_lines_per_slide(),
            long_line_threshold: defaults::long_line_threshold(),
            long_line_limit: defaults::long_line_limit(),
            max_sentences_per_slide: defaults::max_sentences_per_slide(),
            max_chars_per_slide: defaults::max_chars_per_slide(),
            sentence_fallback: defaults::sentence_fallback(),
        }
    }
}

impl SlideOptions {
    /// Create options with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of lines per slide.
    pub fn with_max_lines_per_slide(mut self, lines: usize) -> Self {
        self.max_lines_per_slide = lines.max(1); // At least 1 line per slide
        self
    }

    /// Set the long line threshold in characters.
    pub fn with_long_line_threshold(mut self, chars: usize) -> Self {
        self.long_line_threshold = chars;
        self
    }

    /// Set how many long lines end a slide early.
    pub fn with_long_line_limit(mut self, lines: usize) -> Self {
        self.long_line_limit = lines.max(1);
        self
    }

    /// Set the maximum number of sentences per slide.
    pub fn with_max_sentences_per_slide(mut self, sentences: usize) -> Self {
        self.max_sentences_per_slide = sentences.max(1);
        self
    }

    /// Set the character budget for sentence-grouped slides.
    pub fn with_max_chars_per_slide(mut self, chars: usize) -> Self {
        self.max_chars_per_slide = chars.max(1);
        self
    }

    /// Enable or disable sentence grouping of long single-line content.
    pub fn with_sentence_fallback(mut self, enabled: bool) -> Self {
        self.sentence_fallback = enabled;
        self
    }

    /// Check values that the builder methods would have clamped.
    ///
    /// Useful for options deserialized from a file.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("max_lines_per_slide", self.max_lines_per_slide),
            ("long_line_limit", self.long_line_limit),
            ("max_sentences_per_slide", self.max_sentences_per_slide),
            ("max_chars_per_slide", self.max_chars_per_slide),
        ];

        for (field, value) in counts {
            if value == 0 {
                return Err(Error::InvalidOption {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }
}
