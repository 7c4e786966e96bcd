//! ProPresenter text format output.
//!
//! Generates plain text where each slide is separated by a blank line,
//! optionally preceded by a title slide.

/// Formatter for ProPresenter-compatible text output.
#[derive(Debug, Clone, Default)]
pub struct ProPresenterFormatter {
    /// Title emitted as its own first slide.
    title: Option<String>,
}

impl ProPresenterFormatter {
    /// Create a new formatter without a title slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `title` as the first slide. Blank titles are ignored.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        let title = title.trim();
        self.title = (!title.is_empty()).then(|| title.to_string());
        self
    }

    /// Number of slides `format` would emit for `slides`.
    pub fn slide_count(&self, slides: &[String]) -> usize {
        let title_slide_count = usize::from(self.title.is_some());
        title_slide_count + slides.iter().filter(|s| !s.trim().is_empty()).count()
    }

    /// Format slides into ProPresenter-compatible text.
    ///
    /// Slides are separated by blank lines.
    ///
    /// # Example output
    /// ```text
    /// Amazing grace how sweet the sound
    /// That saved a wretch like me
    ///
    /// I once was lost but now am found
    /// Was blind but now I see
    /// ```
    pub fn format(&self, slides: &[String]) -> String {
        self.title
            .iter()
            .chain(slides.iter())
            .map(|slide| slide.trim())
            .filter(|slide| !slide.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format and write to a string, adding a trailing newline.
    pub fn format_with_newline(&self, slides: &[String]) -> String {
        let formatted = self.format(slides);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_empty() {
        let formatter = ProPresenterFormatter::new();
        assert_eq!(formatter.format(&[]), "");
        assert_eq!(formatter.format_with_newline(&[]), "");
    }

    #[test]
    fn test_format_single_slide() {
        let formatter = ProPresenterFormatter::new();
        assert_eq!(
            formatter.format(&slides(&["Amazing grace how sweet the sound\nThat saved a wretch like me"])),
            "Amazing grace how sweet the sound\nThat saved a wretch like me"
        );
    }

    #[test]
    fn test_format_separates_slides_with_blank_line() {
        let formatter = ProPresenterFormatter::new();
        let expected = "Line one\nLine two\n\nLine three";
        assert_eq!(
            formatter.format(&slides(&["Line one\nLine two", "Line three"])),
            expected
        );
    }

    #[test]
    fn test_format_with_title() {
        let formatter = ProPresenterFormatter::new().with_title("Amazing Grace");
        let input = slides(&["Line one\nLine two", "Line three\nLine four"]);
        assert_eq!(
            formatter.format_with_newline(&input),
            "Amazing Grace\n\nLine one\nLine two\n\nLine three\nLine four\n"
        );
        assert_eq!(formatter.slide_count(&input), 3);
    }

    #[test]
    fn test_blank_title_ignored() {
        let formatter = ProPresenterFormatter::new().with_title("   ");
        assert_eq!(formatter.format(&slides(&["Only line"])), "Only line");
        assert_eq!(formatter.slide_count(&slides(&["Only line"])), 1);
    }

    #[test]
    fn test_title_only() {
        let formatter = ProPresenterFormatter::new().with_title("Holy Holy Holy");
        assert_eq!(formatter.format_with_newline(&[]), "Holy Holy Holy\n");
    }
}
