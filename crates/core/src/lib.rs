//! Section markup resolution and slide segmentation for song lyrics.
//!
//! Lyrics are written with bracket tags:
//!
//! ```text
//! [verse 1]
//! Amazing grace how sweet the sound
//! That saved a wretch like me
//! [/verse 1]
//!
//! [chorus] (x2)
//! My chains are gone
//! [/chorus]
//!
//! [!instrumental]
//! [chorus]
//! ```
//!
//! [`resolve_parts`] turns this into ordered [`Part`]s, reusing the body
//! of a section every time its name comes back. [`build_slides`] goes one
//! step further and cuts every part into short slides.

pub mod error;
pub mod markup;
pub mod normalize;
pub mod options;
pub mod propresenter;
pub mod resolver;
pub mod segmenter;
pub mod sentences;
pub mod types;

pub use error::{Error, ParseWarning, Result};
pub use options::{SlideOptions, DEFAULT_LONG_LINE_THRESHOLD, DEFAULT_MAX_LINES_PER_SLIDE};
pub use propresenter::ProPresenterFormatter;
pub use resolver::{NameCache, Resolution, TagResolver};
pub use segmenter::SlideSegmenter;
pub use types::Part;

/// Resolve tagged lyrics into parts, in document order.
///
/// Never fails; an empty string gives an empty list.
pub fn resolve_parts(text: &str) -> Vec<Part> {
    TagResolver::new().resolve(text)
}

/// Resolve tagged lyrics and cut them into slides of at most
/// `max_lines_per_slide` lines (clamped to at least 1).
pub fn build_slides(text: &str, max_lines_per_slide: usize) -> Vec<String> {
    let options = SlideOptions::new().with_max_lines_per_slide(max_lines_per_slide);
    build_slides_with(text, &options)
}

/// Resolve tagged lyrics and cut them into slides using `options`.
pub fn build_slides_with(text: &str, options: &SlideOptions) -> Vec<String> {
    let parts = resolve_parts(text);
    SlideSegmenter::new(options.clone()).segment_parts(&parts)
}
