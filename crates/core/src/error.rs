//! Error and diagnostic types for lyric slide generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring slide generation.
///
/// Resolving markup never fails; malformed input is reported through
/// [`ParseWarning`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An option value is out of its accepted range.
    #[error("Invalid option `{field}`: {reason}")]
    InvalidOption {
        field: &'static str,
        reason: String,
    },
}

/// Non-fatal problems found while resolving section markup.
///
/// These never change the produced parts; they exist so callers can
/// surface them to whoever wrote the lyrics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A `[/name]` tag with no open section to close.
    #[error("line {line}: closing tag [/{name}] has no matching opening tag")]
    UnmatchedClosingTag { name: String, line: usize },

    /// A `[]` tag with nothing inside.
    #[error("line {line}: empty tag ignored")]
    EmptyTag { line: usize },

    /// A `[name]` reference to a section that is never given a body.
    #[error("line {line}: section [{name}] has no content anywhere in the document")]
    UndefinedSection { name: String, line: usize },
}

impl ParseWarning {
    /// Whether this warning points at broken markup rather than a cue-only marker.
    pub fn is_malformed_markup(&self) -> bool {
        !matches!(self, ParseWarning::UndefinedSection { .. })
    }
}
