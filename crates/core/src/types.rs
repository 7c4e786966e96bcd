//! Domain types for representing resolved song content.

use serde::{Deserialize, Serialize};

/// Prefix marking a command tag name such as `!instrumental`.
pub const COMMAND_PREFIX: char = '!';

/// One resolved section of a song, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Tag name (`verse 1`, `chorus`, `!instrumental`). `None` for free text.
    pub name: Option<String>,

    /// True if an earlier part already used this name.
    pub repetition: bool,

    /// Parenthetical annotation following the opening tag, e.g. `(x2)`.
    pub indication: Option<String>,

    /// Text body. Identical for every part sharing a name.
    pub content: Option<String>,
}

impl Part {
    /// Create a part for a named section.
    pub fn named(
        name: impl Into<String>,
        repetition: bool,
        indication: Option<String>,
        content: Option<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            repetition,
            indication,
            content,
        }
    }

    /// Create a part for text outside of any section tag.
    pub fn unnamed(content: impl Into<String>) -> Self {
        Self {
            name: None,
            repetition: false,
            indication: None,
            content: Some(content.into()),
        }
    }

    /// Whether this part came from a `[!value]` command tag.
    pub fn is_command(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.starts_with(COMMAND_PREFIX))
    }

    /// Content if present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }
}
