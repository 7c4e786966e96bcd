//! Bracket markup scanner.
//!
//! Splits lyric text into tags and literal fragments in a single linear
//! pass. The scanner knows nothing about sections; pairing opening and
//! closing tags happens in the resolver.
//!
//! Recognized forms:
//!
//! ```text
//! [chorus]            opening tag
//! [chorus] (x2)       opening tag with an indication on the same line
//! [/chorus]           closing tag
//! [!instrumental]     command tag
//! ```
//!
//! A tag never spans lines and never contains `[`. Anything that does not
//! form a tag is left as literal text.

/// A lexical unit of lyric markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `[name]`, optionally followed by `(indication)`.
    Open {
        name: &'a str,
        indication: Option<&'a str>,
        line: usize,
        /// Byte offset of the opening `[`.
        start: usize,
        /// Byte offset just past the tag and its indication.
        end: usize,
    },
    /// `[/name]`.
    Close {
        name: &'a str,
        line: usize,
        /// Byte offset of the opening `[`.
        start: usize,
    },
    /// `[!value]`.
    Command { value: &'a str, line: usize },
    /// `[]` or brackets holding only whitespace.
    EmptyTag { line: usize },
    /// Literal text, never containing a newline.
    Text(&'a str),
    Newline,
}

/// Scan `text` into tokens. Line numbers are 1-based.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;
    let mut line = 1;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => {
                push_text(&mut tokens, &text[text_start..pos]);
                tokens.push(Token::Newline);
                line += 1;
                pos += 1;
                text_start = pos;
            }
            b'[' => match scan_tag(text, pos, line) {
                Some((token, end)) => {
                    push_text(&mut tokens, &text[text_start..pos]);
                    tokens.push(token);
                    pos = end;
                    text_start = pos;
                }
                None => pos += 1,
            },
            _ => pos += 1,
        }
    }

    push_text(&mut tokens, &text[text_start..]);
    tokens
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, fragment: &'a str) {
    if !fragment.is_empty() {
        tokens.push(Token::Text(fragment));
    }
}

/// Try to read a tag starting at the `[` at `start`.
///
/// Returns the token and the byte offset just past it, or `None` if the
/// bracket is literal text.
fn scan_tag(text: &str, start: usize, line: usize) -> Option<(Token<'_>, usize)> {
    let inner_start = start + 1;
    let rest = &text[inner_start..];
    let close = rest.find(|c: char| matches!(c, ']' | '[' | '\n'))?;
    if rest.as_bytes()[close] != b']' {
        return None;
    }

    // Leading spaces never hide a `/` or `!` marker.
    let inner = rest[..close].trim();
    let after = inner_start + close + 1;

    if inner.is_empty() {
        return Some((Token::EmptyTag { line }, after));
    }

    if let Some(name) = inner.strip_prefix('/') {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        return Some((Token::Close { name, line, start }, after));
    }

    if let Some(value) = inner.strip_prefix('!') {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        return Some((Token::Command { value, line }, after));
    }

    let name = inner;
    let (indication, end) = match scan_indication(text, after) {
        Some((indication, end)) => (Some(indication), end),
        None => (None, after),
    };

    Some((
        Token::Open {
            name,
            indication,
            line,
            start,
            end,
        },
        end,
    ))
}

/// Read `(indication)` after an opening tag, allowing spaces or tabs first.
fn scan_indication(text: &str, from: usize) -> Option<(&str, usize)> {
    let rest = &text[from..];
    let skipped = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let body = rest[skipped..].strip_prefix('(')?;
    let close = body.find(|c: char| matches!(c, ')' | '\n'))?;
    if body.as_bytes()[close] != b')' {
        return None;
    }

    let indication = body[..close].trim();
    if indication.is_empty() {
        return None;
    }

    // skipped whitespace + '(' + body + ')'
    Some((indication, from + skipped + 1 + close + 1))
}
