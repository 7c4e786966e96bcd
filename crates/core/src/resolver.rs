//! Section resolution for bracket-tagged lyrics.
//!
//! Resolution runs in two passes over the scanned tokens:
//!
//! 1. **Extraction** pairs each top-level `[name]` with its `[/name]`,
//!    stores the first body seen for every name in a [`NameCache`], and
//!    collapses closed sections into single markers.
//! 2. **Linearization** walks the remaining markers and text line by line,
//!    producing [`Part`]s in document order. Repeated names reuse the
//!    cached body.

use crate::error::ParseWarning;
use crate::markup::{tokenize, Token};
use crate::normalize::{clean_block, normalize_line_endings};
use crate::types::{Part, COMMAND_PREFIX};
use std::collections::HashMap;

/// First-seen body for every section name in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCache {
    entries: HashMap<String, String>,
}

impl NameCache {
    /// Store `body` under `name` unless the name already has one.
    ///
    /// Returns false if an earlier definition was kept.
    fn define(&mut self, name: &str, body: String) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), body);
        true
    }

    /// Cached body for `name`. Empty bodies are reported as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .filter(|body| !body.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of [`TagResolver::resolve_with_diagnostics`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Parts in document order.
    pub parts: Vec<Part>,

    /// Non-fatal markup problems, in the order they were found.
    pub warnings: Vec<ParseWarning>,
}

/// Resolves lyric markup into an ordered list of parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagResolver;

impl TagResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve `text` into parts. Empty input gives no parts.
    pub fn resolve(&self, text: &str) -> Vec<Part> {
        self.resolve_with_diagnostics(text).parts
    }

    /// Resolve `text`, also returning any markup warnings.
    pub fn resolve_with_diagnostics(&self, text: &str) -> Resolution {
        if text.trim().is_empty() {
            return Resolution::default();
        }

        let source = normalize_line_endings(text);
        let tokens = tokenize(&source);
        let extraction = extract(&source, &tokens);

        log::debug!(
            "Extracted {} section definitions from {} tokens",
            extraction.cache.len(),
            tokens.len()
        );

        let resolution = linearize(extraction);
        for warning in &resolution.warnings {
            if warning.is_malformed_markup() {
                log::warn!("{}", warning);
            } else {
                log::debug!("{}", warning);
            }
        }

        resolution
    }
}

/// Markup left after closed sections have been collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    /// An opening tag, with or without a body of its own.
    Section {
        name: &'a str,
        indication: Option<&'a str>,
        line: usize,
        /// Tag and indication as written.
        raw: &'a str,
        /// Paired with a closing tag.
        closed: bool,
    },
    Command {
        value: &'a str,
    },
    /// A dropped tag. Keeps its line from counting as blank.
    Marker,
    Text(&'a str),
    LineBreak,
}

struct Extraction<'a> {
    segments: Vec<Segment<'a>>,
    cache: NameCache,
    warnings: Vec<ParseWarning>,
}

/// Token positions of opening and closing tags, per name.
struct TagIndex<'a> {
    opens: HashMap<&'a str, Vec<usize>>,
    closes: HashMap<&'a str, Vec<usize>>,
}

impl<'a> TagIndex<'a> {
    fn build(tokens: &[Token<'a>]) -> Self {
        let mut opens: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut closes: HashMap<&'a str, Vec<usize>> = HashMap::new();

        for (idx, token) in tokens.iter().enumerate() {
            match token {
                Token::Open { name, .. } => opens.entry(*name).or_default().push(idx),
                Token::Close { name, .. } => closes.entry(*name).or_default().push(idx),
                _ => {}
            }
        }

        Self { opens, closes }
    }

    /// Index of the `[/name]` closing the `[name]` at `open_at`.
    ///
    /// A reopened `[name]` before any close ends the search: the first tag
    /// is then a bare reference and the second starts its own section.
    fn matching_close(&self, name: &str, open_at: usize) -> Option<usize> {
        let close = next_after(self.closes.get(name)?, open_at)?;
        let reopen = self
            .opens
            .get(name)
            .and_then(|opens| next_after(opens, open_at));

        match reopen {
            Some(reopen) if reopen < close => None,
            _ => Some(close),
        }
    }
}

fn next_after(positions: &[usize], index: usize) -> Option<usize> {
    let at = positions.partition_point(|&p| p <= index);
    positions.get(at).copied()
}

/// Pass 1: pair sections with their closing tags and fill the name cache.
fn extract<'a>(source: &'a str, tokens: &[Token<'a>]) -> Extraction<'a> {
    let index = TagIndex::build(tokens);
    let mut segments = Vec::with_capacity(tokens.len());
    let mut cache = NameCache::default();
    let mut warnings = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Open {
                name,
                indication,
                line,
                start,
                end,
            } => {
                let closed = index.matching_close(name, i).and_then(|j| match tokens[j] {
                    Token::Close { start, .. } => Some((j, start)),
                    _ => None,
                });

                segments.push(Segment::Section {
                    name: *name,
                    indication: *indication,
                    line: *line,
                    raw: &source[*start..*end],
                    closed: closed.is_some(),
                });

                if let Some((close_idx, close_start)) = closed {
                    let body = clean_block(&source[*end..close_start]);
                    if !cache.define(name, body) {
                        log::debug!(
                            "line {}: keeping first definition of [{}]",
                            line,
                            name
                        );
                    }
                    // Everything up to the closing tag is body text.
                    i = close_idx + 1;
                    continue;
                }
            }
            Token::Close { name, line, .. } => {
                warnings.push(ParseWarning::UnmatchedClosingTag {
                    name: name.to_string(),
                    line: *line,
                });
                segments.push(Segment::Marker);
            }
            Token::Command { value, .. } => segments.push(Segment::Command { value: *value }),
            Token::EmptyTag { line } => {
                warnings.push(ParseWarning::EmptyTag { line: *line });
                segments.push(Segment::Marker);
            }
            Token::Text(text) => segments.push(Segment::Text(*text)),
            Token::Newline => segments.push(Segment::LineBreak),
        }
        i += 1;
    }

    Extraction {
        segments,
        cache,
        warnings,
    }
}

/// Pass 2 state: builds parts from collapsed segments.
struct Linearizer<'c> {
    cache: &'c NameCache,
    parts: Vec<Part>,
    warnings: Vec<ParseWarning>,
    seen: HashMap<String, usize>,
    /// Lines of free text not yet emitted.
    run: Vec<String>,
    /// Free text on the current line.
    line: String,
    line_has_tag: bool,
}

impl<'c> Linearizer<'c> {
    fn new(cache: &'c NameCache, warnings: Vec<ParseWarning>) -> Self {
        Self {
            cache,
            parts: Vec::new(),
            warnings,
            seen: HashMap::new(),
            run: Vec::new(),
            line: String::new(),
            line_has_tag: false,
        }
    }

    fn push_segment(&mut self, segment: &Segment<'_>) {
        match segment {
            Segment::Section {
                name,
                indication,
                line,
                raw,
                closed,
            } => {
                let content = self.cache.get(name).map(str::to_string);
                if content.is_none() && !closed && self.line_has_text() {
                    // An unknown `[word]` inside a lyric line is part of the lyric.
                    log::debug!("line {}: keeping [{}] as lyric text", line, name);
                    self.line.push_str(raw);
                    return;
                }
                if content.is_none() && !self.seen.contains_key(*name) {
                    self.warnings.push(ParseWarning::UndefinedSection {
                        name: name.to_string(),
                        line: *line,
                    });
                }
                let indication = indication.map(|i| i.to_string());
                self.push_named(name.to_string(), indication, content);
            }
            Segment::Command { value } => {
                let name = format!("{}{}", COMMAND_PREFIX, value);
                self.push_named(name, None, Some(value.to_string()));
            }
            Segment::Marker => self.line_has_tag = true,
            Segment::Text(text) => self.line.push_str(text),
            Segment::LineBreak => self.end_line(),
        }
    }

    fn push_named(&mut self, name: String, indication: Option<String>, content: Option<String>) {
        // Text before the tag on the same line belongs to the preceding run.
        self.take_line_text();
        self.flush_run();
        self.line_has_tag = true;

        let count = self.seen.entry(name.clone()).or_insert(0);
        *count += 1;
        let repetition = *count > 1;

        self.parts.push(Part::named(name, repetition, indication, content));
    }

    fn line_has_text(&self) -> bool {
        !self.line.trim().is_empty()
    }

    fn take_line_text(&mut self) {
        let text = self.line.trim();
        if !text.is_empty() {
            self.run.push(text.to_string());
        }
        self.line.clear();
    }

    fn end_line(&mut self) {
        let blank = !self.line_has_text() && !self.line_has_tag;
        self.take_line_text();
        if blank {
            self.flush_run();
        }
        self.line_has_tag = false;
    }

    fn flush_run(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let content = self.run.join("\n");
        self.run.clear();
        self.parts.push(Part::unnamed(content));
    }

    fn finish(mut self) -> Resolution {
        self.take_line_text();
        self.flush_run();
        Resolution {
            parts: self.parts,
            warnings: self.warnings,
        }
    }
}

/// Pass 2: turn collapsed segments into parts.
fn linearize(extraction: Extraction<'_>) -> Resolution {
    let mut linearizer = Linearizer::new(&extraction.cache, extraction.warnings);
    for segment in &extraction.segments {
        linearizer.push_segment(segment);
    }
    linearizer.finish()
}
