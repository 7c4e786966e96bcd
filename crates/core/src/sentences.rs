//! Sentence grouping for long, unbroken paragraphs.
//!
//! Used when a part's content is a single line too long for one slide,
//! e.g. a scripture reading pasted as one paragraph.

use regex::Regex;
use std::sync::LazyLock;

/// Sentence-ending punctuation, optional closing quotes or brackets, then whitespace.
static SENTENCE_END_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?…]+["'”’»)\]]*\s+"#).unwrap());

/// Split text into trimmed sentences.
///
/// Punctuation stays with the sentence it ends. Text without a sentence
/// boundary comes back as a single sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_END_REGEX.find_iter(text) {
        let end = boundary.start() + boundary.as_str().trim_end().len();
        push_sentence(&mut sentences, &text[start..end]);
        start = boundary.end();
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, sentence: &'a str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

/// Group sentences into slides of at most `max_sentences` sentences and
/// roughly `max_chars` characters.
///
/// A single sentence longer than `max_chars` gets a slide of its own. If
/// everything fits on one slide, the trimmed text is returned unchanged.
pub fn group_sentences(text: &str, max_sentences: usize, max_chars: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let max_sentences = max_sentences.max(1);
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_chars = 0;

    for sentence in split_sentences(trimmed) {
        let chars = sentence.chars().count();
        let would_be = current_chars + 1 + chars;

        if !current.is_empty() && (current.len() >= max_sentences || would_be > max_chars) {
            slides.push(current.join(" "));
            current.clear();
            current_chars = 0;
        }

        current_chars += if current.is_empty() { chars } else { chars + 1 };
        current.push(sentence);
    }

    if !current.is_empty() {
        slides.push(current.join(" "));
    }

    if slides.len() <= 1 {
        return vec![trimmed.to_string()];
    }

    slides
}
