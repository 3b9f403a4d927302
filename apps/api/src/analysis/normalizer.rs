//! Text Normalizer: turns raw resume or job-description text into tokens,
//! sentences, and bullet lines.
//!
//! Tokens keep internal hyphens ("full-stack", "ci-cd") and drop apostrophes
//! ("team's" → "teams"); every other non-alphanumeric character separates tokens.
//! `words` is lowercase for matching, `display_words` is the same sequence in
//! original case for rendering.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::vocabulary::{is_action_verb, BULLET_GLYPHS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedText {
    pub words: Vec<String>,
    pub display_words: Vec<String>,
    pub sentences: Vec<String>,
    /// Trimmed lines identified as list items, glyph included.
    pub bullet_lines: Vec<String>,
}

impl NormalizedText {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.sentences.is_empty() && self.bullet_lines.is_empty()
    }
}

/// Normalizes raw text. Empty or whitespace-only input yields empty containers.
pub fn normalize(raw: &str) -> NormalizedText {
    let mut normalized = NormalizedText::default();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_bullet_line(trimmed) {
            normalized.bullet_lines.push(trimmed.to_string());
        }

        let body = strip_bullet_glyph(trimmed);
        normalized.sentences.extend(
            body.unicode_sentences()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );

        for token in tokenize(body) {
            normalized.words.push(token.to_lowercase());
            normalized.display_words.push(token);
        }
    }

    normalized
}

/// Splits text into original-case tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() || c == '-' {
            current.push(c);
        } else if c == '\'' || c == '\u{2019}' {
            // apostrophes join: "team's" → "teams"
        } else {
            flush_token(&mut current, &mut tokens);
        }
    }
    flush_token(&mut current, &mut tokens);

    tokens
}

/// Lowercase tokens, the form every matcher works on.
pub fn tokenize_lower(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|t| t.to_lowercase()).collect()
}

fn flush_token(current: &mut String, tokens: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    // Leading/trailing hyphens are punctuation; doubled hyphens are dashes.
    for part in current.split("--") {
        let part = part.trim_matches('-');
        if !part.is_empty() {
            tokens.push(part.to_string());
        }
    }
    current.clear();
}

/// A line is a bullet if, after trimming, it starts with a bullet glyph or with a
/// reference action verb followed by whitespace and more text.
pub fn is_bullet_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with(BULLET_GLYPHS) {
        return !strip_bullet_glyph(trimmed).is_empty();
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or_default();
    let has_rest = parts.next().is_some_and(|rest| !rest.trim().is_empty());
    has_rest && is_action_verb(&word_key(first))
}

/// Removes leading bullet glyphs and the whitespace after them.
pub fn strip_bullet_glyph(line: &str) -> &str {
    line.trim().trim_start_matches(BULLET_GLYPHS).trim_start()
}

/// The lowercase first word of a line, bullet glyph stripped.
pub fn first_word(line: &str) -> Option<String> {
    strip_bullet_glyph(line)
        .split_whitespace()
        .next()
        .map(word_key)
        .filter(|w| !w.is_empty())
}

/// Lowercases a word and trims surrounding punctuation ("Led," → "led").
fn word_key(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
