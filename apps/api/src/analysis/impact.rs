//! Impact Checker: flags bullets that state activity without a quantified outcome.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{strip_bullet_glyph, tokenize_lower};

const VAGUE_VERBS: &[&str] = &[
    "helped",
    "worked on",
    "assisted",
    "participated",
    "involved",
    "responsible for",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "massive",
    "substantial",
    "many",
    "numerous",
    "various",
    "several",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactGap {
    pub bullet: String,
    pub reason: String,
    pub suggestion: String,
}

/// True if the bullet carries a number, percentage, currency amount, or multiplier.
pub fn is_quantified(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || text.contains('%')
        || text.contains('$')
        || text.contains('€')
        || text.contains('£')
}

/// Checks a single bullet. `None` means it passes.
pub fn check_impact(bullet: &str) -> Option<ImpactGap> {
    let text = strip_bullet_glyph(bullet);
    if text.is_empty() || is_quantified(text) {
        return None;
    }

    let tokens = tokenize_lower(text);

    if let Some(vague) = VAGUE_VERBS.iter().find(|v| contains_phrase(&tokens, v)) {
        return Some(ImpactGap {
            bullet: text.to_string(),
            reason: format!("Uses vague phrasing '{vague}' without a measurable result"),
            suggestion: format!(
                "Replace '{vague}' with a strong action verb and add the outcome: how much, how fast, how many"
            ),
        });
    }

    if let Some(scale) = VAGUE_SCALE_WORDS.iter().find(|w| contains_phrase(&tokens, w)) {
        return Some(ImpactGap {
            bullet: text.to_string(),
            reason: format!("Uses vague scale word '{scale}' without a number"),
            suggestion: format!("Replace '{scale}' with a specific number, e.g. '5x', '40%', '3 weeks'"),
        });
    }

    Some(ImpactGap {
        bullet: text.to_string(),
        reason: "No quantified outcome found".to_string(),
        suggestion: "Add a metric: a number, percentage, amount, or time saved".to_string(),
    })
}

/// Whole-word match: every word of `phrase` appears as consecutive tokens.
fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.is_empty() {
        return false;
    }
    tokens
        .windows(words.len())
        .any(|window| window.iter().zip(&words).all(|(t, w)| t == w))
}

/// Checks a batch of bullets, collecting failures in bullet order.
pub fn check_all<S: AsRef<str>>(bullets: &[S]) -> Vec<ImpactGap> {
    bullets
        .iter()
        .filter_map(|b| check_impact(b.as_ref()))
        .collect()
}
