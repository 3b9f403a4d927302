//! Action-Verb Detector: counts bullets that open with a strong action verb.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::first_word;
use crate::analysis::vocabulary::is_action_verb;

/// How many matched verbs are reported back for display.
const REPORTED_VERB_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbStats {
    /// Bullets whose first word is in the reference set.
    pub verb_count: usize,
    pub total_bullets: usize,
    /// verb_count / max(total_bullets, 1), always within [0, 1].
    pub density: f64,
    /// Up to ten matched verbs, in bullet order.
    pub matched_verbs: Vec<String>,
}

/// Runs the detector over already-identified bullet lines.
pub fn detect_action_verbs<S: AsRef<str>>(bullet_lines: &[S]) -> VerbStats {
    let mut verb_count = 0usize;
    let mut matched_verbs = Vec::new();

    for line in bullet_lines {
        let Some(word) = first_word(line.as_ref()) else {
            continue;
        };
        if is_action_verb(&word) {
            verb_count += 1;
            if matched_verbs.len() < REPORTED_VERB_LIMIT {
                matched_verbs.push(word);
            }
        }
    }

    let total_bullets = bullet_lines.len();
    let density = (verb_count as f64 / total_bullets.max(1) as f64).clamp(0.0, 1.0);

    VerbStats {
        verb_count,
        total_bullets,
        density,
        matched_verbs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_counts_helped_does_not() {
        let stats = detect_action_verbs(&["Led a team of 5", "Helped with reports"]);
        assert_eq!(stats.verb_count, 1);
        assert_eq!(stats.total_bullets, 2);
        assert!((stats.density - 0.5).abs() < f64::EPSILON);
        assert_eq!(stats.matched_verbs, vec!["led"]);
    }

    #[test]
    fn test_zero_bullets_is_zero_density() {
        let stats = detect_action_verbs::<&str>(&[]);
        assert_eq!(stats.total_bullets, 0);
        assert_eq!(stats.density, 0.0);
    }

    #[test]
    fn test_glyphs_and_case_ignored() {
        let stats = detect_action_verbs(&["- AUTOMATED deploys", "•   Designed the API", "* built it"]);
        assert_eq!(stats.verb_count, 3);
        assert_eq!(stats.density, 1.0);
    }

    #[test]
    fn test_only_first_word_is_checked() {
        let stats = detect_action_verbs(&["Was part of a team that led the migration"]);
        assert_eq!(stats.verb_count, 0);
    }

    #[test]
    fn test_density_never_exceeds_one() {
        let bullets = vec!["Led x"; 25];
        let stats = detect_action_verbs(&bullets);
        assert!(stats.density <= 1.0 && stats.density >= 0.0);
        assert_eq!(stats.matched_verbs.len(), REPORTED_VERB_LIMIT);
    }
}
