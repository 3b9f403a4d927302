//! Heuristic Scorer: maps extracted features to a 0–100 strength score.
//!
//! overall = round(w_verb·verb + w_keyword·keyword + w_length·length), computed over
//! the integer sub-scores so it is always reproducible from them. Every threshold is
//! a named configuration value; nothing here is derived statistically.

use serde::{Deserialize, Serialize};

use crate::analysis::verbs::VerbStats;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub verb: f64,
    pub keyword: f64,
    pub length: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            verb: 0.3,
            keyword: 0.4,
            length: 0.3,
        }
    }
}

impl ScoringWeights {
    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [self.verb, self.keyword, self.length];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(format!("scoring weights must be non-negative, got {self:?}"));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(format!("scoring weights must sum to 1.0, got {sum:.4}"));
        }
        Ok(())
    }
}

/// Bucket thresholds for the three sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    /// Verb density at which the verb sub-score saturates at 100.
    pub verb_density_target: f64,
    /// Keyword ratio at which the keyword sub-score saturates at 100.
    pub keyword_ratio_target: f64,
    /// Distinct content tokens expected of a rich resume when no JD is supplied.
    pub richness_baseline: usize,
    /// Word-count band scoring 100.
    pub ideal_words_min: usize,
    pub ideal_words_max: usize,
    /// Above `ideal_words_max` the score falls linearly to `long_floor` at this count.
    pub long_words_limit: usize,
    pub long_floor: u8,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            verb_density_target: 0.8,
            keyword_ratio_target: 0.75,
            richness_baseline: 60,
            ideal_words_min: 300,
            ideal_words_max: 600,
            long_words_limit: 1200,
            long_floor: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: ScoringThresholds,
}

/// Which measure backed the keyword sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordBasis {
    /// |matched| / |JD keywords|.
    JobDescription,
    /// Distinct content tokens / richness baseline.
    ResumeRichness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => Grade::Excellent,
            65..=84 => Grade::Good,
            45..=64 => Grade::Average,
            _ => Grade::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Average => "Average",
            Grade::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub verb_density: u8,
    pub keyword_match: u8,
    pub length_score: u8,
}

/// Raw counts behind the sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounts {
    pub verb_count: usize,
    pub total_bullets: usize,
    pub matched_keyword_count: usize,
    pub keyword_total: usize,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub sub_scores: SubScores,
    pub counts: ScoreCounts,
    pub verb_density: f64,
    pub keyword_ratio: f64,
    pub keyword_basis: KeywordBasis,
    pub matched_verbs: Vec<String>,
    pub grade: Grade,
}

/// Everything the scorer consumes, already extracted.
#[derive(Debug, Clone)]
pub struct ScoreInputs<'a> {
    pub verbs: &'a VerbStats,
    pub keyword_ratio: f64,
    pub keyword_basis: KeywordBasis,
    pub matched_keyword_count: usize,
    pub keyword_total: usize,
    pub word_count: usize,
}

pub fn compute_score(inputs: &ScoreInputs<'_>, config: &ScoringConfig) -> ScoreResult {
    let t = &config.thresholds;
    let keyword_ratio = inputs.keyword_ratio.clamp(0.0, 1.0);

    let sub_scores = SubScores {
        verb_density: saturating_score(inputs.verbs.density, t.verb_density_target),
        keyword_match: saturating_score(keyword_ratio, t.keyword_ratio_target),
        length_score: length_score(inputs.word_count, t),
    };
    let score = combine(&sub_scores, &config.weights);

    ScoreResult {
        score,
        sub_scores,
        counts: ScoreCounts {
            verb_count: inputs.verbs.verb_count,
            total_bullets: inputs.verbs.total_bullets,
            matched_keyword_count: inputs.matched_keyword_count,
            keyword_total: inputs.keyword_total,
            word_count: inputs.word_count,
        },
        verb_density: inputs.verbs.density,
        keyword_ratio,
        keyword_basis: inputs.keyword_basis,
        matched_verbs: inputs.verbs.matched_verbs.clone(),
        grade: Grade::from_score(score),
    }
}

/// The fixed weighted combination of sub-scores.
pub fn combine(sub: &SubScores, weights: &ScoringWeights) -> u8 {
    let weighted = weights.verb * sub.verb_density as f64
        + weights.keyword * sub.keyword_match as f64
        + weights.length * sub.length_score as f64;
    weighted.round().clamp(0.0, 100.0) as u8
}

/// Resume-only keyword richness: distinct content tokens / baseline, clamped to [0, 1].
pub fn richness_ratio(distinct_tokens: usize, thresholds: &ScoringThresholds) -> f64 {
    (distinct_tokens as f64 / thresholds.richness_baseline.max(1) as f64).clamp(0.0, 1.0)
}

/// 100 × min(value / target, 1), rounded.
fn saturating_score(value: f64, target: f64) -> u8 {
    if target <= 0.0 {
        return 100;
    }
    (100.0 * (value / target).clamp(0.0, 1.0)).round() as u8
}

/// 0 → 0, rising linearly to 100 at `ideal_words_min`; 100 through `ideal_words_max`;
/// then falling linearly to `long_floor` at `long_words_limit` and flat after.
fn length_score(word_count: usize, t: &ScoringThresholds) -> u8 {
    let wc = word_count as f64;
    let min = t.ideal_words_min as f64;
    let max = t.ideal_words_max as f64;
    let limit = t.long_words_limit as f64;
    let floor = t.long_floor as f64;

    let score = if wc < min {
        100.0 * wc / min.max(1.0)
    } else if wc <= max {
        100.0
    } else if wc >= limit {
        floor
    } else {
        100.0 - (100.0 - floor) * (wc - max) / (limit - max)
    };
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verbs(verb_count: usize, total: usize) -> VerbStats {
        VerbStats {
            verb_count,
            total_bullets: total,
            density: verb_count as f64 / total.max(1) as f64,
            matched_verbs: vec![],
        }
    }

    fn score_with(density_verbs: (usize, usize), ratio: f64, words: usize) -> ScoreResult {
        let v = verbs(density_verbs.0, density_verbs.1);
        compute_score(
            &ScoreInputs {
                verbs: &v,
                keyword_ratio: ratio,
                keyword_basis: KeywordBasis::JobDescription,
                matched_keyword_count: 0,
                keyword_total: 0,
                word_count: words,
            },
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_default_weights_valid() {
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let w = ScoringWeights {
            verb: 0.5,
            keyword: 0.5,
            length: 0.5,
        };
        assert!(w.validate().is_err());
        let negative = ScoringWeights {
            verb: -0.2,
            keyword: 0.7,
            length: 0.5,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_perfect_inputs_score_100() {
        let r = score_with((8, 8), 1.0, 450);
        assert_eq!(r.score, 100);
        assert_eq!(r.grade, Grade::Excellent);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let r = score_with((0, 0), 0.0, 0);
        assert_eq!(r.score, 0);
        assert_eq!(r.grade, Grade::NeedsImprovement);
    }

    #[test]
    fn test_overall_reproducible_from_sub_scores() {
        let r = score_with((3, 7), 0.42, 250);
        assert_eq!(r.score, combine(&r.sub_scores, &ScoringWeights::default()));
    }

    #[test]
    fn test_length_buckets() {
        let t = ScoringThresholds::default();
        assert_eq!(length_score(0, &t), 0);
        assert_eq!(length_score(150, &t), 50);
        assert_eq!(length_score(300, &t), 100);
        assert_eq!(length_score(600, &t), 100);
        assert_eq!(length_score(900, &t), 75);
        assert_eq!(length_score(1200, &t), 50);
        assert_eq!(length_score(5000, &t), 50);
    }

    #[test]
    fn test_monotonic_in_verb_density() {
        let mut previous = 0;
        for verb_count in 0..=10 {
            let s = score_with((verb_count, 10), 0.5, 400).score;
            assert!(s >= previous, "score dropped at {verb_count}/10");
            previous = s;
        }
    }

    #[test]
    fn test_monotonic_in_keyword_ratio() {
        let mut previous = 0;
        for step in 0..=20 {
            let s = score_with((5, 10), step as f64 / 20.0, 400).score;
            assert!(s >= previous, "score dropped at ratio step {step}");
            previous = s;
        }
    }

    #[test]
    fn test_sub_scores_within_bounds() {
        let r = score_with((10, 10), 3.0, 100_000);
        assert!(r.sub_scores.verb_density <= 100);
        assert!(r.sub_scores.keyword_match <= 100);
        assert!(r.sub_scores.length_score <= 100);
        assert!((r.keyword_ratio - 1.0).abs() < f64::EPSILON, "ratio is clamped");
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(85), Grade::Excellent);
        assert_eq!(Grade::from_score(84), Grade::Good);
        assert_eq!(Grade::from_score(65), Grade::Good);
        assert_eq!(Grade::from_score(45), Grade::Average);
        assert_eq!(Grade::from_score(44), Grade::NeedsImprovement);
        assert_eq!(Grade::Good.label(), "Good");
    }

    #[test]
    fn test_richness_ratio_clamped() {
        let t = ScoringThresholds::default();
        assert_eq!(richness_ratio(0, &t), 0.0);
        assert!((richness_ratio(30, &t) - 0.5).abs() < 1e-9);
        assert_eq!(richness_ratio(600, &t), 1.0);
    }
}
