// Resume analysis: normalization, action verbs, JD keywords, scoring, gap analysis.
// Pure and deterministic. Handlers run it inside tokio::task::spawn_blocking.

pub mod gap;
pub mod handlers;
pub mod impact;
pub mod keywords;
pub mod normalizer;
pub mod scoring;
pub mod verbs;
pub mod vocabulary;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::ResumeProfile;

pub use gap::GapAnalysisResult;
pub use scoring::{Grade, ScoreResult, ScoringConfig};

use gap::analyze_gaps;
use impact::check_all;
use keywords::{distinct_content_tokens, extract_keywords, match_keywords, resume_ngrams, KeywordMatch};
use normalizer::normalize;
use scoring::{compute_score, richness_ratio, KeywordBasis, ScoreInputs};
use verbs::detect_action_verbs;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub scoring: ScoringConfig,
    /// Cap on ranked JD keywords kept for matching.
    pub max_jd_keywords: usize,
    pub quick_win_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            max_jd_keywords: 40,
            quick_win_limit: 8,
        }
    }
}

/// Score plus gap report for one resume against an optional job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: ScoreResult,
    pub gaps: GapAnalysisResult,
}

/// Scores free-form resume text. Same inputs, same output, every time.
///
/// Without a job description (or with a blank one) the keyword sub-score falls back
/// to resume richness and the gap report carries no keyword findings.
pub fn evaluate(resume_text: &str, job_description: Option<&str>, config: &AnalysisConfig) -> Evaluation {
    let normalized = normalize(resume_text);
    let verbs = detect_action_verbs(&normalized.bullet_lines);

    let jd = job_description.filter(|jd| !jd.trim().is_empty());
    let (keyword_match, keyword_ratio, basis, keyword_total) = match jd {
        Some(jd) => {
            let keywords = extract_keywords(jd, config.max_jd_keywords);
            let km = match_keywords(&keywords, &resume_ngrams(resume_text));
            let ratio = km.match_ratio();
            (km, ratio, KeywordBasis::JobDescription, keywords.len())
        }
        None => {
            let distinct = distinct_content_tokens(&normalized.words);
            let ratio = richness_ratio(distinct, &config.scoring.thresholds);
            (KeywordMatch::default(), ratio, KeywordBasis::ResumeRichness, 0)
        }
    };

    let score = compute_score(
        &ScoreInputs {
            verbs: &verbs,
            keyword_ratio,
            keyword_basis: basis,
            matched_keyword_count: keyword_match.matched.len(),
            keyword_total,
            word_count: normalized.word_count(),
        },
        &config.scoring,
    );

    let gaps = analyze_gaps(
        &keyword_match,
        check_all(&normalized.bullet_lines),
        config.quick_win_limit,
    );

    debug!(
        score = score.score,
        verb_density = score.verb_density,
        keyword_ratio = score.keyword_ratio,
        words = score.counts.word_count,
        missing = gaps.missing_keywords.len(),
        "Evaluated resume"
    );

    Evaluation { score, gaps }
}

/// Scores a structured profile through its combined text.
pub fn evaluate_profile(
    profile: &ResumeProfile,
    job_description: Option<&str>,
    config: &AnalysisConfig,
) -> Result<Evaluation, AppError> {
    profile.validate()?;
    Ok(evaluate(&profile.combined_text(), job_description, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExperienceEntry;

    const RESUME: &str = "Backend engineer focused on data pipelines.\n\
        - Led migration of billing to Rust, cutting p99 latency 40%\n\
        - Built Python ETL jobs feeding the SQL warehouse\n\
        - Helped with reports\n\
        Skills: Python, SQL, Kubernetes";

    const JD: &str = "We need a Python engineer. Python and SQL are required. \
        Experience with Airflow and Kubernetes. Airflow ownership is a plus.";

    #[test]
    fn test_evaluate_is_deterministic() {
        let cfg = AnalysisConfig::default();
        let a = evaluate(RESUME, Some(JD), &cfg);
        let b = evaluate(RESUME, Some(JD), &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_jd_basis_partitions_keywords() {
        let e = evaluate(RESUME, Some(JD), &AnalysisConfig::default());
        assert_eq!(e.score.keyword_basis, KeywordBasis::JobDescription);
        assert!(e.gaps.matched_keywords.contains(&"python".to_string()));
        assert!(e.gaps.missing_keywords.contains(&"airflow".to_string()));
        assert_eq!(
            e.gaps.matched_keywords.len() + e.gaps.missing_keywords.len(),
            e.score.counts.keyword_total
        );
        assert!(e.gaps.quick_wins.iter().any(|w| w.keyword == "airflow"));
    }

    #[test]
    fn test_verbs_counted_over_bullets() {
        let e = evaluate(RESUME, None, &AnalysisConfig::default());
        assert_eq!(e.score.counts.total_bullets, 3);
        assert_eq!(e.score.counts.verb_count, 2);
        assert_eq!(e.score.matched_verbs, vec!["led", "built"]);
    }

    #[test]
    fn test_no_jd_uses_richness() {
        let e = evaluate(RESUME, Some("   "), &AnalysisConfig::default());
        assert_eq!(e.score.keyword_basis, KeywordBasis::ResumeRichness);
        assert!(e.gaps.quick_wins.is_empty());
        assert!(e.score.keyword_ratio > 0.0);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let e = evaluate("", Some(JD), &AnalysisConfig::default());
        assert_eq!(e.score.score, 0);
        assert_eq!(e.score.grade, Grade::NeedsImprovement);
        assert!(e.gaps.matched_keywords.is_empty());
    }

    #[test]
    fn test_impact_gaps_reported() {
        let e = evaluate(RESUME, None, &AnalysisConfig::default());
        let flagged: Vec<&str> = e.gaps.impact_gaps.iter().map(|g| g.bullet.as_str()).collect();
        assert_eq!(
            flagged,
            vec!["Built Python ETL jobs feeding the SQL warehouse", "Helped with reports"]
        );
    }

    #[test]
    fn test_profile_matches_its_combined_text() {
        let profile = ResumeProfile {
            name: "Sam Rivera".to_string(),
            summary: Some("Data engineer.".to_string()),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                org: "Acme".to_string(),
                dates: None,
                bullets: vec!["Built Python ETL jobs".to_string()],
            }],
            ..Default::default()
        };
        let cfg = AnalysisConfig::default();
        let from_profile = evaluate_profile(&profile, Some(JD), &cfg).unwrap();
        let from_text = evaluate(&profile.combined_text(), Some(JD), &cfg);
        assert_eq!(from_profile, from_text);
        assert_eq!(from_profile.score.counts.verb_count, 1);
    }

    #[test]
    fn test_profile_entry_errors_propagate() {
        let profile = ResumeProfile {
            name: "Sam".to_string(),
            experience: vec![ExperienceEntry {
                title: String::new(),
                org: "Acme".to_string(),
                dates: None,
                bullets: vec![],
            }],
            ..Default::default()
        };
        assert!(matches!(
            evaluate_profile(&profile, None, &AnalysisConfig::default()),
            Err(AppError::Input { .. })
        ));
    }
}
