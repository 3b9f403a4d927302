//! Gap Analyzer: turns keyword matching output into a ranked improvement list.
//!
//! Pure computation over already-extracted sets; owns nothing beyond one call.

use serde::{Deserialize, Serialize};

use crate::analysis::impact::ImpactGap;
use crate::analysis::keywords::{quick_wins, KeywordEntry, KeywordMatch};

/// Impact findings turned into tips, at most this many.
const IMPACT_TIP_LIMIT: usize = 3;

/// Priority markers that lead generated tip lines.
const TIP_MARKERS: [(&str, TipPriority); 3] = [
    ("🔴", TipPriority::Critical),
    ("🟡", TipPriority::Important),
    ("🟢", TipPriority::Polish),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipPriority {
    /// Fix before sending.
    Critical,
    Important,
    /// Polish later.
    Polish,
}

impl TipPriority {
    fn for_rank(rank: usize) -> Self {
        match rank {
            1..=3 => TipPriority::Critical,
            4..=6 => TipPriority::Important,
            _ => TipPriority::Polish,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickWin {
    pub keyword: String,
    pub frequency: u32,
    /// 1-based rank among the missing keywords.
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementTip {
    pub priority: TipPriority,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysisResult {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub quick_wins: Vec<QuickWin>,
    pub tips: Vec<ImprovementTip>,
    pub impact_gaps: Vec<ImpactGap>,
    /// |matched| / max(|keywords|, 1), 0–100.
    pub match_percent: u8,
}

impl GapAnalysisResult {
    /// Folds generated tip lines into the ranked list. A leading marker picks the
    /// band, unmarked lines are polish. Computed tips stay ahead within each band
    /// and lines already present are skipped.
    pub fn merge_generated_tips<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            let (priority, text) = generated_tip(line.as_ref());
            if text.is_empty() || self.tips.iter().any(|t| t.text == text) {
                continue;
            }
            self.tips.push(ImprovementTip {
                priority,
                text: text.to_string(),
            });
        }
        self.tips.sort_by_key(|t| t.priority);
    }
}

fn generated_tip(line: &str) -> (TipPriority, &str) {
    let line = line.trim();
    for (marker, priority) in TIP_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return (priority, rest.trim_start_matches([' ', ':', '-']).trim());
        }
    }
    (TipPriority::Polish, line)
}

/// Composes keyword matching and impact findings into the gap report.
pub fn analyze_gaps(
    keyword_match: &KeywordMatch,
    impact_gaps: Vec<ImpactGap>,
    quick_win_limit: usize,
) -> GapAnalysisResult {
    let quick_wins: Vec<QuickWin> = quick_wins(keyword_match, quick_win_limit)
        .into_iter()
        .enumerate()
        .map(|(i, KeywordEntry { keyword, frequency, .. })| QuickWin {
            keyword,
            frequency,
            rank: i + 1,
        })
        .collect();

    let mut tips: Vec<ImprovementTip> = quick_wins.iter().map(keyword_tip).collect();
    tips.extend(impact_gaps.iter().take(IMPACT_TIP_LIMIT).map(|gap| ImprovementTip {
        priority: TipPriority::Important,
        text: format!("Quantify \"{}\": {}", gap.bullet, gap.suggestion),
    }));
    // Stable: quick-win rank order is kept within each band.
    tips.sort_by_key(|t| t.priority);

    GapAnalysisResult {
        matched_keywords: names(&keyword_match.matched),
        missing_keywords: names(&keyword_match.missing),
        quick_wins,
        tips,
        impact_gaps,
        match_percent: (keyword_match.match_ratio() * 100.0).round() as u8,
    }
}

fn keyword_tip(win: &QuickWin) -> ImprovementTip {
    let mention = match win.frequency {
        1 => "once".to_string(),
        n => format!("{n} times"),
    };
    ImprovementTip {
        priority: TipPriority::for_rank(win.rank),
        text: format!(
            "#{} Add \"{}\": mentioned {mention} in the job description",
            win.rank, win.keyword
        ),
    }
}

fn names(entries: &[KeywordEntry]) -> Vec<String> {
    entries.iter().map(|e| e.keyword.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::keywords::{match_keywords, resume_ngrams, JobKeywords};

    fn entry(keyword: &str, frequency: u32, first_seen: usize) -> KeywordEntry {
        KeywordEntry {
            keyword: keyword.to_string(),
            frequency,
            first_seen,
        }
    }

    #[test]
    fn test_quick_wins_ranked_with_tips() {
        let km = KeywordMatch {
            matched: vec![entry("python", 4, 0)],
            missing: vec![entry("sql", 3, 1), entry("airflow", 1, 2)],
        };
        let result = analyze_gaps(&km, vec![], 8);

        assert_eq!(result.quick_wins.len(), 2);
        assert_eq!(result.quick_wins[0].rank, 1);
        assert_eq!(result.quick_wins[0].keyword, "sql");
        assert_eq!(result.tips[0].text, "#1 Add \"sql\": mentioned 3 times in the job description");
        assert_eq!(result.tips[1].text, "#2 Add \"airflow\": mentioned once in the job description");
        assert_eq!(result.match_percent, 33);
    }

    #[test]
    fn test_priority_bands_by_rank() {
        let missing: Vec<KeywordEntry> = (0..8).map(|i| entry(&format!("k{i}"), 1, i)).collect();
        let km = KeywordMatch {
            matched: vec![],
            missing,
        };
        let result = analyze_gaps(&km, vec![], 8);
        let priorities: Vec<TipPriority> = result.tips.iter().map(|t| t.priority).collect();
        assert_eq!(
            priorities,
            vec![
                TipPriority::Critical,
                TipPriority::Critical,
                TipPriority::Critical,
                TipPriority::Important,
                TipPriority::Important,
                TipPriority::Important,
                TipPriority::Polish,
                TipPriority::Polish,
            ]
        );
    }

    #[test]
    fn test_impact_tips_capped_and_banded() {
        let gaps: Vec<ImpactGap> = (0..5)
            .map(|i| ImpactGap {
                bullet: format!("Bullet {i}"),
                reason: "r".to_string(),
                suggestion: "Add a metric".to_string(),
            })
            .collect();
        let result = analyze_gaps(&KeywordMatch::default(), gaps, 8);
        assert_eq!(result.tips.len(), IMPACT_TIP_LIMIT);
        assert_eq!(result.impact_gaps.len(), 5);
        assert!(result.tips.iter().all(|t| t.priority == TipPriority::Important));
    }

    #[test]
    fn test_generated_tips_merged_by_marker() {
        let km = KeywordMatch {
            matched: vec![],
            missing: vec![entry("sql", 2, 0)],
        };
        let mut result = analyze_gaps(&km, vec![], 8);
        result.merge_generated_tips(&[
            "🟢 Trim the summary to three lines",
            "🔴 Add a metric to every Acme bullet",
            "Use one date format throughout",
            "🟡: Move skills above education",
        ]);

        let tips: Vec<(TipPriority, &str)> =
            result.tips.iter().map(|t| (t.priority, t.text.as_str())).collect();
        assert_eq!(
            tips,
            vec![
                (TipPriority::Critical, "#1 Add \"sql\": mentioned 2 times in the job description"),
                (TipPriority::Critical, "Add a metric to every Acme bullet"),
                (TipPriority::Important, "Move skills above education"),
                (TipPriority::Polish, "Trim the summary to three lines"),
                (TipPriority::Polish, "Use one date format throughout"),
            ]
        );
    }

    #[test]
    fn test_generated_tips_skip_blank_and_repeated_lines() {
        let mut result = GapAnalysisResult::default();
        result.merge_generated_tips(&["🔴 Lead with impact", "🔴", "  ", "🔴 Lead with impact"]);
        assert_eq!(result.tips.len(), 1);
        assert_eq!(result.tips[0].text, "Lead with impact");
    }

    #[test]
    fn test_sets_partition_jd_keywords() {
        let jd = JobKeywords::from_terms(&["python", "sql", "leadership"]);
        let km = match_keywords(&jd, &resume_ngrams("python and leadership"));
        let result = analyze_gaps(&km, vec![], 8);
        assert_eq!(result.matched_keywords, vec!["python", "leadership"]);
        assert_eq!(result.missing_keywords, vec!["sql"]);
        assert_eq!(result.quick_wins.len(), 1);
    }
}
