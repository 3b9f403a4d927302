//! Keyword Extractor & Matcher: derives a ranked keyword set from a job
//! description and matches it against resume text.
//!
//! Extraction:
//! 1. Per sentence, take every word n-gram of length 1–3
//! 2. Drop n-grams containing a stop word, a single-character token, or a purely numeric token
//! 3. Deduplicate preserving first-seen order, counting frequency
//! 4. Rank by frequency descending, first-seen ascending; cap at `max_keywords`
//!
//! Matching is exact containment in the resume's normalized n-gram set. No stemming,
//! no fuzzy matching: precision over recall.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{normalize, tokenize_lower};
use crate::analysis::vocabulary::is_stop_word;

pub const MAX_NGRAM: usize = 3;

/// A single keyword from the JD with its frequency and first-seen position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub frequency: u32,
    pub first_seen: usize,
}

/// A job description's keyword set, held in rank order. Derived once per analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobKeywords {
    pub entries: Vec<KeywordEntry>,
}

impl JobKeywords {
    /// Builds a keyword set from explicit terms, each with frequency 1, in the given order.
    pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Self {
        let mut seen = HashSet::new();
        let entries = terms
            .iter()
            .map(|t| tokenize_lower(t.as_ref()).join(" "))
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .enumerate()
            .map(|(first_seen, keyword)| KeywordEntry {
                keyword,
                frequency: 1,
                first_seen,
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.keyword.as_str())
    }
}

/// Outcome of matching a keyword set against resume text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// Keywords found in the resume, in JD rank order.
    pub matched: Vec<KeywordEntry>,
    /// Keywords absent from the resume, in JD rank order.
    pub missing: Vec<KeywordEntry>,
}

impl KeywordMatch {
    /// |matched| / max(|keywords|, 1).
    pub fn match_ratio(&self) -> f64 {
        let total = self.matched.len() + self.missing.len();
        self.matched.len() as f64 / total.max(1) as f64
    }
}

/// Extracts the ranked keyword set from raw job-description text.
pub fn extract_keywords(jd_text: &str, max_keywords: usize) -> JobKeywords {
    let normalized = normalize(jd_text);

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for sentence in &normalized.sentences {
        let tokens = tokenize_lower(sentence);
        for gram in ngrams(&tokens) {
            if !gram.iter().all(|t| is_content_token(t)) {
                continue;
            }
            let key = gram.join(" ");
            let count = counts.entry(key.clone()).or_insert(0);
            if *count == 0 {
                order.push(key);
            }
            *count += 1;
        }
    }

    let mut entries: Vec<KeywordEntry> = order
        .into_iter()
        .enumerate()
        .map(|(first_seen, keyword)| {
            let frequency = counts.get(&keyword).copied().unwrap_or(1);
            KeywordEntry {
                keyword,
                frequency,
                first_seen,
            }
        })
        .collect();

    // Stable sort keeps first-seen order among equal frequencies.
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    entries.truncate(max_keywords);

    JobKeywords { entries }
}

/// Every n-gram of length 1..=MAX_NGRAM present in `text`, normalized.
pub fn resume_ngrams(text: &str) -> HashSet<String> {
    let normalized = normalize(text);
    let mut grams = HashSet::new();
    for sentence in &normalized.sentences {
        let tokens = tokenize_lower(sentence);
        grams.extend(ngrams(&tokens).map(|g| g.join(" ")));
    }
    grams
}

/// Partitions `keywords` into matched and missing against the resume n-gram set.
pub fn match_keywords(keywords: &JobKeywords, resume_grams: &HashSet<String>) -> KeywordMatch {
    let (matched, missing): (Vec<KeywordEntry>, Vec<KeywordEntry>) = keywords
        .entries
        .iter()
        .cloned()
        .partition(|entry| resume_grams.contains(&entry.keyword));
    KeywordMatch { matched, missing }
}

/// First `limit` missing keywords, already in JD rank order.
pub fn quick_wins(result: &KeywordMatch, limit: usize) -> Vec<KeywordEntry> {
    result.missing.iter().take(limit).cloned().collect()
}

/// Distinct content tokens of the resume: the resume-only keyword richness basis.
pub fn distinct_content_tokens(words: &[String]) -> usize {
    words
        .iter()
        .filter(|w| is_content_token(w))
        .collect::<HashSet<_>>()
        .len()
}

fn ngrams(tokens: &[String]) -> impl Iterator<Item = &[String]> {
    (1..=MAX_NGRAM).flat_map(move |n| tokens.windows(n))
}

fn is_content_token(token: &str) -> bool {
    token.chars().count() > 1
        && !token.chars().all(|c| c.is_ascii_digit())
        && !is_stop_word(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_list(jd: &JobKeywords) -> Vec<&str> {
        jd.keywords().collect()
    }

    #[test]
    fn test_python_sql_leadership_partition() {
        let jd = JobKeywords::from_terms(&["python", "sql", "leadership"]);
        let grams = resume_ngrams("Strong Python background. Showed leadership on two launches.");
        let result = match_keywords(&jd, &grams);

        let matched: Vec<&str> = result.matched.iter().map(|e| e.keyword.as_str()).collect();
        let missing: Vec<&str> = result.missing.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(matched, vec!["python", "leadership"]);
        assert_eq!(missing, vec!["sql"]);

        let wins = quick_wins(&result, 8);
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].keyword, "sql");
    }

    #[test]
    fn test_extraction_drops_stop_words_and_numbers() {
        let jd = extract_keywords("We need 5 years of Python.", 40);
        let kws = keyword_list(&jd);
        assert!(kws.contains(&"python"));
        assert!(kws.contains(&"need"));
        assert!(!kws.iter().any(|k| k.contains("of") || k.contains("we") || *k == "5"));
        assert!(!kws.contains(&"need python"), "n-grams never skip over dropped tokens");
    }

    #[test]
    fn test_ngrams_up_to_three_words() {
        let jd = extract_keywords("Distributed systems engineering.", 40);
        let kws = keyword_list(&jd);
        assert!(kws.contains(&"distributed"));
        assert!(kws.contains(&"distributed systems"));
        assert!(kws.contains(&"distributed systems engineering"));
    }

    #[test]
    fn test_ngrams_do_not_cross_sentences() {
        let jd = extract_keywords("Python. SQL. Leadership.", 40);
        assert_eq!(keyword_list(&jd), vec!["python", "sql", "leadership"]);
    }

    #[test]
    fn test_rank_by_frequency_then_first_seen() {
        let jd = extract_keywords("Kafka. Rust. Go. Rust. Go. Rust.", 40);
        assert_eq!(keyword_list(&jd), vec!["rust", "go", "kafka"]);
        assert_eq!(jd.entries[0].frequency, 3);
        assert_eq!(jd.entries[1].frequency, 2);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let jd = extract_keywords("Terraform. Ansible. Docker.", 40);
        assert_eq!(keyword_list(&jd), vec!["terraform", "ansible", "docker"]);
    }

    #[test]
    fn test_cap_applies_after_ranking() {
        let jd = extract_keywords("Alpha. Beta. Gamma. Gamma.", 1);
        assert_eq!(keyword_list(&jd), vec!["gamma"]);
    }

    #[test]
    fn test_matched_and_missing_partition_keywords() {
        let jd = extract_keywords(
            "Senior backend engineer with Rust, PostgreSQL and Kubernetes. \
             Kubernetes operators a plus. Mentoring junior engineers.",
            40,
        );
        let grams = resume_ngrams("- Built Rust services on Kubernetes\n- Mentoring interns");
        let result = match_keywords(&jd, &grams);

        let all: HashSet<&str> = jd.keywords().collect();
        let matched: HashSet<&str> = result.matched.iter().map(|e| e.keyword.as_str()).collect();
        let missing: HashSet<&str> = result.missing.iter().map(|e| e.keyword.as_str()).collect();

        assert!(matched.is_disjoint(&missing));
        assert_eq!(matched.union(&missing).copied().collect::<HashSet<_>>(), all);
        assert!(matched.contains("kubernetes"));
        assert!(missing.contains("postgresql"));
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let jd = JobKeywords::from_terms(&["postgresql"]);
        let result = match_keywords(&jd, &resume_ngrams("Postgres tuning"));
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_hyphenated_terms_match_as_one_token() {
        let jd = JobKeywords::from_terms(&["full-stack"]);
        let result = match_keywords(&jd, &resume_ngrams("Full-Stack developer"));
        assert_eq!(result.matched.len(), 1);
    }

    #[test]
    fn test_empty_jd_ratio_is_zero() {
        let result = match_keywords(&extract_keywords("", 40), &resume_ngrams("python"));
        assert!(result.matched.is_empty() && result.missing.is_empty());
        assert_eq!(result.match_ratio(), 0.0);
    }

    #[test]
    fn test_quick_wins_bounded() {
        let terms: Vec<String> = (0..20).map(|i| format!("skill{i}")).collect();
        let jd = JobKeywords::from_terms(&terms);
        let result = match_keywords(&jd, &HashSet::new());
        let wins = quick_wins(&result, 8);
        assert_eq!(wins.len(), 8);
        assert_eq!(wins[0].keyword, "skill0");
    }

    #[test]
    fn test_distinct_content_tokens_ignores_stop_words() {
        let words: Vec<String> = ["the", "rust", "rust", "go", "a", "2024"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(distinct_content_tokens(&words), 2);
    }
}
