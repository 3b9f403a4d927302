//! Static reference dictionaries: strong action verbs and keyword stop words.
//!
//! Both are process-wide read-only sets, built on first use and never torn down.
//! Entries are lowercase; lookups must be lowercased by the caller.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Glyphs that mark a line as a list item.
pub const BULLET_GLYPHS: &[char] = &['-', '•', '*'];

/// Hire-relevant action verbs, past tense. "helped", "worked" and other
/// low-signal verbs are deliberately absent.
#[rustfmt::skip]
const ACTION_VERBS: &[&str] = &[
    "accelerated", "achieved", "acquired", "adapted", "administered", "advanced",
    "advised", "analyzed", "architected", "assembled", "assessed", "audited",
    "authored", "automated", "balanced", "benchmarked", "boosted", "budgeted",
    "built", "calculated", "championed", "coached", "collaborated", "completed",
    "composed", "conceived", "conducted", "configured", "consolidated", "constructed",
    "consulted", "controlled", "converted", "coordinated", "created", "cultivated",
    "cut", "debugged", "decreased", "defined", "delivered", "deployed",
    "designed", "developed", "devised", "diagnosed", "directed", "documented",
    "doubled", "drove", "earned", "enabled", "engineered", "enhanced",
    "established", "evaluated", "executed", "expanded", "expedited", "facilitated",
    "forecasted", "formulated", "founded", "generated", "grew", "guided",
    "headed", "identified", "implemented", "improved", "increased", "influenced",
    "initiated", "innovated", "installed", "instituted", "integrated", "introduced",
    "invented", "investigated", "launched", "led", "maintained", "managed",
    "maximized", "mentored", "migrated", "minimized", "modernized", "monitored",
    "negotiated", "operated", "optimized", "orchestrated", "organized", "overhauled",
    "oversaw", "owned", "performed", "piloted", "pioneered", "planned",
    "presented", "produced", "programmed", "prototyped", "published", "raised",
    "redesigned", "reduced", "refactored", "resolved", "restructured", "revamped",
    "reviewed", "saved", "scaled", "secured", "shipped", "simplified",
    "solved", "spearheaded", "standardized", "streamlined", "strengthened", "supervised",
    "supported", "surpassed", "tested", "trained", "transformed", "tripled",
    "unified", "upgraded", "utilized", "validated", "won", "wrote",
];

/// Words that never form (or participate in) a job-description keyword.
#[rustfmt::skip]
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "against", "all", "also", "am",
    "an", "and", "any", "are", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "could", "did", "do",
    "does", "doing", "down", "during", "each", "etc", "every", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "i", "if", "in", "including", "into", "is", "it", "its",
    "itself", "just", "like", "may", "me", "more", "most", "must", "my", "no",
    "nor", "not", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "out", "over", "own", "per", "plus", "preferred", "required", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "us", "very", "via", "was", "we", "well", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "within", "would",
    "you", "your", "yours", "able", "ability", "strong", "experience", "years", "year",
    "work", "working", "role", "team", "join", "looking", "candidate", "ideal", "responsibilities",
    "requirements", "qualifications", "nice", "bonus", "new", "great", "good", "using", "use",
];

static ACTION_VERB_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ACTION_VERBS.iter().copied().collect());

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// True if `word` (already lowercase) is a reference action verb.
pub fn is_action_verb(word: &str) -> bool {
    ACTION_VERB_SET.contains(word)
}

/// True if `word` (already lowercase) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Number of entries in the action-verb dictionary.
pub fn action_verb_count() -> usize {
    ACTION_VERB_SET.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_size_in_expected_range() {
        let n = action_verb_count();
        assert!((100..=150).contains(&n), "got {n} verbs");
    }

    #[test]
    fn test_verbs_are_lowercase_and_unique() {
        assert_eq!(ACTION_VERBS.len(), action_verb_count(), "duplicate verb entry");
        for v in ACTION_VERBS {
            assert_eq!(*v, v.to_lowercase());
        }
    }

    #[test]
    fn test_led_is_verb_helped_is_not() {
        assert!(is_action_verb("led"));
        assert!(!is_action_verb("helped"));
        assert!(!is_action_verb("Led"), "lookups expect lowercase input");
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("with"));
        assert!(!is_stop_word("python"));
        assert!(!is_stop_word("leadership"));
    }
}
