use crate::core::matcher::{normalize, KeywordMatcher};
use crate::core::synonyms::SynonymTable;
use crate::models::{CoverageReport, ExpectedKeywords};
use std::sync::Arc;

/// Minimum share of covered keywords, in percent, for an answer to pass
pub const PASS_THRESHOLD_PERCENT: usize = 40;

/// Highest coverage score
pub const MAX_COVERAGE_SCORE: u8 = 10;

/// Turns a keyword list and an answer into a 0-10 coverage score
///
/// Scoring formula:
/// score  = round_half_up(10 * covered / keywords)
/// passed = covered / keywords >= 0.4
///
/// An empty keyword list scores 10 and passes.
#[derive(Debug, Clone, Default)]
pub struct CoverageScorer {
    matcher: KeywordMatcher,
}

impl CoverageScorer {
    pub fn new(matcher: KeywordMatcher) -> Self {
        Self { matcher }
    }

    pub fn with_synonyms(synonyms: Arc<SynonymTable>) -> Self {
        Self::new(KeywordMatcher::new(synonyms))
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    /// Score `answer_text` against `keywords`
    ///
    /// Keywords are classified in input order. Duplicates are classified
    /// independently and counted once per occurrence.
    pub fn score<S: AsRef<str>>(&self, keywords: &[S], answer_text: &str) -> CoverageReport {
        if keywords.is_empty() {
            return CoverageReport {
                score: MAX_COVERAGE_SCORE,
                covered: Vec::new(),
                missed: Vec::new(),
                passed: true,
            };
        }

        let answer = normalize(answer_text);
        let mut covered = Vec::new();
        let mut missed = Vec::new();

        for keyword in keywords {
            let original = keyword.as_ref();
            let normalized = normalize(original);

            if normalized.is_empty() {
                tracing::warn!("Blank keyword in expected keyword list, counting it as missed");
                missed.push(original.to_string());
                continue;
            }

            if self.matcher.matches_normalized(&normalized, &answer) {
                covered.push(original.to_string());
            } else {
                missed.push(original.to_string());
            }
        }

        let total = keywords.len();
        let hits = covered.len();

        tracing::debug!("Keyword coverage: {}/{} covered", hits, total);

        CoverageReport {
            score: coverage_score(hits, total),
            covered,
            missed,
            passed: hits * 100 >= total * PASS_THRESHOLD_PERCENT,
        }
    }

    /// Score against optional question keywords; an absent list scores like an empty one
    pub fn score_expected(&self, expected: &ExpectedKeywords, answer_text: &str) -> CoverageReport {
        self.score(expected.as_slice(), answer_text)
    }
}

/// round_half_up(10 * hits / total) in integer arithmetic
#[inline]
fn coverage_score(hits: usize, total: usize) -> u8 {
    if total == 0 {
        return MAX_COVERAGE_SCORE;
    }

    let max = MAX_COVERAGE_SCORE as usize;
    let score = (2 * max * hits + total) / (2 * total);
    score.min(max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keywords_short_circuit() {
        let scorer = CoverageScorer::default();
        let empty: [&str; 0] = [];
        let report = scorer.score(&empty, "anything");

        assert_eq!(report.score, 10);
        assert!(report.covered.is_empty());
        assert!(report.missed.is_empty());
        assert!(report.passed);
    }

    #[test]
    fn test_threshold_scenario() {
        let scorer = CoverageScorer::default();
        let report = scorer.score(
            &["api", "database", "cache", "async"],
            "I exposed an API backed by a database",
        );

        assert_eq!(report.covered, vec!["api", "database"]);
        assert_eq!(report.missed, vec!["cache", "async"]);
        assert_eq!(report.score, 5);
        assert!(report.passed);
    }

    #[test]
    fn test_below_threshold_rounds_half_up() {
        let scorer = CoverageScorer::default();
        let report = scorer.score(&["api", "database", "cache", "async"], "only the api");

        assert_eq!(report.covered, vec!["api"]);
        assert_eq!(report.score, 3);
        assert!(!report.passed);
    }

    #[test]
    fn test_exact_threshold_passes() {
        let scorer = CoverageScorer::default();
        let report = scorer.score(
            &["api", "cache", "queue", "mutex", "thread"],
            "api and cache",
        );

        assert_eq!(report.score, 4);
        assert!(report.passed);
    }

    #[test]
    fn test_duplicates_counted_per_occurrence() {
        let scorer = CoverageScorer::default();
        let report = scorer.score(&["api", "api", "cache"], "the api");

        assert_eq!(report.covered, vec!["api", "api"]);
        assert_eq!(report.missed, vec!["cache"]);
        assert_eq!(report.score, 7);
    }

    #[test]
    fn test_blank_keyword_is_missed() {
        let scorer = CoverageScorer::default();
        let report = scorer.score(&["", "api"], "an api");

        assert_eq!(report.covered, vec!["api"]);
        assert_eq!(report.missed, vec![""]);
        assert_eq!(report.score, 5);
    }

    #[test]
    fn test_keeps_caller_spelling() {
        let scorer = CoverageScorer::default();
        let report = scorer.score(&["REST API"], "a rest api");
        assert_eq!(report.covered, vec!["REST API"]);
    }

    #[test]
    fn test_absent_and_empty_expected_keywords() {
        let scorer = CoverageScorer::default();
        let absent = scorer.score_expected(&ExpectedKeywords::Absent, "text");
        let empty = scorer.score_expected(&ExpectedKeywords::Listed(vec![]), "text");
        assert_eq!(absent, empty);
        assert_eq!(absent.score, 10);
    }

    #[test]
    fn test_coverage_score_rounding() {
        assert_eq!(coverage_score(0, 4), 0);
        assert_eq!(coverage_score(1, 4), 3);
        assert_eq!(coverage_score(1, 3), 3);
        assert_eq!(coverage_score(2, 3), 7);
        assert_eq!(coverage_score(1, 20), 1);
        assert_eq!(coverage_score(4, 4), 10);
    }
}
