use crate::core::scoring::CoverageScorer;
use crate::models::{AiRatings, AnswerFeedback, CoverageReport, ExpectedKeywords, FeedbackWeights};
use uuid::Uuid;

/// Blend keyword coverage with AI ratings into one 0-10 score
///
/// score = (
///     technical * w.technical +
///     communication * w.communication +
///     depth * w.depth +
///     coverage * w.coverage
/// ) / sum(w)
///
/// Without ratings, or with a non-positive weight sum, the coverage score
/// stands alone. The result is clamped to 0-10 and rounded to one decimal.
pub fn blend_score(
    coverage: &CoverageReport,
    ratings: Option<&AiRatings>,
    weights: &FeedbackWeights,
) -> f64 {
    let coverage_score = coverage.score as f64;

    let blended = match ratings {
        Some(ratings) => {
            if [weights.technical, weights.communication, weights.depth, weights.coverage]
                .iter()
                .any(|w| *w < 0.0)
            {
                tracing::warn!("Negative feedback weight in {:?}", weights);
            }

            let weight_sum =
                weights.technical + weights.communication + weights.depth + weights.coverage;

            if weight_sum > 0.0 {
                (ratings.technical * weights.technical
                    + ratings.communication * weights.communication
                    + ratings.depth * weights.depth
                    + coverage_score * weights.coverage)
                    / weight_sum
            } else {
                tracing::warn!("Feedback weights sum to {}, using coverage score only", weight_sum);
                coverage_score
            }
        }
        None => coverage_score,
    };

    round_one_decimal(blended.clamp(0.0, 10.0))
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One submitted answer, as received from the answer-submission flow
#[derive(Debug, Clone)]
pub struct AnswerSubmission {
    pub session_id: String,
    pub user_id: String,
    pub question_id: String,
    pub keywords: ExpectedKeywords,
    pub answer_text: String,
    pub ratings: Option<AiRatings>,
}

/// Produces stored feedback records from answer submissions
#[derive(Debug, Clone, Default)]
pub struct FeedbackBuilder {
    scorer: CoverageScorer,
    weights: FeedbackWeights,
}

impl FeedbackBuilder {
    pub fn new(scorer: CoverageScorer, weights: FeedbackWeights) -> Self {
        Self { scorer, weights }
    }

    pub fn scorer(&self) -> &CoverageScorer {
        &self.scorer
    }

    pub fn weights(&self) -> &FeedbackWeights {
        &self.weights
    }

    /// Score a submission and wrap the result in a new feedback record
    pub fn build(&self, submission: AnswerSubmission) -> AnswerFeedback {
        let coverage = self
            .scorer
            .score_expected(&submission.keywords, &submission.answer_text);
        let overall_score = blend_score(&coverage, submission.ratings.as_ref(), &self.weights);

        tracing::debug!(
            "Answer {} in session {}: coverage {}/10, overall {}",
            submission.question_id,
            submission.session_id,
            coverage.score,
            overall_score
        );

        AnswerFeedback {
            id: Uuid::new_v4(),
            session_id: submission.session_id,
            user_id: submission.user_id,
            question_id: submission.question_id,
            overall_score,
            coverage,
            ratings: submission.ratings,
            keywords_defined: submission.keywords.is_defined(),
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(score: u8) -> CoverageReport {
        CoverageReport {
            score,
            covered: vec![],
            missed: vec![],
            passed: score >= 4,
        }
    }

    fn ratings(technical: f64, communication: f64, depth: f64) -> AiRatings {
        AiRatings {
            technical,
            communication,
            depth,
            summary: None,
        }
    }

    #[test]
    fn test_blend_default_weights() {
        let score = blend_score(
            &coverage(5),
            Some(&ratings(8.0, 6.0, 7.0)),
            &FeedbackWeights::default(),
        );
        // 8*0.4 + 6*0.2 + 7*0.2 + 5*0.2 = 6.8
        assert!((score - 6.8).abs() < 1e-9);
    }

    #[test]
    fn test_blend_without_ratings() {
        let score = blend_score(&coverage(7), None, &FeedbackWeights::default());
        assert_eq!(score, 7.0);
    }

    #[test]
    fn test_blend_zero_weights_falls_back() {
        let weights = FeedbackWeights {
            technical: 0.0,
            communication: 0.0,
            depth: 0.0,
            coverage: 0.0,
        };
        let score = blend_score(&coverage(3), Some(&ratings(10.0, 10.0, 10.0)), &weights);
        assert_eq!(score, 3.0);
    }

    #[test]
    fn test_blend_unnormalized_weights() {
        let weights = FeedbackWeights {
            technical: 2.0,
            communication: 0.0,
            depth: 0.0,
            coverage: 2.0,
        };
        let score = blend_score(&coverage(4), Some(&ratings(9.0, 0.0, 0.0)), &weights);
        assert!((score - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_blend_rounds_to_one_decimal() {
        let weights = FeedbackWeights {
            technical: 1.0,
            communication: 1.0,
            depth: 1.0,
            coverage: 0.0,
        };
        let score = blend_score(&coverage(0), Some(&ratings(7.0, 7.0, 6.0)), &weights);
        assert!((score - 6.7).abs() < 1e-9);
    }

    #[test]
    fn test_build_feedback_record() {
        let builder = FeedbackBuilder::default();
        let feedback = builder.build(AnswerSubmission {
            session_id: "session-1".to_string(),
            user_id: "user-1".to_string(),
            question_id: "q-1".to_string(),
            keywords: ExpectedKeywords::Listed(vec!["api".to_string(), "cache".to_string()]),
            answer_text: "I put a cache in front of the API".to_string(),
            ratings: None,
        });

        assert_eq!(feedback.coverage.score, 10);
        assert_eq!(feedback.overall_score, 10.0);
        assert!(feedback.keywords_defined);
        assert_eq!(feedback.session_id, "session-1");
    }

    #[test]
    fn test_build_without_keywords() {
        let builder = FeedbackBuilder::default();
        let feedback = builder.build(AnswerSubmission {
            session_id: "s".to_string(),
            user_id: "u".to_string(),
            question_id: "q".to_string(),
            keywords: ExpectedKeywords::Absent,
            answer_text: "".to_string(),
            ratings: Some(ratings(0.0, 0.0, 0.0)),
        });

        assert!(!feedback.keywords_defined);
        assert_eq!(feedback.coverage.score, 10);
        // Only coverage contributes: 10 * 0.2 / 1.0
        assert!((feedback.overall_score - 2.0).abs() < 1e-9);
    }
}
