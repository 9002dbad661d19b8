use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::AnswerSubmission;
use crate::models::domain::AiRatings;

/// Request to score keyword coverage of an answer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CoverageRequest {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[validate(length(max = 20000))]
    #[serde(alias = "answer_text", rename = "answerText")]
    pub answer_text: String,
}

/// Request to score, blend and store feedback for a submitted answer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "question_id", rename = "questionId")]
    pub question_id: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[validate(length(max = 20000))]
    #[serde(alias = "answer_text", rename = "answerText")]
    pub answer_text: String,
    #[validate(nested)]
    #[serde(default)]
    pub ratings: Option<AiRatings>,
}

impl From<FeedbackRequest> for AnswerSubmission {
    fn from(req: FeedbackRequest) -> Self {
        AnswerSubmission {
            session_id: req.session_id,
            user_id: req.user_id,
            question_id: req.question_id,
            keywords: req.keywords.into(),
            answer_text: req.answer_text,
            ratings: req.ratings,
        }
    }
}

/// Leaderboard query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    10
}
