use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Keywords attached to a generated interview question
///
/// Question metadata may omit the list entirely; that is kept distinct from
/// an explicitly empty list even though both score the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExpectedKeywords {
    #[default]
    Absent,
    Listed(Vec<String>),
}

impl ExpectedKeywords {
    pub fn as_slice(&self) -> &[String] {
        match self {
            ExpectedKeywords::Absent => &[],
            ExpectedKeywords::Listed(keywords) => keywords,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, ExpectedKeywords::Listed(_))
    }
}

impl From<Option<Vec<String>>> for ExpectedKeywords {
    fn from(value: Option<Vec<String>>) -> Self {
        match value {
            Some(keywords) => ExpectedKeywords::Listed(keywords),
            None => ExpectedKeywords::Absent,
        }
    }
}

impl From<Vec<String>> for ExpectedKeywords {
    fn from(value: Vec<String>) -> Self {
        ExpectedKeywords::Listed(value)
    }
}

/// Keyword coverage of a single answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// 0-10
    pub score: u8,
    pub covered: Vec<String>,
    pub missed: Vec<String>,
    pub passed: bool,
}

/// Ratings produced by the AI evaluator for one answer (each 0-10)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AiRatings {
    #[validate(range(min = 0.0, max = 10.0))]
    pub technical: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    pub communication: f64,
    #[validate(range(min = 0.0, max = 10.0))]
    pub depth: f64,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Weights used to blend AI ratings with keyword coverage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackWeights {
    pub technical: f64,
    pub communication: f64,
    pub depth: f64,
    pub coverage: f64,
}

impl Default for FeedbackWeights {
    fn default() -> Self {
        Self {
            technical: 0.4,
            communication: 0.2,
            depth: 0.2,
            coverage: 0.2,
        }
    }
}

/// Stored feedback for one submitted answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub id: Uuid,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
    pub coverage: CoverageReport,
    #[serde(default)]
    pub ratings: Option<AiRatings>,
    #[serde(rename = "keywordsDefined")]
    pub keywords_defined: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A keyword and how many answers missed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedKeyword {
    pub keyword: String,
    pub count: usize,
}

/// Aggregate statistics over the answers of one interview session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "answerCount")]
    pub answer_count: usize,
    #[serde(rename = "averageScore")]
    pub average_score: Option<f64>,
    #[serde(rename = "minScore")]
    pub min_score: Option<f64>,
    #[serde(rename = "maxScore")]
    pub max_score: Option<f64>,
    #[serde(rename = "coveragePassRate")]
    pub coverage_pass_rate: f64,
    #[serde(rename = "frequentlyMissed")]
    pub frequently_missed: Vec<MissedKeyword>,
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub sessions: usize,
    pub answers: usize,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
    #[serde(rename = "bestScore")]
    pub best_score: f64,
}
