// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AiRatings, AnswerFeedback, CoverageReport, ExpectedKeywords, FeedbackWeights, LeaderboardEntry, MissedKeyword, SessionSummary};
pub use requests::{CoverageRequest, FeedbackRequest, LeaderboardQuery};
pub use responses::{ErrorResponse, HealthResponse, LeaderboardResponse};
