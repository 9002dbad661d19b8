// Core algorithm exports
pub mod analytics;
pub mod feedback;
pub mod matcher;
pub mod scoring;
pub mod synonyms;

pub use analytics::{build_leaderboard, summarize_session};
pub use feedback::{blend_score, AnswerSubmission, FeedbackBuilder};
pub use matcher::{normalize, KeywordMatcher};
pub use scoring::{CoverageScorer, MAX_COVERAGE_SCORE, PASS_THRESHOLD_PERCENT};
pub use synonyms::{SynonymError, SynonymTable};
