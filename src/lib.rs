//! Interview Scorer - answer scoring service for AI mock interviews
//!
//! This library provides keyword-coverage scoring for free-text interview
//! answers, blends it with AI-rated scores into per-answer feedback, and
//! aggregates stored feedback into session summaries and a leaderboard.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CoverageScorer, FeedbackBuilder, KeywordMatcher, SynonymTable};
pub use models::{AiRatings, AnswerFeedback, CoverageReport, ExpectedKeywords, FeedbackWeights};
