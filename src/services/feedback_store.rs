use crate::models::AnswerFeedback;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// In-memory store of answer feedback records
///
/// Bounded by entry count and evicts records after a fixed TTL. Records
/// the caller wants to keep longer belong in the application database.
pub struct FeedbackStore {
    answers: moka::future::Cache<Uuid, AnswerFeedback>,
    max_answers: u64,
    ttl_secs: u64,
}

impl FeedbackStore {
    /// Create a new feedback store
    pub fn new(max_answers: u64, ttl_secs: u64) -> Self {
        let answers = moka::future::CacheBuilder::new(max_answers)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            answers,
            max_answers,
            ttl_secs,
        }
    }

    /// Store a feedback record under its id
    pub async fn insert(&self, feedback: AnswerFeedback) {
        tracing::trace!("Storing feedback {}", feedback.id);
        self.answers.insert(feedback.id, feedback).await;
    }

    /// Look up one feedback record
    pub async fn get(&self, id: &Uuid) -> Option<AnswerFeedback> {
        self.answers.get(id).await
    }

    /// All records for a session, oldest first
    pub fn session_answers(&self, session_id: &str) -> Vec<AnswerFeedback> {
        let mut answers: Vec<AnswerFeedback> = self
            .answers
            .iter()
            .filter(|(_, feedback)| feedback.session_id == session_id)
            .map(|(_, feedback)| feedback)
            .collect();

        answers.sort_by_key(|feedback| feedback.created_at);
        answers
    }

    /// Every live record, in no particular order
    pub fn all_answers(&self) -> Vec<AnswerFeedback> {
        self.answers.iter().map(|(_, feedback)| feedback).collect()
    }

    /// Approximate number of stored records
    pub fn len(&self) -> u64 {
        self.answers.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.len(),
            max_answers: self.max_answers,
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub entries: u64,
    pub max_answers: u64,
    pub ttl_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoverageReport;

    fn feedback(session_id: &str, score: f64) -> AnswerFeedback {
        AnswerFeedback {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            user_id: "user".to_string(),
            question_id: "q".to_string(),
            overall_score: score,
            coverage: CoverageReport {
                score: 10,
                covered: vec![],
                missed: vec![],
                passed: true,
            },
            ratings: None,
            keywords_defined: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = FeedbackStore::new(100, 60);
        let record = feedback("s1", 7.5);
        let id = record.id;

        store.insert(record).await;

        let fetched = store.get(&id).await.expect("record should be stored");
        assert_eq!(fetched.overall_score, 7.5);
        assert!(store.get(&Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_session_answers_filtered_and_ordered() {
        let store = FeedbackStore::new(100, 60);
        let mut first = feedback("s1", 1.0);
        let mut second = feedback("s1", 2.0);
        first.created_at = chrono::Utc::now() - chrono::Duration::seconds(10);
        second.created_at = chrono::Utc::now();

        store.insert(second).await;
        store.insert(first).await;
        store.insert(feedback("s2", 3.0)).await;

        let answers = store.session_answers("s1");
        let scores: Vec<f64> = answers.iter().map(|a| a.overall_score).collect();
        assert_eq!(scores, vec![1.0, 2.0]);
        assert_eq!(store.all_answers().len(), 3);
        assert!(store.session_answers("missing").is_empty());
    }

    #[test]
    fn test_stats_reports_limits() {
        let store = FeedbackStore::new(500, 3600);
        let stats = store.stats();
        assert_eq!(stats.max_answers, 500);
        assert_eq!(stats.ttl_secs, 3600);
        assert_eq!(stats.entries, 0);
    }
}
