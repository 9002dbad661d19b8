use crate::models::{AnswerFeedback, LeaderboardEntry, MissedKeyword, SessionSummary};
use std::collections::{HashMap, HashSet};

/// How many missed keywords a session summary lists
const FREQUENTLY_MISSED_LIMIT: usize = 5;

/// Aggregate the answers of one session
///
/// Callers pass the answers belonging to `session_id`; no filtering is done here.
pub fn summarize_session(session_id: &str, answers: &[AnswerFeedback]) -> SessionSummary {
    let answer_count = answers.len();

    if answer_count == 0 {
        return SessionSummary {
            session_id: session_id.to_string(),
            answer_count: 0,
            average_score: None,
            min_score: None,
            max_score: None,
            coverage_pass_rate: 0.0,
            frequently_missed: Vec::new(),
        };
    }

    let scores = answers.iter().map(|a| a.overall_score);
    let total: f64 = scores.clone().sum();
    let min = scores.clone().fold(f64::INFINITY, f64::min);
    let max = scores.fold(f64::NEG_INFINITY, f64::max);

    let passed = answers.iter().filter(|a| a.coverage.passed).count();

    SessionSummary {
        session_id: session_id.to_string(),
        answer_count,
        average_score: Some(round_two_decimals(total / answer_count as f64)),
        min_score: Some(min),
        max_score: Some(max),
        coverage_pass_rate: round_two_decimals(passed as f64 / answer_count as f64),
        frequently_missed: frequently_missed(answers),
    }
}

/// Missed keywords ranked by how many answers missed them
fn frequently_missed(answers: &[AnswerFeedback]) -> Vec<MissedKeyword> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for answer in answers {
        // A keyword repeated inside one answer counts once for that answer
        let unique: HashSet<String> = answer
            .coverage
            .missed
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        for keyword in unique {
            *counts.entry(keyword).or_insert(0) += 1;
        }
    }

    let mut missed: Vec<MissedKeyword> = counts
        .into_iter()
        .map(|(keyword, count)| MissedKeyword { keyword, count })
        .collect();

    // Most missed first, then alphabetically for stable output
    missed.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    missed.truncate(FREQUENTLY_MISSED_LIMIT);
    missed
}

#[derive(Default)]
struct UserTally<'a> {
    sessions: HashSet<&'a str>,
    answers: usize,
    total: f64,
    best: f64,
}

/// Rank users by their average answer score
///
/// Ties are broken by best score, then by user id.
pub fn build_leaderboard(answers: &[AnswerFeedback], limit: usize) -> Vec<LeaderboardEntry> {
    let mut tallies: HashMap<&str, UserTally> = HashMap::new();

    for answer in answers {
        let tally = tallies.entry(answer.user_id.as_str()).or_default();
        tally.sessions.insert(answer.session_id.as_str());
        tally.answers += 1;
        tally.total += answer.overall_score;
        tally.best = tally.best.max(answer.overall_score);
    }

    let mut entries: Vec<LeaderboardEntry> = tallies
        .into_iter()
        .map(|(user_id, tally)| LeaderboardEntry {
            rank: 0,
            user_id: user_id.to_string(),
            sessions: tally.sessions.len(),
            answers: tally.answers,
            average_score: round_two_decimals(tally.total / tally.answers as f64),
            best_score: tally.best,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.best_score
                    .partial_cmp(&a.best_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    entries.truncate(limit);
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    entries
}

#[inline]
fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
