use actix_web::{web, HttpResponse, Responder};
use std::collections::HashSet;
use crate::core::{build_leaderboard, summarize_session};
use crate::models::{ErrorResponse, LeaderboardQuery, LeaderboardResponse};
use crate::routes::AppState;

/// Largest leaderboard page served
const MAX_LEADERBOARD_LIMIT: u16 = 100;

/// Configure session analytics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/sessions/{session_id}/summary", web::get().to(session_summary))
        .route("/leaderboard", web::get().to(leaderboard));
}

/// Session summary endpoint
///
/// GET /api/v1/sessions/{session_id}/summary
async fn session_summary(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();
    let answers = state.store.session_answers(&session_id);

    if answers.is_empty() {
        return HttpResponse::NotFound().json(ErrorResponse::new(
            "Session not found",
            format!("No answers stored for session {}", session_id),
            404,
        ));
    }

    let summary = summarize_session(&session_id, &answers);

    tracing::debug!(
        "Summarized session {}: {} answers, average {:?}",
        session_id,
        summary.answer_count,
        summary.average_score
    );

    HttpResponse::Ok().json(summary)
}

/// Leaderboard endpoint
///
/// GET /api/v1/leaderboard?limit={limit}
async fn leaderboard(
    state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> impl Responder {
    // Cap limit at 100 to keep responses small
    let limit = query.limit.min(MAX_LEADERBOARD_LIMIT) as usize;

    let answers = state.store.all_answers();
    let total_users = answers
        .iter()
        .map(|a| a.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let entries = build_leaderboard(&answers, limit);

    tracing::debug!("Returning {} of {} leaderboard entries", entries.len(), total_users);

    HttpResponse::Ok().json(LeaderboardResponse {
        entries,
        total_users,
    })
}
